//! Render entry points.
//!
//! A [`Renderer`] pairs a [`Config`] with an [`Extension`] renderer. Each
//! call gets fresh reference numbering, so rendering the same tree twice
//! gives the same text.
//!
//! # Example
//!
//! ```
//! use mdscribe::{Node, Renderer, blocks, inlines, md};
//!
//! let target = md::link_target("https://example.com").with_title("Example");
//! let doc: Node = md::section(
//!     Some(md::h("Links")),
//!     blocks![md::p(inlines!["See ", md::link_to("the site", &target)])],
//! )
//! .into();
//!
//! let out = Renderer::new().render(&doc).unwrap();
//! assert_eq!(
//!     out,
//!     "\n# Links\n\nSee [the site][1]\n\n[1]: <https://example.com> \"Example\"\n"
//! );
//! ```

use std::convert::Infallible;

use tracing::debug;

use crate::config::{CheckReferences, Config, ConfigOverrides};
use crate::error::{Error, ReferenceError, Result};
use crate::ir::Node;
use crate::render::references::{append_pending, validate};
use crate::render::{Budget, Extension, RenderContext, Unsupported, render_root};

/// Renders node trees to markdown.
pub struct Renderer<'e, X = Infallible> {
    config: Config,
    extension: &'e dyn Extension<X>,
}

impl<X> Default for Renderer<'_, X> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'e, X> Renderer<'e, X> {
    /// A renderer with the default configuration that rejects extension
    /// values.
    pub fn new() -> Self {
        Self {
            config: Config::DEFAULT,
            extension: &Unsupported,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Apply sparse overrides on top of the current configuration.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        self.config = self.config.merged(overrides);
        self
    }

    pub fn with_extension<'f>(self, extension: &'f dyn Extension<X>) -> Renderer<'f, X> {
        Renderer {
            config: self.config,
            extension,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Render `root`, failing with [`Error::References`] when reference
    /// validation finds problems.
    pub fn render(&self, root: &Node<X>) -> Result<String> {
        let (output, errors) = self.render_collect(root)?;
        if errors.is_empty() {
            Ok(output)
        } else {
            Err(Error::References { output, errors })
        }
    }

    /// Render `root`, passing the output and any reference errors to
    /// `on_errors` instead of failing.
    ///
    /// The handler only runs when there are errors; otherwise the output is
    /// converted with `R::from`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mdscribe::{Config, Node, Renderer, inlines, md, nodes};
    ///
    /// let note = md::footnote(nodes!["Never placed"]);
    /// let doc: Node = md::p(inlines!["See", note.reference()]).into();
    /// let config = Config::DEFAULT.with_auto_references(false);
    ///
    /// let codes: String = Renderer::new()
    ///     .with_config(config)
    ///     .render_with(&doc, |_output, errors| {
    ///         errors.iter().map(|e| e.kind.code()).collect::<Vec<_>>().join(",")
    ///     })
    ///     .unwrap();
    /// assert_eq!(codes, "FOOTNOTE_MISSING");
    /// ```
    pub fn render_with<R, F>(&self, root: &Node<X>, on_errors: F) -> Result<R>
    where
        R: From<String>,
        F: FnOnce(String, Vec<ReferenceError>) -> R,
    {
        let (output, errors) = self.render_collect(root)?;
        if errors.is_empty() {
            Ok(R::from(output))
        } else {
            Ok(on_errors(output, errors))
        }
    }

    /// At most `max_chars` characters of what rendering `root` alone would
    /// produce.
    ///
    /// Only the root is rendered; definitions that [`render`](Self::render)
    /// would append are not part of the preview. Nothing past the limit is
    /// rendered.
    pub fn preview(&self, root: &Node<X>, max_chars: usize) -> Result<String> {
        let mut cx = RenderContext::new(&self.config, self.extension);
        let rendered = cx.peek(|cx| render_root(root, cx, Budget::Limited(max_chars)))?;
        debug!(max_chars, truncated = rendered.truncated, "rendered preview");
        Ok(rendered.text)
    }

    fn render_collect(&self, root: &Node<X>) -> Result<(String, Vec<ReferenceError>)> {
        let mut cx = RenderContext::new(&self.config, self.extension);
        let mut output = render_root(root, &mut cx, Budget::Unbounded)?.text;
        if self.config.auto_references {
            output.push_str(&append_pending(&mut cx)?);
        }
        let errors = match self.config.check_references {
            CheckReferences::Off => Vec::new(),
            CheckReferences::Missing | CheckReferences::Strict => validate(&mut cx)?,
        };
        debug!(
            len = output.len(),
            references = cx.refs.len(),
            errors = errors.len(),
            "rendered document"
        );
        Ok((output, errors))
    }
}

/// Render `root` with the default configuration.
pub fn render(root: &Node) -> Result<String> {
    Renderer::new().render(root)
}

/// Render `root` with the default configuration, handing reference errors to
/// `on_errors`.
pub fn render_with<R, F>(root: &Node, on_errors: F) -> Result<R>
where
    R: From<String>,
    F: FnOnce(String, Vec<ReferenceError>) -> R,
{
    Renderer::new().render_with(root, on_errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{inlines, md, nodes};

    #[test]
    fn test_render_is_repeatable() {
        let note = md::footnote(nodes!["note"]);
        let doc: Node = md::p(inlines!["a", note.reference()]).into();
        let renderer = Renderer::new();
        let first = renderer.render(&doc).unwrap();
        assert_eq!(first, "\na[^1]\n\n[^1]: note\n");
        assert_eq!(renderer.render(&doc).unwrap(), first);
    }

    #[test]
    fn test_preview_leaves_numbering_alone() {
        let target = md::link_target("http://localhost");
        let doc: Node = md::p(inlines![md::link_to("x", &target)]).into();
        let renderer = Renderer::new();
        assert_eq!(renderer.preview(&doc, 6).unwrap(), "\n[x][1");
        assert_eq!(renderer.render(&doc).unwrap(), "\n[x][1]\n\n[1]: <http://localhost>\n");
    }

    #[test]
    fn test_unsupported_extension() {
        let doc: Node<u32> = md::p(inlines![md::ext(5u32)]).into();
        let err = Renderer::new().render(&doc).unwrap_err();
        assert!(matches!(err, Error::Unrenderable { type_name: "u32" }));
    }
}
