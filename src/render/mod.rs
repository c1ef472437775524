//! Markdown rendering of the document tree.
//!
//! Rendering walks the tree once, depth-first. Every node renders under a
//! [`Budget`]; an unbounded render produces the document, a limited one a
//! prefix of it without touching the reference numbering of the real render.
//! Entry points live in [`crate::document`].

mod block;
pub(crate) mod budget;
mod context;
mod inline;
pub(crate) mod references;
mod table;

pub use budget::{Budget, Rendered};

pub(crate) use context::{RenderContext, Scope};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ir::{Inline, Node};
use crate::markdown::TextEscape;

use budget::fill;

/// Renders the opaque values carried by [`Inline::Ext`].
///
/// # Examples
///
/// ```
/// use mdscribe::{Extension, ExtensionContext, Node, Renderer, inlines, md};
///
/// struct Celsius;
///
/// impl Extension<f64> for Celsius {
///     fn render(&self, value: &f64, _cx: &ExtensionContext<'_>) -> mdscribe::Result<String> {
///         Ok(format!("{value:.1} °C"))
///     }
/// }
///
/// let doc: Node<f64> = md::p(inlines!["It is ", md::ext(21.5)]).into();
/// let out = Renderer::new().with_extension(&Celsius).render(&doc).unwrap();
/// assert_eq!(out, "\nIt is 21.5 °C\n");
/// ```
pub trait Extension<X> {
    /// Render `value` as finished markdown; the result is not escaped again.
    fn render(&self, value: &X, cx: &ExtensionContext<'_>) -> Result<String>;
}

/// Read-only view of the render state handed to an [`Extension`].
#[derive(Debug, Clone, Copy)]
pub struct ExtensionContext<'a> {
    pub config: &'a Config,
    /// Escaping options in effect where the value appears.
    pub escape: TextEscape<'a>,
    pub heading_level: usize,
    pub list_level: usize,
}

/// Extension renderer that rejects every value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl<X> Extension<X> for Unsupported {
    fn render(&self, _value: &X, _cx: &ExtensionContext<'_>) -> Result<String> {
        Err(Error::Unrenderable {
            type_name: std::any::type_name::<X>(),
        })
    }
}

/// Render the document root.
///
/// An inline root is laid out like a paragraph body, without the
/// surrounding newlines; raw content stays verbatim.
pub(crate) fn render_root<X>(
    node: &Node<X>,
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
) -> Result<Rendered> {
    match node {
        Node::Inline(Inline::Raw(raw)) => Ok(Rendered::clipped(&raw.content, budget)),
        Node::Inline(inline) => {
            let pass = cx.line_pass();
            fill(cx, budget, |cx, budget| inline::render_inline(inline, cx, budget), pass)
        }
        Node::Block(block) => block::render_block(block, cx, budget),
    }
}
