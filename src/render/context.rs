//! Per-call rendering state.

use crate::config::{Config, EscapeMode};
use crate::markdown::{TextEscape, escape_lines};

use super::budget::Budget;
use super::references::RefBook;
use super::{Extension, ExtensionContext};

/// Settings that change while descending the tree.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Scope<'a> {
    pub heading_level: usize,
    pub list_level: usize,
    pub line_break: &'a str,
    pub pipes: bool,
}

/// Context for one top-level render call.
///
/// Holds the configuration, the current [`Scope`], and the reference book
/// that numbers link targets and footnotes. Bounded renders work against a
/// shadow copy of the book so they never disturb the real numbering.
pub(crate) struct RenderContext<'a, X> {
    pub(crate) config: &'a Config,
    pub(crate) scope: Scope<'a>,
    pub(crate) refs: RefBook<X>,
    shadow: Option<RefBook<X>>,
    peeking: bool,
    extension: &'a dyn Extension<X>,
}

impl<'a, X> RenderContext<'a, X> {
    pub(crate) fn new(config: &'a Config, extension: &'a dyn Extension<X>) -> Self {
        Self {
            config,
            scope: Scope {
                heading_level: config.heading_level.max(1),
                list_level: config.list_level.max(1),
                line_break: &config.nl,
                pipes: false,
            },
            refs: RefBook::new(config),
            shadow: None,
            peeking: false,
            extension,
        }
    }

    pub(crate) fn text_escape(&self) -> TextEscape<'a> {
        TextEscape {
            mode: self.config.escape,
            emoji: self.config.emoji_escape,
            line_break: self.scope.line_break,
            pipes: self.scope.pipes,
        }
    }

    /// The line-start pass for paragraph text; a no-op when escaping is off.
    pub(crate) fn line_pass(&self) -> fn(&str, bool) -> String {
        match self.config.escape {
            EscapeMode::Off => keep_lines,
            EscapeMode::Smart | EscapeMode::Exact => escape_lines,
        }
    }

    /// Run `f` with `scope` in place, restoring the previous scope after.
    pub(crate) fn scoped<T>(&mut self, scope: Scope<'a>, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.scope, scope);
        let result = f(self);
        self.scope = saved;
        result
    }

    /// The reference book to use for a render with `budget`.
    pub(crate) fn book(&mut self, budget: Budget) -> &mut RefBook<X> {
        match budget {
            Budget::Unbounded => &mut self.refs,
            Budget::Limited(_) => {
                debug_assert!(self.peeking, "bounded render outside of a peek session");
                self.shadow.get_or_insert_with(|| self.refs.clone())
            }
        }
    }

    /// Run `f` inside a peek session.
    ///
    /// The first bounded render of the session forks the shadow book from
    /// the real one; nested peeks share the outer session.
    pub(crate) fn peek<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        if self.peeking {
            return f(self);
        }
        self.peeking = true;
        self.shadow = None;
        let result = f(self);
        self.peeking = false;
        self.shadow = None;
        result
    }

    pub(crate) fn shadow_snapshot(&self) -> Option<RefBook<X>> {
        self.shadow.clone()
    }

    pub(crate) fn restore_shadow(&mut self, snapshot: Option<RefBook<X>>) {
        self.shadow = snapshot;
    }

    pub(crate) fn render_extension(&self, value: &X) -> crate::Result<String> {
        let ext_cx = ExtensionContext {
            config: self.config,
            escape: self.text_escape(),
            heading_level: self.scope.heading_level,
            list_level: self.scope.list_level,
        };
        self.extension.render(value, &ext_cx)
    }
}

fn keep_lines(text: &str, _open_tail: bool) -> String {
    text.to_string()
}
