//! Character budgets for bounded rendering.
//!
//! Every render call takes a [`Budget`] and returns a [`Rendered`]. With a
//! limited budget the text is a prefix of the unbounded output, at most the
//! budget long, and `truncated` says whether anything was left out. Pieces
//! past the budget are never rendered, so previewing a small prefix of a
//! large subtree stays cheap.

use crate::error::Result;

use super::RenderContext;

/// How many characters a render may still produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Unbounded,
    Limited(usize),
}

impl Budget {
    pub fn is_unbounded(self) -> bool {
        matches!(self, Budget::Unbounded)
    }

    /// The same kind of budget, large enough to never cut anything.
    pub(crate) fn uncapped(self) -> Budget {
        match self {
            Budget::Unbounded => Budget::Unbounded,
            Budget::Limited(_) => Budget::Limited(usize::MAX),
        }
    }
}

/// Output of a render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub remaining: Budget,
    /// Whether content was left out to stay within the budget.
    pub truncated: bool,
}

impl Rendered {
    /// `text` cut to `budget`.
    pub(crate) fn clipped(text: &str, budget: Budget) -> Rendered {
        let mut pieces = Pieces::new(budget);
        pieces.push(text);
        pieces.finish()
    }

    pub(crate) fn empty(budget: Budget) -> Rendered {
        Rendered {
            text: String::new(),
            remaining: budget,
            truncated: false,
        }
    }
}

/// Accumulates rendered pieces within a budget.
///
/// Once a piece had to be cut, everything after it is skipped.
pub(crate) struct Pieces {
    text: String,
    budget: Budget,
    truncated: bool,
}

impl Pieces {
    pub(crate) fn new(budget: Budget) -> Self {
        Self {
            text: String::new(),
            budget,
            truncated: false,
        }
    }

    pub(crate) fn budget(&self) -> Budget {
        self.budget
    }

    pub(crate) fn is_done(&self) -> bool {
        self.truncated
    }

    pub(crate) fn push(&mut self, s: &str) {
        if self.truncated || s.is_empty() {
            return;
        }
        match self.budget {
            Budget::Unbounded => self.text.push_str(s),
            Budget::Limited(left) => match s.char_indices().nth(left) {
                None => {
                    self.text.push_str(s);
                    self.budget = Budget::Limited(left - s.chars().count());
                }
                Some((cut, _)) => {
                    self.text.push_str(&s[..cut]);
                    self.budget = Budget::Limited(0);
                    self.truncated = true;
                }
            },
        }
    }

    pub(crate) fn push_rendered(&mut self, rendered: Rendered) {
        self.push(&rendered.text);
        self.truncated |= rendered.truncated;
    }

    /// Render the next piece with whatever budget is left.
    pub(crate) fn push_with(&mut self, render: impl FnOnce(Budget) -> Result<Rendered>) -> Result<()> {
        if !self.truncated {
            let rendered = render(self.budget)?;
            self.push_rendered(rendered);
        }
        Ok(())
    }

    pub(crate) fn finish(self) -> Rendered {
        Rendered {
            text: self.text,
            remaining: self.budget,
            truncated: self.truncated,
        }
    }
}

/// Render a part whose post-processing can shrink it.
///
/// `transform` gets the raw text and whether it was truncated. Collapsing
/// whitespace or dropping an undecided last line can make the transformed
/// text shorter than its input, so with a limited budget the input is
/// rendered with a growing lookahead until the output fills the budget or
/// the input is complete. Reference bookkeeping done by a discarded attempt
/// is rolled back.
pub(crate) fn fill<'a, X>(
    cx: &mut RenderContext<'a, X>,
    budget: Budget,
    mut render: impl FnMut(&mut RenderContext<'a, X>, Budget) -> Result<Rendered>,
    transform: impl Fn(&str, bool) -> String,
) -> Result<Rendered> {
    let Budget::Limited(limit) = budget else {
        let raw = render(cx, Budget::Unbounded)?;
        return Ok(Rendered::clipped(&transform(&raw.text, false), budget));
    };

    let mut lookahead = limit.saturating_add(1);
    loop {
        let snapshot = cx.shadow_snapshot();
        let raw = render(cx, Budget::Limited(lookahead))?;
        let text = transform(&raw.text, raw.truncated);
        if !raw.truncated || text.chars().count() > limit || lookahead == usize::MAX {
            let mut pieces = Pieces::new(budget);
            pieces.push(&text);
            pieces.truncated |= raw.truncated;
            return Ok(pieces.finish());
        }
        cx.restore_shadow(snapshot);
        lookahead = lookahead.saturating_mul(2);
    }
}
