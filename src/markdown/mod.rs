//! Pure markdown escaping.
//!
//! Everything here is a plain string transformation with no knowledge of the
//! node tree:
//!
//! - `escape`: inline text, link destination and title escaping, plus
//!   fence/mark calculation for code
//! - `lines`: the line-start pass that runs over assembled paragraphs
//! - `emoji`: colon rules that keep text from turning into emoji
//!
//! ## Design Notes
//!
//! Escaping happens in two passes. Inline escaping runs on every literal
//! string as it is rendered and handles characters whose meaning does not
//! depend on their position (`*`, `[`, `` ` `` and friends). Constructs that
//! only exist at the start of a line (`#`, `>`, `- `, `1. `, setext
//! underlines, table separators) cannot be judged until the surrounding
//! paragraph is assembled, so [`escape_lines`] handles them afterwards.

mod emoji;
mod escape;
mod lines;

pub use escape::{
    TextEscape, UrlBracket, escape_text, escape_title, escape_url, fence_for, inline_code_mark,
};
pub use lines::escape_lines;
pub(crate) use lines::{indent_lines, prefix_lines};
