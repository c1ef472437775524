//! Document tree for markdown generation.
//!
//! The tree is built from two sum types:
//! - [`Inline`]: text-level content (text runs, emphasis, code, links,
//!   footnote references, extension values)
//! - [`Block`]: line-level content (paragraphs, headings, lists, tables,
//!   quotes, code blocks, sections, link/footnote definitions)
//!
//! [`Node`] holds either and is what mixed containers and the renderer
//! accept. Placing a block where only inline content fits is a type error.
//!
//! # Example
//!
//! ```
//! use mdscribe::ir::{Block, Heading, Paragraph, Section};
//! use mdscribe::inlines;
//!
//! let section: Section = Section::new(
//!     Some(Heading::new(inlines!["Intro"])),
//!     vec![Block::from(Paragraph::new(inlines!["Hello"]))],
//! );
//! assert_eq!(section.children.len(), 1);
//! ```

mod block;
mod inline;
mod links;
mod node;

pub use block::{
    Align, Blockquote, Codeblock, Definition, Heading, Hr, List, ListKind, Paragraph, Section,
    Table, TableHeader, TableRow,
};
pub use inline::{Code, Destination, Emoji, Emphasis, Link, Raw, Task, Text, Url};
pub use links::{Footnote, FootnoteRef, LinkTarget, RefId};
pub use node::{Block, Inline, Node};

/// Conversion into a run of inline content.
///
/// Lets builders take a plain string, a single item or a prepared run.
pub trait IntoInlines<X> {
    fn into_inlines(self) -> Vec<Inline<X>>;
}

impl<X> IntoInlines<X> for Vec<Inline<X>> {
    fn into_inlines(self) -> Vec<Inline<X>> {
        self
    }
}

impl<X, const N: usize> IntoInlines<X> for [Inline<X>; N] {
    fn into_inlines(self) -> Vec<Inline<X>> {
        self.into()
    }
}

impl<X> IntoInlines<X> for Inline<X> {
    fn into_inlines(self) -> Vec<Inline<X>> {
        vec![self]
    }
}

impl<X> IntoInlines<X> for &str {
    fn into_inlines(self) -> Vec<Inline<X>> {
        vec![Inline::from(self)]
    }
}

impl<X> IntoInlines<X> for String {
    fn into_inlines(self) -> Vec<Inline<X>> {
        vec![Inline::Str(self)]
    }
}
