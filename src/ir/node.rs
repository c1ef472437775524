//! The node sum types and conversions between them.

use std::convert::Infallible;

use super::{
    Blockquote, Code, Codeblock, Definition, Emoji, Footnote, FootnoteRef, Heading, Hr, Link,
    LinkTarget, List, Paragraph, Raw, Section, Table, Task, Text, Url,
};

/// One item of inline content.
///
/// `X` is the type of opaque extension values; they are rendered by the
/// [`Extension`](crate::Extension) installed on the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline<X = Infallible> {
    /// Literal text, escaped on output.
    Str(String),
    Text(Text<X>),
    Code(Code),
    Link(Link<X>),
    Url(Url),
    Emoji(Emoji),
    FootnoteRef(FootnoteRef<X>),
    Task(Task<X>),
    Raw(Raw),
    Ext(X),
}

/// A block of content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block<X = Infallible> {
    Paragraph(Paragraph<X>),
    Heading(Heading<X>),
    List(List<X>),
    Table(Table<X>),
    Blockquote(Blockquote<X>),
    Codeblock(Codeblock),
    Section(Section<X>),
    Hr(Hr),
    Definition(Definition<X>),
    LinkTarget(LinkTarget),
    Footnote(Footnote<X>),
    Raw(Raw),
}

/// Either kind of content, for containers that accept both.
///
/// Consecutive inline nodes in such a container are laid out together as
/// one paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<X = Infallible> {
    Inline(Inline<X>),
    Block(Block<X>),
}

impl<X> Node<X> {
    pub fn is_inline(&self) -> bool {
        matches!(self, Node::Inline(_))
    }
}

impl<X> From<&str> for Inline<X> {
    fn from(text: &str) -> Self {
        Inline::Str(text.to_string())
    }
}

impl<X> From<String> for Inline<X> {
    fn from(text: String) -> Self {
        Inline::Str(text)
    }
}

macro_rules! inline_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl<X> From<$ty> for Inline<X> {
                fn from(node: $ty) -> Self {
                    Inline::$variant(node)
                }
            }

            impl<X> From<$ty> for Node<X> {
                fn from(node: $ty) -> Self {
                    Node::Inline(Inline::$variant(node))
                }
            }
        )*
    };
}

macro_rules! block_from {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl<X> From<$ty> for Block<X> {
                fn from(node: $ty) -> Self {
                    Block::$variant(node)
                }
            }

            impl<X> From<$ty> for Node<X> {
                fn from(node: $ty) -> Self {
                    Node::Block(Block::$variant(node))
                }
            }
        )*
    };
}

inline_from!(
    Text(Text<X>),
    Code(Code),
    Link(Link<X>),
    Url(Url),
    Emoji(Emoji),
    FootnoteRef(FootnoteRef<X>),
    Task(Task<X>),
);

block_from!(
    Paragraph(Paragraph<X>),
    Heading(Heading<X>),
    List(List<X>),
    Table(Table<X>),
    Blockquote(Blockquote<X>),
    Codeblock(Codeblock),
    Section(Section<X>),
    Hr(Hr),
    Definition(Definition<X>),
    LinkTarget(LinkTarget),
    Footnote(Footnote<X>),
);

impl<X> From<Raw> for Inline<X> {
    fn from(raw: Raw) -> Self {
        Inline::Raw(raw)
    }
}

impl<X> From<Raw> for Block<X> {
    fn from(raw: Raw) -> Self {
        Block::Raw(raw)
    }
}

/// Raw content joins the surrounding inline run.
impl<X> From<Raw> for Node<X> {
    fn from(raw: Raw) -> Self {
        Node::Inline(Inline::Raw(raw))
    }
}

impl<X> From<Inline<X>> for Node<X> {
    fn from(inline: Inline<X>) -> Self {
        Node::Inline(inline)
    }
}

impl<X> From<Block<X>> for Node<X> {
    fn from(block: Block<X>) -> Self {
        Node::Block(block)
    }
}

impl<X> From<&str> for Node<X> {
    fn from(text: &str) -> Self {
        Node::Inline(Inline::from(text))
    }
}

impl<X> From<String> for Node<X> {
    fn from(text: String) -> Self {
        Node::Inline(Inline::Str(text))
    }
}

/// Build a `Vec<Inline<_>>` from heterogeneous items.
///
/// ```
/// use mdscribe::{inlines, md};
///
/// let run: Vec<mdscribe::Inline> = inlines!["plain ", md::b(inlines!["bold"])];
/// assert_eq!(run.len(), 2);
/// ```
#[macro_export]
macro_rules! inlines {
    ($($item:expr),* $(,)?) => {
        vec![$($crate::Inline::from($item)),*]
    };
}

/// Build a `Vec<Node<_>>` from heterogeneous items.
#[macro_export]
macro_rules! nodes {
    ($($item:expr),* $(,)?) => {
        vec![$($crate::Node::from($item)),*]
    };
}

/// Build a `Vec<Block<_>>` from heterogeneous items.
#[macro_export]
macro_rules! blocks {
    ($($item:expr),* $(,)?) => {
        vec![$($crate::Block::from($item)),*]
    };
}
