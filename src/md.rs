//! Short factory functions for building documents.
//!
//! Each function returns the concrete node type, so the builder methods of
//! that type stay available:
//!
//! ```
//! use mdscribe::{Node, inlines, md};
//!
//! let doc: Node = md::list(vec![
//!     md::task("write docs").checked(true).into(),
//!     md::task(inlines!["ship ", md::code("v1")]).into(),
//! ])
//! .into();
//!
//! assert_eq!(mdscribe::render(&doc).unwrap(), "\n- [x] write docs\n- [ ] ship `v1`\n");
//! ```

use crate::ir::{
    Block, Blockquote, Code, Codeblock, Definition, Emoji, Emphasis, Footnote, Heading, Hr,
    Inline, IntoInlines, Link, LinkTarget, List, Node, Paragraph, Raw, Section, Table, TableHeader,
    TableRow, Task, Text, Url,
};

/// Plain text run.
pub fn t<X>(content: impl IntoInlines<X>) -> Text<X> {
    Text::new(content.into_inlines())
}

pub fn b<X>(content: impl IntoInlines<X>) -> Text<X> {
    Text::emphasized(Emphasis::Bold, content.into_inlines())
}

pub fn i<X>(content: impl IntoInlines<X>) -> Text<X> {
    Text::emphasized(Emphasis::Italic, content.into_inlines())
}

pub fn s<X>(content: impl IntoInlines<X>) -> Text<X> {
    Text::emphasized(Emphasis::Strikethrough, content.into_inlines())
}

pub fn sub<X>(content: impl IntoInlines<X>) -> Text<X> {
    Text::emphasized(Emphasis::Subscript, content.into_inlines())
}

pub fn sup<X>(content: impl IntoInlines<X>) -> Text<X> {
    Text::emphasized(Emphasis::Superscript, content.into_inlines())
}

pub fn highlight<X>(content: impl IntoInlines<X>) -> Text<X> {
    Text::emphasized(Emphasis::Highlight, content.into_inlines())
}

pub fn p<X>(content: impl IntoInlines<X>) -> Paragraph<X> {
    Paragraph::new(content.into_inlines())
}

/// Heading at the level of its surroundings.
pub fn h<X>(title: impl IntoInlines<X>) -> Heading<X> {
    Heading::new(title.into_inlines())
}

/// Heading at a fixed level.
pub fn h_n<X>(level: usize, title: impl IntoInlines<X>) -> Heading<X> {
    Heading::new(title.into_inlines()).with_level(level)
}

pub fn h1<X>(title: impl IntoInlines<X>) -> Heading<X> {
    h_n(1, title)
}

pub fn h2<X>(title: impl IntoInlines<X>) -> Heading<X> {
    h_n(2, title)
}

pub fn h3<X>(title: impl IntoInlines<X>) -> Heading<X> {
    h_n(3, title)
}

pub fn h4<X>(title: impl IntoInlines<X>) -> Heading<X> {
    h_n(4, title)
}

pub fn h5<X>(title: impl IntoInlines<X>) -> Heading<X> {
    h_n(5, title)
}

pub fn h6<X>(title: impl IntoInlines<X>) -> Heading<X> {
    h_n(6, title)
}

pub fn code(code: impl Into<String>) -> Code {
    Code::new(code)
}

pub fn link<X>(text: impl IntoInlines<X>, href: impl Into<String>) -> Link<X> {
    Link::new(text.into_inlines(), href)
}

/// Reference-style link to a shared [`LinkTarget`].
pub fn link_to<X>(text: impl IntoInlines<X>, target: &LinkTarget) -> Link<X> {
    Link::to_target(text.into_inlines(), target)
}

/// Link to a heading; the heading must have an id when rendered.
pub fn link_to_heading<X: Clone>(text: impl IntoInlines<X>, heading: &Heading<X>) -> Link<X> {
    Link::to_heading(text.into_inlines(), heading)
}

pub fn img<X>(alt: impl Into<String>, src: impl Into<String>) -> Link<X> {
    Link::image(alt, src)
}

pub fn url(href: impl Into<String>) -> Url {
    Url::new(href)
}

pub fn emoji(name: impl Into<String>) -> Emoji {
    Emoji::new(name)
}

pub fn task<X>(content: impl IntoInlines<X>) -> Task<X> {
    Task::new(content.into_inlines())
}

pub fn raw(content: impl Into<String>) -> Raw {
    Raw::new(content)
}

pub fn list<X>(items: Vec<Node<X>>) -> List<X> {
    List::new(items)
}

pub fn ordered<X>(items: Vec<Node<X>>) -> List<X> {
    List::new(items).ordered_from(1)
}

pub fn ordered_from<X>(start: usize, items: Vec<Node<X>>) -> List<X> {
    List::new(items).ordered_from(start)
}

pub fn blockquote<X>(content: Vec<Node<X>>) -> Blockquote<X> {
    Blockquote::new(content)
}

pub fn codeblock(code: impl Into<String>) -> Codeblock {
    Codeblock::new(code)
}

pub fn section<X>(heading: Option<Heading<X>>, children: Vec<Block<X>>) -> Section<X> {
    Section::new(heading, children)
}

pub fn hr() -> Hr {
    Hr
}

pub fn definition<X>(term: impl IntoInlines<X>, description: impl IntoInlines<X>) -> Definition<X> {
    Definition::new(term.into_inlines(), description.into_inlines())
}

pub fn table<X>(headers: Vec<TableHeader<X>>, rows: Vec<TableRow<X>>) -> Table<X> {
    let mut table = Table::new(headers);
    table.rows = rows;
    table
}

pub fn th<X>(content: impl Into<Inline<X>>) -> TableHeader<X> {
    TableHeader::new(content)
}

pub fn tr<X>(cells: Vec<Inline<X>>) -> TableRow<X> {
    TableRow::new(cells)
}

pub fn link_target(href: impl Into<String>) -> LinkTarget {
    LinkTarget::new(href)
}

pub fn footnote<X>(content: Vec<Node<X>>) -> Footnote<X> {
    Footnote::new(content)
}

/// An extension value, rendered by the renderer's [`Extension`](crate::Extension).
pub fn ext<X>(value: X) -> Inline<X> {
    Inline::Ext(value)
}
