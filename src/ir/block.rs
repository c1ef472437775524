//! Block node types.

use std::convert::Infallible;

use super::{Block, Inline, Node};

#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph<X = Infallible> {
    pub content: Vec<Inline<X>>,
}

impl<X> Paragraph<X> {
    pub fn new(content: Vec<Inline<X>>) -> Self {
        Self { content }
    }

    pub fn push(mut self, item: impl Into<Inline<X>>) -> Self {
        self.content.push(item.into());
        self
    }

    pub fn concat(mut self, items: impl IntoIterator<Item = Inline<X>>) -> Self {
        self.content.extend(items);
        self
    }
}

/// A heading.
///
/// Without an explicit level the heading takes the level of its position:
/// the configured root level, one deeper inside each enclosing section.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading<X = Infallible> {
    pub level: Option<usize>,
    pub title: Vec<Inline<X>>,
    /// Anchor id, rendered as `{#id}` and targeted by heading links.
    pub id: Option<String>,
}

impl<X> Heading<X> {
    pub fn new(title: Vec<Inline<X>>) -> Self {
        Self {
            level: None,
            title,
            id: None,
        }
    }

    pub fn with_level(mut self, level: usize) -> Self {
        self.level = Some(level.max(1));
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn push(mut self, item: impl Into<Inline<X>>) -> Self {
        self.title.push(item.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListKind {
    #[default]
    Bullet,
    Ordered {
        start: usize,
    },
}

/// A bullet or ordered list.
///
/// Inline items become list entries; block items (nested lists,
/// paragraphs) attach to the entry before them.
#[derive(Debug, Clone, PartialEq)]
pub struct List<X = Infallible> {
    pub kind: ListKind,
    pub items: Vec<Node<X>>,
}

impl<X> List<X> {
    pub fn new(items: Vec<Node<X>>) -> Self {
        Self {
            kind: ListKind::Bullet,
            items,
        }
    }

    pub fn ordered_from(mut self, start: usize) -> Self {
        self.kind = ListKind::Ordered { start };
        self
    }

    pub fn push(mut self, item: impl Into<Node<X>>) -> Self {
        self.items.push(item.into());
        self
    }
}

impl<X> Extend<Node<X>> for List<X> {
    fn extend<I: IntoIterator<Item = Node<X>>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableHeader<X = Infallible> {
    pub content: Inline<X>,
    pub align: Option<Align>,
}

impl<X> TableHeader<X> {
    pub fn new(content: impl Into<Inline<X>>) -> Self {
        Self {
            content: content.into(),
            align: None,
        }
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow<X = Infallible> {
    pub cells: Vec<Inline<X>>,
}

impl<X> TableRow<X> {
    pub fn new(cells: Vec<Inline<X>>) -> Self {
        Self { cells }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table<X = Infallible> {
    pub headers: Vec<TableHeader<X>>,
    pub rows: Vec<TableRow<X>>,
}

impl<X> Table<X> {
    pub fn new(headers: Vec<TableHeader<X>>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(mut self, row: TableRow<X>) -> Self {
        self.rows.push(row);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blockquote<X = Infallible> {
    pub content: Vec<Node<X>>,
}

impl<X> Blockquote<X> {
    pub fn new(content: Vec<Node<X>>) -> Self {
        Self { content }
    }

    pub fn push(mut self, item: impl Into<Node<X>>) -> Self {
        self.content.push(item.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codeblock {
    pub code: String,
    pub language: Option<String>,
}

impl Codeblock {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn concat(mut self, more: &str) -> Self {
        self.code.push_str(more);
        self
    }
}

/// A heading with the blocks that belong to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Section<X = Infallible> {
    pub heading: Option<Heading<X>>,
    pub children: Vec<Block<X>>,
}

impl<X> Section<X> {
    pub fn new(heading: Option<Heading<X>>, children: Vec<Block<X>>) -> Self {
        Self { heading, children }
    }

    pub fn push(mut self, child: impl Into<Block<X>>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl<X> Extend<Block<X>> for Section<X> {
    fn extend<I: IntoIterator<Item = Block<X>>>(&mut self, iter: I) {
        self.children.extend(iter);
    }
}

/// Horizontal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Hr;

/// A definition list entry: a term followed by one or more descriptions.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition<X = Infallible> {
    pub term: Vec<Inline<X>>,
    pub descriptions: Vec<Vec<Inline<X>>>,
}

impl<X> Definition<X> {
    pub fn new(term: Vec<Inline<X>>, description: Vec<Inline<X>>) -> Self {
        Self {
            term,
            descriptions: vec![description],
        }
    }

    pub fn describe(mut self, description: Vec<Inline<X>>) -> Self {
        self.descriptions.push(description);
        self
    }
}
