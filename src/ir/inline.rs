//! Inline node types.

use std::convert::Infallible;

use super::{Heading, Inline, LinkTarget};

/// Emphasis styles for [`Text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    Bold,
    Italic,
    Strikethrough,
    Subscript,
    Superscript,
    Highlight,
}

/// A run of inline content, optionally emphasized.
#[derive(Debug, Clone, PartialEq)]
pub struct Text<X = Infallible> {
    pub emphasis: Option<Emphasis>,
    pub content: Vec<Inline<X>>,
}

impl<X> Text<X> {
    pub fn new(content: Vec<Inline<X>>) -> Self {
        Self {
            emphasis: None,
            content,
        }
    }

    pub fn emphasized(emphasis: Emphasis, content: Vec<Inline<X>>) -> Self {
        Self {
            emphasis: Some(emphasis),
            content,
        }
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

impl<X> Extend<Inline<X>> for Text<X> {
    fn extend<I: IntoIterator<Item = Inline<X>>>(&mut self, iter: I) {
        self.content.extend(iter);
    }
}

/// Inline code span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub code: String,
}

impl Code {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }

    pub fn concat(mut self, more: &str) -> Self {
        self.code.push_str(more);
        self
    }
}

/// Where a [`Link`] points.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination<X = Infallible> {
    Url { href: String, title: Option<String> },
    /// Reference-style link, numbered while rendering.
    Target(LinkTarget),
    /// In-document link to a heading; the heading needs an id.
    Heading(Box<Heading<X>>),
}

/// A link or an image.
#[derive(Debug, Clone, PartialEq)]
pub struct Link<X = Infallible> {
    pub text: Vec<Inline<X>>,
    pub destination: Destination<X>,
    pub image: bool,
}

impl<X> Link<X> {
    pub fn new(text: Vec<Inline<X>>, href: impl Into<String>) -> Self {
        Self {
            text,
            destination: Destination::Url {
                href: href.into(),
                title: None,
            },
            image: false,
        }
    }

    pub fn to_target(text: Vec<Inline<X>>, target: &LinkTarget) -> Self {
        Self {
            text,
            destination: Destination::Target(target.clone()),
            image: false,
        }
    }

    pub fn to_heading(text: Vec<Inline<X>>, heading: &Heading<X>) -> Self
    where
        X: Clone,
    {
        Self {
            text,
            destination: Destination::Heading(Box::new(heading.clone())),
            image: false,
        }
    }

    pub fn image(alt: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            text: vec![Inline::Str(alt.into())],
            destination: Destination::Url {
                href: src.into(),
                title: None,
            },
            image: true,
        }
    }

    /// Set the title of a URL destination; other destinations are unchanged.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        if let Destination::Url { title: slot, .. } = &mut self.destination {
            *slot = Some(title.into());
        }
        self
    }
}

/// An autolink (`<url>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    pub href: String,
}

impl Url {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }
}

/// An emoji shortcode, written as `:name:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji {
    pub name: String,
}

impl Emoji {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Task list item text with its checkbox.
#[derive(Debug, Clone, PartialEq)]
pub struct Task<X = Infallible> {
    pub checked: bool,
    pub content: Vec<Inline<X>>,
}

impl<X> Task<X> {
    pub fn new(content: Vec<Inline<X>>) -> Self {
        Self {
            checked: false,
            content,
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn push(mut self, item: impl Into<Inline<X>>) -> Self {
        self.content.push(item.into());
        self
    }
}

/// Pre-formatted markdown, emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw {
    pub content: String,
}

impl Raw {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn concat(mut self, more: &str) -> Self {
        self.content.push_str(more);
        self
    }
}
