//! JSON document descriptions.
//!
//! ```json
//! {
//!   "config": { "bold": "__" },
//!   "link_targets": [{ "name": "home", "href": "https://example.com" }],
//!   "footnotes": [{ "name": "n1", "content": ["A note."] }],
//!   "root": {
//!     "type": "paragraph",
//!     "content": [
//!       "See ",
//!       { "type": "link", "text": ["home"], "target": "home" },
//!       { "type": "footnote_ref", "footnote": "n1" }
//!     ]
//!   }
//! }
//! ```
//!
//! A bare string is literal text. Link targets and footnotes are declared
//! once by name and shared by every node that names them, so they number
//! and validate like targets built in code. A footnote may reference the
//! footnotes declared before it.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config::ConfigOverrides;
use crate::error::{Error, Result};
use crate::ir::{
    Align, Block, Blockquote, Code, Codeblock, Definition, Emoji, Emphasis, Footnote, Heading, Hr,
    Inline, Link, LinkTarget, List, Node, Paragraph, Raw, Section, Table, TableHeader, TableRow,
    Task, Text, Url,
};

/// A parsed document: configuration overrides and the tree to render.
#[derive(Debug, Clone)]
pub struct Document {
    pub overrides: ConfigOverrides,
    pub root: Node,
}

/// Parse a document description from JSON text.
///
/// # Examples
///
/// ```
/// let doc = mdscribe::import::from_json(r#"{ "root": "*literal*" }"#).unwrap();
/// assert_eq!(mdscribe::render(&doc.root).unwrap(), "\\*literal\\*");
/// ```
pub fn from_json(json: &str) -> Result<Document> {
    let raw: RawDocument = serde_json::from_str(json)?;
    raw.resolve()
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    config: ConfigOverrides,
    #[serde(default)]
    link_targets: Vec<RawTarget>,
    #[serde(default)]
    footnotes: Vec<RawFootnote>,
    root: RawNode,
}

#[derive(Deserialize)]
struct RawTarget {
    name: String,
    href: String,
    #[serde(default)]
    title: Option<String>,
}

#[derive(Deserialize)]
struct RawFootnote {
    name: String,
    /// Label printed instead of a number.
    #[serde(default)]
    id: Option<String>,
    content: Vec<RawNode>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNode {
    Str(String),
    Tagged(Tagged),
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
enum RawAlign {
    Left,
    Center,
    Right,
}

#[derive(Deserialize)]
struct RawHeader {
    content: RawNode,
    #[serde(default)]
    align: Option<RawAlign>,
}

#[derive(Deserialize)]
struct RawHeading {
    #[serde(default)]
    level: Option<usize>,
    #[serde(default)]
    id: Option<String>,
    title: Vec<RawNode>,
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Tagged {
    Text {
        content: Vec<RawNode>,
    },
    Bold {
        content: Vec<RawNode>,
    },
    Italic {
        content: Vec<RawNode>,
    },
    Strikethrough {
        content: Vec<RawNode>,
    },
    Subscript {
        content: Vec<RawNode>,
    },
    Superscript {
        content: Vec<RawNode>,
    },
    Highlight {
        content: Vec<RawNode>,
    },
    Code {
        code: String,
    },
    Link {
        text: Vec<RawNode>,
        #[serde(default)]
        href: Option<String>,
        #[serde(default)]
        title: Option<String>,
        /// Name of a declared link target.
        #[serde(default)]
        target: Option<String>,
    },
    Image {
        alt: String,
        src: String,
        #[serde(default)]
        title: Option<String>,
    },
    Url {
        href: String,
    },
    Emoji {
        name: String,
    },
    FootnoteRef {
        footnote: String,
    },
    Task {
        #[serde(default)]
        checked: bool,
        content: Vec<RawNode>,
    },
    Raw {
        content: String,
    },
    Paragraph {
        content: Vec<RawNode>,
    },
    Heading(RawHeading),
    List {
        #[serde(default)]
        ordered: bool,
        #[serde(default)]
        start: Option<usize>,
        items: Vec<RawNode>,
    },
    Table {
        headers: Vec<RawHeader>,
        #[serde(default)]
        rows: Vec<Vec<RawNode>>,
    },
    Blockquote {
        content: Vec<RawNode>,
    },
    Codeblock {
        code: String,
        #[serde(default)]
        language: Option<String>,
    },
    Section {
        #[serde(default)]
        heading: Option<RawHeading>,
        #[serde(default)]
        children: Vec<RawNode>,
    },
    Hr,
    Definition {
        term: Vec<RawNode>,
        descriptions: Vec<Vec<RawNode>>,
    },
    /// Places a declared link target's definition.
    LinkTarget {
        name: String,
    },
    /// Places a declared footnote's definition.
    Footnote {
        name: String,
    },
}

impl RawDocument {
    fn resolve(self) -> Result<Document> {
        let mut names = Names::default();
        for target in self.link_targets {
            let mut link_target = LinkTarget::new(target.href);
            if let Some(title) = target.title {
                link_target = link_target.with_title(title);
            }
            if names.targets.insert(target.name.clone(), link_target).is_some() {
                return Err(Error::Import(format!("link target `{}` declared twice", target.name)));
            }
        }
        for footnote in self.footnotes {
            let content = footnote
                .content
                .into_iter()
                .map(|node| names.node(node))
                .collect::<Result<Vec<_>>>()?;
            let mut built = Footnote::new(content);
            if let Some(id) = footnote.id {
                built = built.with_id(id);
            }
            if names.footnotes.insert(footnote.name.clone(), built).is_some() {
                return Err(Error::Import(format!("footnote `{}` declared twice", footnote.name)));
            }
        }
        Ok(Document {
            overrides: self.config,
            root: names.node(self.root)?,
        })
    }
}

/// Declared link targets and footnotes by name.
#[derive(Default)]
struct Names {
    targets: HashMap<String, LinkTarget>,
    footnotes: HashMap<String, Footnote>,
}

impl Names {
    fn target(&self, name: &str) -> Result<&LinkTarget> {
        self.targets
            .get(name)
            .ok_or_else(|| Error::Import(format!("unknown link target `{name}`")))
    }

    fn footnote(&self, name: &str) -> Result<&Footnote> {
        self.footnotes
            .get(name)
            .ok_or_else(|| Error::Import(format!("unknown footnote `{name}`")))
    }

    fn nodes(&self, raw: Vec<RawNode>) -> Result<Vec<Node>> {
        raw.into_iter().map(|node| self.node(node)).collect()
    }

    fn inlines(&self, raw: Vec<RawNode>) -> Result<Vec<Inline>> {
        raw.into_iter().map(|node| self.inline(node)).collect()
    }

    fn inline(&self, raw: RawNode) -> Result<Inline> {
        match self.node(raw)? {
            Node::Inline(inline) => Ok(inline),
            Node::Block(block) => Err(Error::Import(format!(
                "{} cannot appear in inline content",
                block_name(&block)
            ))),
        }
    }

    fn block(&self, raw: RawNode) -> Result<Block> {
        match self.node(raw)? {
            Node::Block(block) => Ok(block),
            Node::Inline(Inline::Raw(raw)) => Ok(Block::Raw(raw)),
            Node::Inline(_) => Err(Error::Import(
                "inline content cannot appear among section children; wrap it in a paragraph".into(),
            )),
        }
    }

    fn heading(&self, raw: RawHeading) -> Result<Heading> {
        let mut heading = Heading::new(self.inlines(raw.title)?);
        if let Some(level) = raw.level {
            heading = heading.with_level(level);
        }
        if let Some(id) = raw.id {
            heading = heading.with_id(id);
        }
        Ok(heading)
    }

    fn node(&self, raw: RawNode) -> Result<Node> {
        let tagged = match raw {
            RawNode::Str(text) => return Ok(Node::from(text)),
            RawNode::Tagged(tagged) => tagged,
        };
        let emphasized = |emphasis: Emphasis, content: Vec<RawNode>| -> Result<Node> {
            Ok(Text::emphasized(emphasis, self.inlines(content)?).into())
        };

        Ok(match tagged {
            Tagged::Text { content } => Text::new(self.inlines(content)?).into(),
            Tagged::Bold { content } => emphasized(Emphasis::Bold, content)?,
            Tagged::Italic { content } => emphasized(Emphasis::Italic, content)?,
            Tagged::Strikethrough { content } => emphasized(Emphasis::Strikethrough, content)?,
            Tagged::Subscript { content } => emphasized(Emphasis::Subscript, content)?,
            Tagged::Superscript { content } => emphasized(Emphasis::Superscript, content)?,
            Tagged::Highlight { content } => emphasized(Emphasis::Highlight, content)?,
            Tagged::Code { code } => Code::new(code).into(),
            Tagged::Link {
                text,
                href,
                title,
                target,
            } => {
                let text = self.inlines(text)?;
                match (href, target) {
                    (Some(href), None) => {
                        let link = Link::new(text, href);
                        let link = match title {
                            Some(title) => link.with_title(title),
                            None => link,
                        };
                        link.into()
                    }
                    (None, Some(name)) => Link::to_target(text, self.target(&name)?).into(),
                    _ => {
                        return Err(Error::Import(
                            "a link needs exactly one of `href` and `target`".into(),
                        ));
                    }
                }
            }
            Tagged::Image { alt, src, title } => {
                let image = Link::image(alt, src);
                let image = match title {
                    Some(title) => image.with_title(title),
                    None => image,
                };
                image.into()
            }
            Tagged::Url { href } => Url::new(href).into(),
            Tagged::Emoji { name } => Emoji::new(name).into(),
            Tagged::FootnoteRef { footnote } => self.footnote(&footnote)?.reference().into(),
            Tagged::Task { checked, content } => Task::new(self.inlines(content)?).checked(checked).into(),
            Tagged::Raw { content } => Raw::new(content).into(),
            Tagged::Paragraph { content } => Paragraph::new(self.inlines(content)?).into(),
            Tagged::Heading(heading) => self.heading(heading)?.into(),
            Tagged::List {
                ordered,
                start,
                items,
            } => {
                let list = List::new(self.nodes(items)?);
                let list = match (ordered, start) {
                    (_, Some(start)) => list.ordered_from(start),
                    (true, None) => list.ordered_from(1),
                    (false, None) => list,
                };
                list.into()
            }
            Tagged::Table { headers, rows } => {
                let mut table = Table::new(
                    headers
                        .into_iter()
                        .map(|header| {
                            let cell = TableHeader::new(self.inline(header.content)?);
                            Ok(match header.align {
                                Some(RawAlign::Left) => cell.with_align(Align::Left),
                                Some(RawAlign::Center) => cell.with_align(Align::Center),
                                Some(RawAlign::Right) => cell.with_align(Align::Right),
                                None => cell,
                            })
                        })
                        .collect::<Result<Vec<_>>>()?,
                );
                for row in rows {
                    table = table.push(TableRow::new(self.inlines(row)?));
                }
                table.into()
            }
            Tagged::Blockquote { content } => Blockquote::new(self.nodes(content)?).into(),
            Tagged::Codeblock { code, language } => {
                let codeblock = Codeblock::new(code);
                let codeblock = match language {
                    Some(language) => codeblock.with_language(language),
                    None => codeblock,
                };
                codeblock.into()
            }
            Tagged::Section { heading, children } => {
                let heading = heading.map(|heading| self.heading(heading)).transpose()?;
                let children = children
                    .into_iter()
                    .map(|child| self.block(child))
                    .collect::<Result<Vec<_>>>()?;
                Section::new(heading, children).into()
            }
            Tagged::Hr => Hr.into(),
            Tagged::Definition { term, descriptions } => {
                let mut descriptions = descriptions.into_iter();
                let first = descriptions.next().unwrap_or_default();
                let mut definition = Definition::new(self.inlines(term)?, self.inlines(first)?);
                for description in descriptions {
                    definition = definition.describe(self.inlines(description)?);
                }
                definition.into()
            }
            Tagged::LinkTarget { name } => self.target(&name)?.clone().into(),
            Tagged::Footnote { name } => self.footnote(&name)?.clone().into(),
        })
    }
}

fn block_name(block: &Block) -> &'static str {
    match block {
        Block::Paragraph(_) => "a paragraph",
        Block::Heading(_) => "a heading",
        Block::List(_) => "a list",
        Block::Table(_) => "a table",
        Block::Blockquote(_) => "a blockquote",
        Block::Codeblock(_) => "a code block",
        Block::Section(_) => "a section",
        Block::Hr(_) => "a horizontal rule",
        Block::Definition(_) => "a definition",
        Block::LinkTarget(_) => "a link target",
        Block::Footnote(_) => "a footnote",
        Block::Raw(_) => "raw content",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_footnote_identity() {
        let doc = from_json(
            r#"{
                "footnotes": [{ "name": "n", "content": ["note"] }],
                "root": { "type": "paragraph", "content": [
                    { "type": "footnote_ref", "footnote": "n" },
                    { "type": "footnote_ref", "footnote": "n" }
                ] }
            }"#,
        )
        .unwrap();
        let Node::Block(Block::Paragraph(paragraph)) = &doc.root else {
            panic!("expected a paragraph");
        };
        let [Inline::FootnoteRef(a), Inline::FootnoteRef(b)] = paragraph.content.as_slice() else {
            panic!("expected two footnote references");
        };
        assert_eq!(a.footnote().id(), b.footnote().id());
    }

    #[test]
    fn test_unknown_target() {
        let err = from_json(
            r#"{ "root": { "type": "link", "text": ["x"], "target": "nope" } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Import(message) if message.contains("nope")));
    }

    #[test]
    fn test_block_in_inline_position() {
        let err = from_json(
            r#"{ "root": { "type": "paragraph", "content": [{ "type": "hr" }] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Import(message) if message.contains("horizontal rule")));
    }
}
