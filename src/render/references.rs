//! Link target and footnote bookkeeping.
//!
//! The [`RefBook`] assigns each target a label the first time it is seen,
//! either as a use or as a definition, and counts uses and emitted
//! definitions. After the main render, definitions that were referenced but
//! never placed are appended, and the counts are checked:
//!
//! - referenced but never emitted: missing
//! - emitted but never referenced: not used (strict only)
//! - emitted more than once: duplicated (strict only)

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::config::{CheckReferences, Config};
use crate::error::{Error, ReferenceError, ReferenceErrorKind, Result};
use crate::ir::{Footnote, LinkTarget, RefId};
use crate::markdown::{UrlBracket, escape_title, escape_url, indent_lines};

use super::RenderContext;
use super::block::render_parts;
use super::budget::{Budget, Pieces, Rendered, fill};

/// Longest preview used in reference error messages.
const DESCRIBE_LIMIT: usize = 160;

/// A definition tracked by the book.
pub(crate) enum RefNode<X> {
    Link(LinkTarget),
    Footnote(Footnote<X>),
}

impl<X> RefNode<X> {
    fn id(&self) -> RefId {
        match self {
            RefNode::Link(target) => target.id(),
            RefNode::Footnote(footnote) => footnote.id(),
        }
    }
}

impl<X> Clone for RefNode<X> {
    fn clone(&self) -> Self {
        match self {
            RefNode::Link(target) => RefNode::Link(target.clone()),
            RefNode::Footnote(footnote) => RefNode::Footnote(footnote.clone()),
        }
    }
}

pub(crate) struct RefEntry<X> {
    node: RefNode<X>,
    label: String,
    referenced: usize,
    included: usize,
}

impl<X> Clone for RefEntry<X> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            label: self.label.clone(),
            referenced: self.referenced,
            included: self.included,
        }
    }
}

/// Whether rendering a definition counts as placing it in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Emit {
    Include,
    /// Render for an error message only.
    Describe,
}

/// Labels and counters for every link target and footnote seen in a render.
pub(crate) struct RefBook<X> {
    entries: Vec<RefEntry<X>>,
    index: HashMap<RefId, usize>,
    next_link: usize,
    next_footnote: usize,
}

impl<X> Clone for RefBook<X> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            index: self.index.clone(),
            next_link: self.next_link,
            next_footnote: self.next_footnote,
        }
    }
}

impl<X> RefBook<X> {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            next_link: config.link_number_start,
            next_footnote: config.footnote_number_start,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn entry(&mut self, id: RefId, node: impl FnOnce() -> RefNode<X>) -> &mut RefEntry<X> {
        let index = match self.index.get(&id) {
            Some(&index) => index,
            None => {
                let node = node();
                let label = match &node {
                    RefNode::Link(_) => {
                        self.next_link += 1;
                        (self.next_link - 1).to_string()
                    }
                    RefNode::Footnote(footnote) => match footnote.label() {
                        Some(label) => label.to_string(),
                        None => {
                            self.next_footnote += 1;
                            (self.next_footnote - 1).to_string()
                        }
                    },
                };
                self.entries.push(RefEntry {
                    node,
                    label,
                    referenced: 0,
                    included: 0,
                });
                self.index.insert(id, self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[index]
    }

    /// Record a use and return the label to print.
    pub(crate) fn refer(&mut self, id: RefId, node: impl FnOnce() -> RefNode<X>) -> String {
        let entry = self.entry(id, node);
        entry.referenced += 1;
        entry.label.clone()
    }

    /// Record an emitted definition; `None` means it was already emitted
    /// and `dedup` suppresses it.
    fn include(&mut self, id: RefId, node: impl FnOnce() -> RefNode<X>, dedup: bool) -> Option<String> {
        let entry = self.entry(id, node);
        if dedup && entry.included > 0 {
            return None;
        }
        entry.included += 1;
        Some(entry.label.clone())
    }

    fn label(&mut self, id: RefId, node: impl FnOnce() -> RefNode<X>) -> String {
        self.entry(id, node).label.clone()
    }
}

/// Label for a definition, or `None` when it renders as nothing.
fn definition_label<X>(
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
    emit: Emit,
    id: RefId,
    node: impl FnOnce() -> RefNode<X>,
) -> Option<String> {
    let dedup = cx.config.dedup_references;
    let book = cx.book(budget);
    match emit {
        Emit::Include => book.include(id, node, dedup),
        Emit::Describe => Some(book.label(id, node)),
    }
}

pub(crate) fn render_link_target<X>(
    target: &LinkTarget,
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
    emit: Emit,
) -> Result<Rendered> {
    let Some(label) = definition_label(cx, budget, emit, target.id(), || RefNode::Link(target.clone()))
    else {
        return Ok(Rendered::empty(budget));
    };
    let config = cx.config;

    let mut pieces = Pieces::new(budget);
    pieces.push("\n[");
    pieces.push(&label);
    pieces.push("]: <");
    pieces.push(&escape_url(&target.href, config.url_escape, UrlBracket::Angle));
    pieces.push(">");
    if let Some(title) = &target.title {
        pieces.push(" \"");
        pieces.push(&escape_title(title, config.escape));
        pieces.push("\"");
    }
    pieces.push("\n");
    Ok(pieces.finish())
}

/// Fail on an explicit id that would break the `[^...]` syntax.
pub(crate) fn check_footnote_id<X>(footnote: &Footnote<X>) -> Result<()> {
    match footnote.label() {
        Some(id) if id.is_empty() || id.chars().any(|c| c.is_whitespace() || matches!(c, '[' | ']' | '\\')) => {
            Err(Error::InvalidFootnoteId { id: id.to_string() })
        }
        _ => Ok(()),
    }
}

pub(crate) fn render_footnote<X>(
    footnote: &Footnote<X>,
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
    emit: Emit,
) -> Result<Rendered> {
    check_footnote_id(footnote)?;
    let Some(label) = definition_label(cx, budget, emit, footnote.id(), || {
        RefNode::Footnote(footnote.clone())
    }) else {
        return Ok(Rendered::empty(budget));
    };
    let config = cx.config;
    let indent: &str = &config.footnote_indent;

    let mut pieces = Pieces::new(budget);
    pieces.push("\n[^");
    pieces.push(&label);
    pieces.push("]: ");
    pieces.push_with(|budget| {
        fill(
            cx,
            budget,
            |cx, budget| render_parts(footnote.content(), cx, budget),
            |text, _| indent_lines(text.strip_prefix('\n').unwrap_or(text), indent),
        )
    })?;
    Ok(pieces.finish())
}

fn render_ref_node<X>(
    node: &RefNode<X>,
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
    emit: Emit,
) -> Result<Rendered> {
    match node {
        RefNode::Link(target) => render_link_target(target, cx, budget, emit),
        RefNode::Footnote(footnote) => render_footnote(footnote, cx, budget, emit),
    }
}

/// A short, single-line preview of something rendered with `render`.
pub(crate) fn describe<'a, X>(
    cx: &mut RenderContext<'a, X>,
    render: impl FnOnce(&mut RenderContext<'a, X>, Budget) -> Result<Rendered>,
) -> Result<String> {
    let rendered = cx.peek(|cx| render(cx, Budget::Limited(DESCRIBE_LIMIT + 1)))?;
    let text = rendered.text.trim();
    if text.chars().count() >= DESCRIBE_LIMIT {
        let mut preview: String = text.chars().take(DESCRIBE_LIMIT - 1).collect();
        preview.push('…');
        Ok(preview)
    } else {
        Ok(text.to_string())
    }
}

/// Render every definition that was referenced but never placed, in the
/// order the targets were first seen.
pub(crate) fn append_pending<X>(cx: &mut RenderContext<'_, X>) -> Result<String> {
    let mut out = String::new();
    let mut index = 0;
    // Appending can reference further targets, so the length is re-read.
    while index < cx.refs.len() {
        let entry = &cx.refs.entries[index];
        if entry.referenced > 0 && entry.included == 0 {
            trace!(label = %entry.label, "appending unplaced definition");
            let node = entry.node.clone();
            out.push_str(&render_ref_node(&node, cx, Budget::Unbounded, Emit::Include)?.text);
        }
        index += 1;
    }
    Ok(out)
}

/// Check use and emission counts of every tracked definition.
pub(crate) fn validate<X>(cx: &mut RenderContext<'_, X>) -> Result<Vec<ReferenceError>> {
    let strict = match cx.config.check_references {
        CheckReferences::Off => return Ok(Vec::new()),
        CheckReferences::Missing => false,
        CheckReferences::Strict => true,
    };

    let findings: Vec<(ReferenceErrorKind, RefNode<X>)> = cx
        .refs
        .entries
        .iter()
        .filter_map(|entry| {
            let footnote = matches!(entry.node, RefNode::Footnote(_));
            let kind = if entry.referenced > 0 && entry.included == 0 {
                if footnote {
                    ReferenceErrorKind::FootnoteMissing
                } else {
                    ReferenceErrorKind::LinkReferenceMissing
                }
            } else if strict && entry.included > 0 && entry.referenced == 0 {
                if footnote {
                    ReferenceErrorKind::FootnoteNotUsed
                } else {
                    ReferenceErrorKind::LinkReferenceNotUsed
                }
            } else if strict && entry.included > 1 {
                if footnote {
                    ReferenceErrorKind::FootnoteDuplicate
                } else {
                    ReferenceErrorKind::LinkReferenceDuplicate
                }
            } else {
                return None;
            };
            Some((kind, entry.node.clone()))
        })
        .collect();

    if !findings.is_empty() {
        debug!(count = findings.len(), "reference validation failed");
    }

    findings
        .into_iter()
        .map(|(kind, node)| {
            let preview = describe(cx, |cx, budget| render_ref_node(&node, cx, budget, Emit::Describe))?;
            Ok(ReferenceError::new(kind, &preview, node.id()))
        })
        .collect()
}
