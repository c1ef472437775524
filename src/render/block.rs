//! Block content rendering.
//!
//! Every block starts with `\n` and ends with `\n`, so consecutive blocks
//! are separated by one blank line.

use std::borrow::Borrow;

use crate::config::CodeblockStyle;
use crate::error::Result;
use crate::ir::{Block, Codeblock, Definition, Heading, Inline, List, ListKind, Node, Section};
use crate::markdown::{escape_text, fence_for, indent_lines, prefix_lines};

use super::budget::{Budget, Pieces, Rendered, fill};
use super::inline::{render_inline, render_run};
use super::references::{Emit, render_footnote, render_link_target};
use super::table::render_table;
use super::{RenderContext, Scope};

/// Indentation of list item continuation lines and nested blocks.
const LIST_INDENT: &str = "    ";

pub(crate) fn render_block<X>(
    block: &Block<X>,
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
) -> Result<Rendered> {
    match block {
        Block::Paragraph(paragraph) => render_paragraph(&paragraph.content, cx, budget),
        Block::Heading(heading) => render_heading(heading, cx, budget),
        Block::List(list) => render_list(list, cx, budget),
        Block::Table(table) => render_table(table, cx, budget),
        Block::Blockquote(quote) => {
            let config = cx.config;
            let marker: &str = &config.blockquote;
            fill(
                cx,
                budget,
                |cx, budget| render_parts(&quote.content, cx, budget),
                |text, _| prefix_lines(text, marker),
            )
        }
        Block::Codeblock(codeblock) => Ok(render_codeblock(codeblock, cx, budget)),
        Block::Section(section) => render_section(section, cx, budget),
        Block::Hr(_) => {
            let marker = cx.config.hr.clamped(cx.scope.heading_level, "---");
            Ok(Rendered::clipped(&format!("\n{marker}\n"), budget))
        }
        Block::Definition(definition) => render_definition(definition, cx, budget),
        Block::LinkTarget(target) => render_link_target(target, cx, budget, Emit::Include),
        Block::Footnote(footnote) => render_footnote(footnote, cx, budget, Emit::Include),
        Block::Raw(raw) => Ok(Rendered::clipped(&raw.content, budget)),
    }
}

/// Render mixed content: each maximal run of inline nodes becomes an
/// implicit paragraph, blocks render as themselves.
pub(crate) fn render_parts<X>(
    nodes: &[Node<X>],
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
) -> Result<Rendered> {
    let mut pieces = Pieces::new(budget);
    let mut index = 0;
    while index < nodes.len() && !pieces.is_done() {
        match &nodes[index] {
            Node::Block(block) => {
                pieces.push_with(|budget| render_block(block, cx, budget))?;
                index += 1;
            }
            Node::Inline(_) => {
                let run: Vec<&Inline<X>> = nodes[index..]
                    .iter()
                    .map_while(|node| match node {
                        Node::Inline(inline) => Some(inline),
                        Node::Block(_) => None,
                    })
                    .collect();
                index += run.len();
                pieces.push_with(|budget| render_paragraph(&run, cx, budget))?;
            }
        }
    }
    Ok(pieces.finish())
}

fn render_paragraph<X, I: Borrow<Inline<X>>>(
    run: &[I],
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
) -> Result<Rendered> {
    let pass = cx.line_pass();
    let mut pieces = Pieces::new(budget);
    pieces.push("\n");
    pieces.push_with(|budget| fill(cx, budget, |cx, budget| render_run(run, cx, budget), pass))?;
    pieces.push("\n");
    Ok(pieces.finish())
}

fn render_heading<X>(heading: &Heading<X>, cx: &mut RenderContext<'_, X>, budget: Budget) -> Result<Rendered> {
    let level = heading.level.unwrap_or(cx.scope.heading_level);
    let scope = Scope {
        heading_level: level + 1,
        line_break: " ",
        ..cx.scope
    };

    let mut pieces = Pieces::new(budget);
    pieces.push("\n");
    pieces.push(&"#".repeat(level));
    pieces.push(" ");
    pieces.push_with(|budget| cx.scoped(scope, |cx| render_run(&heading.title, cx, budget)))?;
    if let Some(id) = &heading.id {
        pieces.push(" {#");
        pieces.push(&escape_text(id, &cx.text_escape()));
        pieces.push("}");
    }
    pieces.push("\n");
    Ok(pieces.finish())
}

fn render_section<X>(section: &Section<X>, cx: &mut RenderContext<'_, X>, budget: Budget) -> Result<Rendered> {
    let level = section
        .heading
        .as_ref()
        .and_then(|heading| heading.level)
        .unwrap_or(cx.scope.heading_level);
    let scope = Scope {
        heading_level: level + 1,
        ..cx.scope
    };

    let mut pieces = Pieces::new(budget);
    if let Some(heading) = &section.heading {
        pieces.push_with(|budget| render_heading(heading, cx, budget))?;
    }
    for child in &section.children {
        if pieces.is_done() {
            break;
        }
        pieces.push_with(|budget| cx.scoped(scope, |cx| render_block(child, cx, budget)))?;
    }
    Ok(pieces.finish())
}

fn render_list<X>(list: &List<X>, cx: &mut RenderContext<'_, X>, budget: Budget) -> Result<Rendered> {
    let config = cx.config;
    let pass = cx.line_pass();
    let level = cx.scope.list_level;
    let nested = Scope {
        list_level: level + 1,
        ..cx.scope
    };
    let mut number = match list.kind {
        ListKind::Ordered { start } => start,
        ListKind::Bullet => 0,
    };
    let mut after_block = false;

    let mut pieces = Pieces::new(budget);
    pieces.push("\n");
    for item in &list.items {
        if pieces.is_done() {
            break;
        }
        match item {
            Node::Inline(inline) => {
                if after_block {
                    pieces.push("\n");
                }
                let marker = match list.kind {
                    ListKind::Ordered { .. } => {
                        number += 1;
                        format!("{}{} ", number - 1, config.ordered_list)
                    }
                    ListKind::Bullet => format!("{} ", config.unordered_list.cycled(level, "-")),
                };
                pieces.push(&marker);
                pieces.push_with(|budget| {
                    fill(
                        cx,
                        budget,
                        |cx, budget| render_inline(inline, cx, budget),
                        |text, open_tail| indent_lines(&pass(text, open_tail), LIST_INDENT),
                    )
                })?;
                pieces.push("\n");
                after_block = false;
            }
            Node::Block(block) => {
                pieces.push_with(|budget| {
                    fill(
                        cx,
                        budget,
                        |cx, budget| cx.scoped(nested, |cx| render_block(block, cx, budget)),
                        |text, _| indent_lines(text, LIST_INDENT),
                    )
                })?;
                after_block = true;
            }
        }
    }
    Ok(pieces.finish())
}

fn render_codeblock<X>(codeblock: &Codeblock, cx: &RenderContext<'_, X>, budget: Budget) -> Rendered {
    let (indent, body) = match &cx.config.codeblock {
        CodeblockStyle::Fenced { fence, indent } => {
            let fence = fence_for(&codeblock.code, fence);
            let language = codeblock.language.as_deref().unwrap_or_default();
            (indent, format!("{fence}{language}\n{}\n{fence}", codeblock.code))
        }
        CodeblockStyle::Indented { indent } => (indent, codeblock.code.clone()),
    };
    let body = body.replace('\n', &format!("\n{indent}"));
    Rendered::clipped(&format!("\n{indent}{body}\n"), budget)
}

fn render_definition<X>(
    definition: &Definition<X>,
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
) -> Result<Rendered> {
    let pass = cx.line_pass();
    let mut pieces = Pieces::new(budget);
    pieces.push("\n");
    pieces.push_with(|budget| fill(cx, budget, |cx, budget| render_run(&definition.term, cx, budget), pass))?;
    for description in &definition.descriptions {
        pieces.push("\n: ");
        pieces.push_with(|budget| fill(cx, budget, |cx, budget| render_run(description, cx, budget), pass))?;
    }
    pieces.push("\n");
    Ok(pieces.finish())
}
