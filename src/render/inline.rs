//! Inline content rendering.

use std::borrow::Borrow;

use crate::config::{Config, EscapeMode};
use crate::error::{Error, Result};
use crate::ir::{Code, Destination, Emphasis, Inline, Link, Text};
use crate::markdown::{UrlBracket, escape_text, escape_title, escape_url, inline_code_mark};

use super::RenderContext;
use super::budget::{Budget, Pieces, Rendered};
use super::references::{RefNode, check_footnote_id, describe};

/// Render a run of inline items back to back.
///
/// In smart mode an item ending in `!` followed by one starting with `[`
/// would read as an image, so the `!` is escaped.
pub(crate) fn render_run<X, I: Borrow<Inline<X>>>(
    items: &[I],
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
) -> Result<Rendered> {
    let smart = cx.config.escape == EscapeMode::Smart;
    let mut pieces = Pieces::new(budget);

    for (index, item) in items.iter().enumerate() {
        if pieces.is_done() {
            break;
        }
        let rendered = render_inline(item.borrow(), cx, pieces.budget())?;
        if smart
            && !rendered.truncated
            && rendered.text.ends_with('!')
            && next_opens_bracket(&items[index + 1..], cx)?
        {
            let mut text = rendered.text;
            text.pop();
            pieces.push(&text);
            pieces.push("\\!");
        } else {
            pieces.push_rendered(rendered);
        }
    }
    Ok(pieces.finish())
}

/// Whether the first non-empty item of `rest` starts with `[`.
fn next_opens_bracket<X, I: Borrow<Inline<X>>>(
    rest: &[I],
    cx: &mut RenderContext<'_, X>,
) -> Result<bool> {
    let snapshot = cx.shadow_snapshot();
    let opens = cx.peek(|cx| {
        for item in rest {
            let first = render_inline(item.borrow(), cx, Budget::Limited(1))?;
            if !first.text.is_empty() {
                return Ok(first.text.starts_with('['));
            }
        }
        Ok(false)
    });
    cx.restore_shadow(snapshot);
    opens
}

pub(crate) fn render_inline<X>(
    inline: &Inline<X>,
    cx: &mut RenderContext<'_, X>,
    budget: Budget,
) -> Result<Rendered> {
    match inline {
        Inline::Str(text) => Ok(Rendered::clipped(&escape_text(text, &cx.text_escape()), budget)),
        Inline::Text(text) => render_text(text, cx, budget),
        Inline::Code(code) => Ok(render_code(code, cx.config, budget)),
        Inline::Link(link) => render_link(link, cx, budget),
        Inline::Url(url) => {
            let href = escape_url(&url.href, cx.config.url_escape, UrlBracket::Angle);
            Ok(Rendered::clipped(&format!("<{href}>"), budget))
        }
        Inline::Emoji(emoji) => {
            let text = if emoji.name.starts_with(':') {
                emoji.name.clone()
            } else {
                format!(":{}:", emoji.name)
            };
            Ok(Rendered::clipped(&text, budget))
        }
        Inline::FootnoteRef(reference) => {
            let footnote = reference.footnote();
            let mut pieces = Pieces::new(budget);
            pieces.push("[^");
            if !pieces.is_done() {
                check_footnote_id(footnote)?;
                let label = cx
                    .book(budget)
                    .refer(footnote.id(), || RefNode::Footnote(footnote.clone()));
                pieces.push(&label);
                pieces.push("]");
            }
            Ok(pieces.finish())
        }
        Inline::Task(task) => {
            let mut pieces = Pieces::new(budget);
            pieces.push(if task.checked { "[x] " } else { "[ ] " });
            pieces.push_with(|budget| render_run(&task.content, cx, budget))?;
            Ok(pieces.finish())
        }
        Inline::Raw(raw) => Ok(Rendered::clipped(&raw.content, budget)),
        Inline::Ext(value) => Ok(Rendered::clipped(&cx.render_extension(value)?, budget)),
    }
}

fn emphasis_mark(config: &Config, emphasis: Emphasis) -> &str {
    match emphasis {
        Emphasis::Bold => &config.bold,
        Emphasis::Italic => &config.italic,
        Emphasis::Strikethrough => &config.strikethrough,
        Emphasis::Subscript => &config.subscript,
        Emphasis::Superscript => &config.superscript,
        Emphasis::Highlight => &config.highlight,
    }
}

/// Closing counterpart of an emphasis mark: `<b class="x">` closes with
/// `</b>`, anything else with itself.
fn closing_mark(mark: &str) -> String {
    match mark.strip_prefix('<').and_then(|tag| tag.strip_suffix('>')) {
        Some(tag) => {
            let name = tag.split_whitespace().next().unwrap_or_default();
            format!("</{name}>")
        }
        None => mark.to_string(),
    }
}

fn render_text<X>(text: &Text<X>, cx: &mut RenderContext<'_, X>, budget: Budget) -> Result<Rendered> {
    let Some(emphasis) = text.emphasis else {
        return render_run(&text.content, cx, budget);
    };
    let config = cx.config;
    let mark = emphasis_mark(config, emphasis);

    let mut pieces = Pieces::new(budget);
    pieces.push(mark);
    pieces.push_with(|budget| render_run(&text.content, cx, budget))?;
    pieces.push(&closing_mark(mark));
    Ok(pieces.finish())
}

fn render_code(code: &Code, config: &Config, budget: Budget) -> Rendered {
    let mark = inline_code_mark(&code.code, &config.code);
    let touches = |c: Option<char>| c.is_some_and(|c| mark.contains(c));

    let mut pieces = Pieces::new(budget);
    pieces.push(&mark);
    if touches(code.code.chars().next()) {
        pieces.push(" ");
    }
    pieces.push(&code.code);
    if touches(code.code.chars().next_back()) {
        pieces.push(" ");
    }
    pieces.push(&mark);
    pieces.finish()
}

fn render_link<X>(link: &Link<X>, cx: &mut RenderContext<'_, X>, budget: Budget) -> Result<Rendered> {
    if let Destination::Heading(heading) = &link.destination
        && heading.id.is_none()
    {
        let title = describe(cx, |cx, budget| render_run(&heading.title, cx, budget))?;
        return Err(Error::HeadingWithoutId { heading: title });
    }
    let config = cx.config;

    let mut pieces = Pieces::new(budget);
    if link.image {
        pieces.push("!");
    }
    pieces.push("[");
    pieces.push_with(|budget| render_run(&link.text, cx, budget))?;
    if pieces.is_done() {
        return Ok(pieces.finish());
    }

    match &link.destination {
        Destination::Url { href, title } => {
            pieces.push("](");
            pieces.push(&escape_url(href, config.url_escape, UrlBracket::Paren));
            if let Some(title) = title {
                pieces.push(" \"");
                pieces.push(&escape_title(title, config.escape));
                pieces.push("\"");
            }
            pieces.push(")");
        }
        Destination::Target(target) => {
            pieces.push("][");
            if !pieces.is_done() {
                let label = cx
                    .book(budget)
                    .refer(target.id(), || RefNode::Link(target.clone()));
                pieces.push(&label);
                pieces.push("]");
            }
        }
        Destination::Heading(heading) => {
            let id = heading.id.as_deref().unwrap_or_default();
            pieces.push("](");
            pieces.push(&escape_url(&format!("#{id}"), config.url_escape, UrlBracket::Paren));
            pieces.push(")");
        }
    }
    Ok(pieces.finish())
}
