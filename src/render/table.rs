//! Pipe table layout.
//!
//! Columns are as wide as their header text, capped at [`MAX_WIDTH`]
//! characters. Cells are padded to the column width but never cut, so a
//! long cell simply widens its own row.

use tracing::warn;

use crate::error::Result;
use crate::ir::{Align, Inline, Table};

use super::budget::{Budget, Pieces, Rendered};
use super::inline::render_inline;
use super::{RenderContext, Scope};

/// Widest a column is padded to.
const MAX_WIDTH: usize = 20;

pub(crate) fn render_table<X>(table: &Table<X>, cx: &mut RenderContext<'_, X>, budget: Budget) -> Result<Rendered> {
    if table.headers.is_empty() {
        warn!(rows = table.rows.len(), "table has no header row, rendering nothing");
        return Ok(Rendered::empty(budget));
    }
    let config = cx.config;
    let scope = Scope {
        line_break: &config.table_nl,
        pipes: true,
        ..cx.scope
    };
    let aligns: Vec<Option<Align>> = table.headers.iter().map(|header| header.align).collect();

    let mut headers = Vec::with_capacity(aligns.len());
    for header in &table.headers {
        headers.push(render_cell(&header.content, cx, scope, budget)?);
    }
    let widths: Vec<usize> = headers
        .iter()
        .map(|text| text.chars().count().min(MAX_WIDTH))
        .collect();

    let mut pieces = Pieces::new(budget);
    pieces.push("\n");
    pieces.push(&layout_row(&headers, &widths, &aligns));
    let separators: Vec<String> = widths
        .iter()
        .zip(&aligns)
        .map(|(&width, &align)| separator(width, align))
        .collect();
    pieces.push(&format!("| {} |\n", separators.join(" | ")));

    for (index, row) in table.rows.iter().enumerate() {
        if pieces.is_done() {
            break;
        }
        if row.cells.len() != widths.len() {
            warn!(
                row = index,
                expected = widths.len(),
                found = row.cells.len(),
                "table row cell count differs from header"
            );
        }
        let mut cells = Vec::with_capacity(widths.len());
        for cell in row.cells.iter().take(widths.len()) {
            cells.push(render_cell(cell, cx, scope, budget)?);
        }
        cells.resize(widths.len(), String::new());
        pieces.push(&layout_row(&cells, &widths, &aligns));
    }
    Ok(pieces.finish())
}

/// Cells are laid out whole; the row is cut afterwards.
fn render_cell<'a, X>(
    cell: &Inline<X>,
    cx: &mut RenderContext<'a, X>,
    scope: Scope<'a>,
    budget: Budget,
) -> Result<String> {
    let rendered = cx.scoped(scope, |cx| render_inline(cell, cx, budget.uncapped()))?;
    Ok(rendered.text)
}

fn layout_row(cells: &[String], widths: &[usize], aligns: &[Option<Align>]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter().zip(aligns))
        .map(|(text, (&width, &align))| pad(text, width, align))
        .collect();
    format!("| {} |\n", padded.join(" | "))
}

fn pad(text: &str, width: usize, align: Option<Align>) -> String {
    let fill = width.saturating_sub(text.chars().count());
    let (left, right) = match align {
        Some(Align::Right) => (fill, 0),
        Some(Align::Center) => (fill / 2, fill - fill / 2),
        Some(Align::Left) | None => (0, fill),
    };
    format!("{}{text}{}", " ".repeat(left), " ".repeat(right))
}

fn separator(width: usize, align: Option<Align>) -> String {
    let width = width.max(3);
    match align {
        None => "-".repeat(width),
        Some(Align::Left) => format!(":{}", "-".repeat(width - 1)),
        Some(Align::Right) => format!("{}:", "-".repeat(width - 1)),
        Some(Align::Center) => format!(":{}:", "-".repeat(width - 2)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad() {
        assert_eq!(pad("ab", 5, None), "ab   ");
        assert_eq!(pad("ab", 5, Some(Align::Right)), "   ab");
        assert_eq!(pad("ab", 5, Some(Align::Center)), " ab  ");
        assert_eq!(pad("abcdef", 3, Some(Align::Center)), "abcdef");
    }

    #[test]
    fn test_separator_minimum_width() {
        assert_eq!(separator(2, Some(Align::Center)), ":-:");
        assert_eq!(separator(1, None), "---");
        assert_eq!(separator(5, Some(Align::Left)), ":----");
        assert_eq!(separator(5, Some(Align::Right)), "----:");
    }
}
