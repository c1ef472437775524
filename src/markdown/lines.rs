//! Line-oriented passes over already rendered text.
//!
//! Inline escaping cannot know whether a character ends up at the start of
//! a line. [`escape_lines`] runs once a paragraph body is assembled and
//! neutralizes block syntax (headings, quotes, list markers, setext
//! underlines, table separators) that plain text would otherwise open.

use memchr::memchr_iter;

const BLANK: [char; 2] = [' ', '\t'];

/// Characters whose escaping depends on what follows them on the line.
fn is_undecided(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '-' | '=' | '+' | '*' | ':' | '|' | '.' | ')' | ' ' | '\t')
}

/// Split `text` into lines, reporting whether each one is followed by `\n`.
fn split_lines(text: &str) -> impl Iterator<Item = (&str, bool)> {
    let mut start = 0;
    let mut ends = memchr_iter(b'\n', text.as_bytes());
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        match ends.next() {
            Some(end) => {
                let line = &text[start..end];
                start = end + 1;
                Some((line, true))
            }
            None => {
                done = true;
                Some((&text[start..], false))
            }
        }
    })
}

/// Escape block syntax at the start of every line of `text`.
///
/// Leading whitespace collapses to a single space so indentation cannot open
/// a code block, whitespace-only lines become a visible `\` break, and
/// trailing whitespace at the very end collapses to one space.
///
/// With `open_tail` the final line is treated as a truncated prefix: it is
/// dropped when its escaping still depends on text that was cut off, and its
/// trailing blanks are removed. The result is then always a prefix of what
/// the complete text would produce.
///
/// # Examples
///
/// ```
/// use mdscribe::markdown::escape_lines;
///
/// assert_eq!(escape_lines("# Not a heading", false), "\\# Not a heading");
/// assert_eq!(escape_lines("  1) Not a list", false), " 1\\) Not a list");
/// ```
pub fn escape_lines(text: &str, open_tail: bool) -> String {
    let mut out = String::with_capacity(text.len() + 8);

    for (line, has_newline) in split_lines(text) {
        if has_newline {
            escape_line(line, true, &mut out);
            out.push('\n');
        } else if open_tail {
            let rest = line.trim_start_matches(BLANK);
            if rest.chars().all(is_undecided) {
                break;
            }
            let mut partial = String::new();
            escape_line(line, false, &mut partial);
            out.push_str(partial.trim_end_matches(BLANK));
        } else {
            let mut last = String::new();
            escape_line(line, false, &mut last);
            let trimmed = last.trim_end_matches(BLANK);
            if trimmed.len() < last.len() {
                out.push_str(trimmed);
                out.push(' ');
            } else {
                out.push_str(&last);
            }
        }
    }

    out
}

fn escape_line(line: &str, has_newline: bool, out: &mut String) {
    let rest = line.trim_start_matches(BLANK);
    if rest.is_empty() {
        if has_newline && !line.is_empty() {
            out.push('\\');
        } else {
            out.push_str(line);
        }
        return;
    }
    if rest.len() < line.len() {
        out.push(' ');
    }

    let mut chars = rest.chars();
    let first = chars.next().unwrap_or_default();
    let second = chars.next();

    if first == '>' {
        escape_quote_chain(rest, out);
        return;
    }

    // A marker opens a block when a blank or the end of the line follows it.
    let marker_ends = second.is_none_or(|c| BLANK.contains(&c));
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    let escape_first = first == '#'
        || is_setext_underline(rest)
        || is_dash_break(rest)
        || (matches!(first, '*' | '+' | '-' | ':') && marker_ends)
        || is_table_separator(rest);

    if escape_first {
        out.push('\\');
        out.push_str(rest);
    } else if digits > 0 && is_ordered_marker(&rest[digits..]) {
        out.push_str(&rest[..digits]);
        out.push('\\');
        out.push_str(&rest[digits..]);
    } else {
        out.push_str(rest);
    }
}

fn escape_quote_chain(mut rest: &str, out: &mut String) {
    while let Some(after) = rest.strip_prefix('>') {
        out.push_str("\\>");
        let body = after.trim_start_matches(BLANK);
        out.push_str(&after[..after.len() - body.len()]);
        rest = body;
    }
    out.push_str(rest);
}

fn is_setext_underline(rest: &str) -> bool {
    let marks = rest.trim_end_matches(BLANK);
    !marks.is_empty() && (marks.chars().all(|c| c == '=') || marks.chars().all(|c| c == '-'))
}

/// `-- -` and similar: a thematic break that is not a plain dash run.
fn is_dash_break(rest: &str) -> bool {
    rest.chars().all(|c| c == '-' || BLANK.contains(&c)) && rest.chars().filter(|&c| c == '-').count() >= 3
}

fn is_ordered_marker(after_digits: &str) -> bool {
    let mut chars = after_digits.chars();
    matches!(chars.next(), Some('.' | ')')) && chars.next().is_none_or(|c| BLANK.contains(&c))
}

/// A GFM delimiter row: dashes with pipes or colons, nothing else.
fn is_table_separator(rest: &str) -> bool {
    rest.contains('-')
        && (rest.contains('|') || rest.contains(':'))
        && rest.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// Insert `prefix` after every newline except a final one.
pub(crate) fn prefix_lines(text: &str, prefix: &str) -> String {
    let mut out = String::with_capacity(text.len() + prefix.len() * 4);
    let mut start = 0;
    for end in memchr_iter(b'\n', text.as_bytes()) {
        out.push_str(&text[start..=end]);
        if end + 1 < text.len() {
            out.push_str(prefix);
        }
        start = end + 1;
    }
    out.push_str(&text[start..]);
    out
}

/// Insert `indent` after every newline that starts a non-empty line.
pub(crate) fn indent_lines(text: &str, indent: &str) -> String {
    let mut out = String::with_capacity(text.len() + indent.len() * 4);
    let bytes = text.as_bytes();
    let mut start = 0;
    for end in memchr_iter(b'\n', bytes) {
        out.push_str(&text[start..=end]);
        if bytes.get(end + 1).is_some_and(|&b| b != b'\n') {
            out.push_str(indent);
        }
        start = end + 1;
    }
    out.push_str(&text[start..]);
    out
}
