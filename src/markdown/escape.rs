//! Pure markdown escaping utilities.
//!
//! These functions escape special Markdown characters in text, link
//! destinations and titles, and calculate fences for code blocks and inline
//! code that cannot collide with the content.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_encode_byte, utf8_percent_encode};

use crate::config::{EmojiEscape, EscapeMode, UrlEscape};

use super::emoji;

/// Characters escaped unconditionally in [`EscapeMode::Exact`].
const EXACT: &[char] = &[
    '\\', '*', '_', '`', '|', '[', ']', '{', '}', '<', '>', '~', '#', '+', '-', '.', '!', ':', '^',
];

/// What `encodeURI` leaves alone, plus `\` and `%`.
const URI: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#')
    .remove(b'\\')
    .remove(b'%');

/// Options for [`escape_text`].
#[derive(Debug, Clone, Copy)]
pub struct TextEscape<'a> {
    pub mode: EscapeMode,
    pub emoji: EmojiEscape,
    /// Replacement for `\n`.
    pub line_break: &'a str,
    /// Escape `|` (inside table cells).
    pub pipes: bool,
}

impl Default for TextEscape<'_> {
    fn default() -> Self {
        Self {
            mode: EscapeMode::Smart,
            emoji: EmojiEscape::Smart,
            line_break: "  \n",
            pipes: false,
        }
    }
}

/// The delimiter a link destination is written inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlBracket {
    /// `[text](url)`
    Paren,
    /// `<url>` and reference definitions.
    Angle,
}

/// Escape special Markdown characters in inline text.
///
/// In smart mode only characters that could start markup are escaped:
/// - Backslash, emphasis and code: `\\`, `*`, `` ` ``, `~`, `^`
/// - Brackets and HTML: `[`, `]`, `{`, `}`, `<`, `>`
/// - `_` unless it sits inside a word
/// - `=` when another `=` follows (highlight)
/// - `|` inside table cells
/// - colons that would start an emoji shortcode or smiley
///
/// Line-start constructs (headings, lists, quotes) are handled later by
/// [`escape_lines`](super::escape_lines) once the whole line is known.
///
/// # Examples
///
/// ```
/// use mdscribe::markdown::{TextEscape, escape_text};
///
/// let opts = TextEscape::default();
/// assert_eq!(escape_text("*bold*", &opts), "\\*bold\\*");
/// assert_eq!(escape_text("snake_case _word_", &opts), "snake_case \\_word\\_");
/// ```
pub fn escape_text(text: &str, opts: &TextEscape<'_>) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len() + text.len() / 10);

    for (i, &c) in chars.iter().enumerate() {
        if c == '\n' {
            result.push_str(opts.line_break);
            continue;
        }
        let prev = i.checked_sub(1).map(|j| chars[j]);
        let next = chars.get(i + 1).copied();
        let escape = match opts.mode {
            EscapeMode::Off => false,
            EscapeMode::Exact => EXACT.contains(&c),
            EscapeMode::Smart => match c {
                '\\' | '*' | '`' | '[' | ']' | '{' | '}' | '<' | '>' | '~' | '^' => true,
                '_' => !(prev.is_some_and(char::is_alphanumeric)
                    && next.is_some_and(char::is_alphanumeric)),
                '=' => next == Some('='),
                '|' => opts.pipes,
                ':' => emoji::escapes_colon(&chars, i, opts.emoji),
                _ => false,
            },
        };
        if escape {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Escape a link destination.
///
/// # Examples
///
/// ```
/// use mdscribe::config::UrlEscape;
/// use mdscribe::markdown::{UrlBracket, escape_url};
///
/// assert_eq!(escape_url("a (b)", UrlEscape::Smart, UrlBracket::Paren), "a%20\\(b\\)");
/// assert_eq!(escape_url("<x>", UrlEscape::Smart, UrlBracket::Angle), "%3Cx%3E");
/// ```
pub fn escape_url(url: &str, style: UrlEscape, bracket: UrlBracket) -> String {
    let encoded = match style {
        UrlEscape::Strict => utf8_percent_encode(url, URI).to_string(),
        UrlEscape::Smart => {
            let mut out = String::with_capacity(url.len());
            for c in url.chars() {
                let encode = match bracket {
                    UrlBracket::Paren => c.is_ascii_whitespace() || c.is_ascii_control(),
                    UrlBracket::Angle => matches!(c, '<' | '>' | '\n' | '\r'),
                };
                if encode {
                    out.push_str(percent_encode_byte(c as u8));
                } else {
                    out.push(c);
                }
            }
            out
        }
    };

    match bracket {
        UrlBracket::Paren => encoded.replace('(', "\\(").replace(')', "\\)"),
        UrlBracket::Angle => encoded,
    }
}

/// Escape a link or image title for use inside `"..."`.
pub fn escape_title(title: &str, mode: EscapeMode) -> String {
    let mut result = String::with_capacity(title.len() + 2);
    for c in title.chars() {
        let escape = match mode {
            EscapeMode::Exact => c == '"' || EXACT.contains(&c),
            EscapeMode::Smart | EscapeMode::Off => c == '"' || c == '\\',
        };
        if escape {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

/// Lengthen `mark` until it is longer than a run of `run` mark characters.
fn escalate(mark: &str, run: usize) -> String {
    let len = mark.chars().count();
    if len == 0 || run < len {
        return mark.to_string();
    }
    let mut chars = mark.chars();
    let first = chars.next();
    match first {
        Some(c) if chars.all(|other| other == c) => c.to_string().repeat(run + 1),
        _ => mark.repeat(run / len + 1),
    }
}

/// Calculate the inline code delimiter for `code`.
///
/// Returns `mark` itself unless the code contains a run of mark characters
/// at least as long, in which case the mark is lengthened past it.
///
/// # Examples
///
/// ```
/// use mdscribe::markdown::inline_code_mark;
///
/// assert_eq!(inline_code_mark("code", "`"), "`");
/// assert_eq!(inline_code_mark("code with `` ticks", "`"), "```");
/// ```
pub fn inline_code_mark(code: &str, mark: &str) -> String {
    let mut max_run = 0;
    let mut current_run = 0;

    for c in code.chars() {
        if mark.contains(c) {
            current_run += 1;
            max_run = max_run.max(current_run);
        } else {
            current_run = 0;
        }
    }

    escalate(mark, max_run)
}

/// Calculate the fence for a code block.
///
/// Only lines made up entirely of fence characters can close a block, so
/// only those count. A single-character fence grows to one more than the
/// longest such line; a longer fence is repeated.
///
/// # Examples
///
/// ```
/// use mdscribe::markdown::fence_for;
///
/// assert_eq!(fence_for("let x = 1;", "```"), "```");
/// assert_eq!(fence_for("```rust\ncode\n```", "```"), "````");
/// assert_eq!(fence_for("inline ```` is fine", "```"), "```");
/// ```
pub fn fence_for(code: &str, fence: &str) -> String {
    let max_run = code
        .lines()
        .map(|line| line.trim_matches([' ', '\t']))
        .filter(|line| !line.is_empty() && line.chars().all(|c| fence.contains(c)))
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    escalate(fence, max_run)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smart(text: &str) -> String {
        escape_text(text, &TextEscape::default())
    }

    fn exact(text: &str) -> String {
        escape_text(
            text,
            &TextEscape {
                mode: EscapeMode::Exact,
                ..TextEscape::default()
            },
        )
    }

    #[test]
    fn test_escape_backslash() {
        assert_eq!(smart("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_escape_emphasis() {
        assert_eq!(smart("*bold*"), "\\*bold\\*");
        assert_eq!(smart("_italic_"), "\\_italic\\_");
        assert_eq!(smart("keep_underscore"), "keep_underscore");
        assert_eq!(smart("~~~"), "\\~\\~\\~");
    }

    #[test]
    fn test_escape_highlight() {
        assert_eq!(smart("==highlight=="), "\\==highlight\\==");
        assert_eq!(smart("===="), "\\=\\=\\==");
        assert_eq!(smart("a = b"), "a = b");
    }

    #[test]
    fn test_escape_links() {
        assert_eq!(smart("[link](x)"), "\\[link\\](x)");
    }

    #[test]
    fn test_smart_leaves_line_start_characters() {
        assert_eq!(smart("# - + . ! ( ) \" $"), "# - + . ! ( ) \" $");
    }

    #[test]
    fn test_escape_table_pipe() {
        assert_eq!(smart("a | b"), "a | b");
        let cell = TextEscape {
            pipes: true,
            ..TextEscape::default()
        };
        assert_eq!(escape_text("a | b", &cell), "a \\| b");
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(smart("a\nb"), "a  \nb");
        let heading = TextEscape {
            line_break: " ",
            ..TextEscape::default()
        };
        assert_eq!(escape_text("a\nb", &heading), "a b");
    }

    #[test]
    fn test_emoji_colons() {
        assert_eq!(
            smart("smart escape :smiley:smiley:SMILEY: :s :smiley smiley: :) :@ C:/ http://"),
            "smart escape \\:smiley\\:smiley:SMILEY: \\:s :smiley smiley: \\:) \\:@ C:/ http://"
        );
    }

    #[test]
    fn test_exact_mode() {
        assert_eq!(
            exact("!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~"),
            "\\!\"\\#$%&'()\\*\\+,\\-\\./\\:;\\<=\\>?@\\[\\\\\\]\\^\\_\\`\\{\\|\\}\\~"
        );
    }

    #[test]
    fn test_off_mode() {
        let off = TextEscape {
            mode: EscapeMode::Off,
            ..TextEscape::default()
        };
        assert_eq!(escape_text("*raw* [x]", &off), "*raw* [x]");
    }

    #[test]
    fn test_url_smart() {
        assert_eq!(
            escape_url("#custom({id})", UrlEscape::Smart, UrlBracket::Paren),
            "#custom\\({id}\\)"
        );
        assert_eq!(
            escape_url("http:\\\\localhost\\alma?chars=<[\\]>", UrlEscape::Smart, UrlBracket::Angle),
            "http:\\\\localhost\\alma?chars=%3C[\\]%3E"
        );
    }

    #[test]
    fn test_url_strict() {
        assert_eq!(
            escape_url("http:\\\\localhost\\alma?chars=<[\\]>", UrlEscape::Strict, UrlBracket::Angle),
            "http:\\\\localhost\\alma?chars=%3C%5B\\%5D%3E"
        );
        assert_eq!(
            escape_url("a b%20", UrlEscape::Strict, UrlBracket::Angle),
            "a%20b%20"
        );
    }

    #[test]
    fn test_title() {
        assert_eq!(
            escape_title("Localhost \"missing\"", EscapeMode::Smart),
            "Localhost \\\"missing\\\""
        );
        assert_eq!(escape_title("a-b", EscapeMode::Exact), "a\\-b");
    }

    #[test]
    fn test_inline_code_mark() {
        assert_eq!(inline_code_mark("code", "`"), "`");
        assert_eq!(inline_code_mark("a ` b", "`"), "``");
        assert_eq!(
            inline_code_mark(" this is a code with ````-s ending with a `", "`"),
            "`````"
        );
        assert_eq!(inline_code_mark("{\n  ^v^v \n}", "^v^v"), "^v^v^v^v");
    }

    #[test]
    fn test_fence_whole_lines_only() {
        assert_eq!(fence_for("{\n  // comment ```` ~~~~\n}", "```"), "```");
        assert_eq!(fence_for("{\n  ```` \n  goto 10;\n}", "```"), "`````");
        assert_eq!(fence_for("{\n  ^v^v \n  goto 10;\n}", "^v^v"), "^v^v^v^v");
    }
}
