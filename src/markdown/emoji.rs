//! Emoji shortcode detection for text escaping.
//!
//! Many Markdown renderers replace `:name:` shortcodes and ASCII smileys such
//! as `:)` with emoji. The tables here decide which colons in plain text must
//! be escaped so that such text survives literally.

use crate::config::EmojiEscape;

/// Characters that complete a common smiley when they directly follow a colon.
///
/// No `*`: it is always escaped on its own, which already breaks `:*`.
pub(crate) const SMILEY_TAILS: &[char] = &['$', '(', ')', '/', '@', 'D', 'O', 'P', 'o', 's', 'z', '|'];

/// Characters allowed inside a `:name:` shortcode.
fn is_shortcode_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '+' | '-')
}

fn opens_shortcode(rest: &[char]) -> bool {
    let name_len = rest.iter().take_while(|&&c| is_shortcode_char(c)).count();
    name_len > 0 && rest.get(name_len) == Some(&':')
}

fn is_smiley(prev: Option<char>, rest: &[char]) -> bool {
    let standalone = |c: Option<&char>| c.is_none_or(|c| !c.is_alphanumeric());
    prev.is_none_or(|c| !c.is_alphanumeric())
        && rest.first().is_some_and(|c| SMILEY_TAILS.contains(c))
        && standalone(rest.get(1))
}

/// Whether the colon at `chars[i]` must be escaped under `mode`.
pub(crate) fn escapes_colon(chars: &[char], i: usize, mode: EmojiEscape) -> bool {
    let prev = i.checked_sub(1).map(|j| chars[j]);
    let rest = &chars[i + 1..];
    match mode {
        EmojiEscape::Off => false,
        EmojiEscape::Smart => opens_shortcode(rest) || is_smiley(prev, rest),
        EmojiEscape::AllSpecChars => {
            opens_shortcode(rest)
                || is_smiley(prev, rest)
                || (prev.is_none_or(char::is_whitespace)
                    && rest
                        .first()
                        .is_some_and(|c| !c.is_alphanumeric() && !c.is_whitespace()))
        }
    }
}
