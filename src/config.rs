//! Rendering configuration.
//!
//! [`Config`] is immutable once a render starts. Callers usually start from
//! [`Config::DEFAULT`] and apply a sparse [`ConfigOverrides`]; a field left as
//! `None` in the overrides never clobbers the base value.

use std::borrow::Cow;

#[cfg(feature = "json")]
use serde::Deserialize;

/// How inline text is escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(Deserialize), serde(rename_all = "snake_case"))]
pub enum EscapeMode {
    /// Escape only what could actually be misread as markup.
    #[default]
    Smart,
    /// Escape every markup-significant character.
    Exact,
    /// Leave text untouched apart from line breaks.
    Off,
}

/// How link destinations are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(Deserialize), serde(rename_all = "snake_case"))]
pub enum UrlEscape {
    /// Touch only the characters that would break the surrounding syntax.
    #[default]
    Smart,
    /// Percent-encode like `encodeURI`, keeping backslashes and `%`.
    Strict,
}

/// Which colons in text are escaped so they don't read as emoji shortcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(Deserialize), serde(rename_all = "snake_case"))]
pub enum EmojiEscape {
    Off,
    /// Shortcode openers (`:name:`) and common smileys (`:)`, `:D`, ...).
    #[default]
    Smart,
    /// Also any colon after whitespace that is followed by punctuation.
    AllSpecChars,
}

/// Strictness of the link target / footnote validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "json", derive(Deserialize), serde(rename_all = "snake_case"))]
pub enum CheckReferences {
    Off,
    /// Report only references whose definition never made it into the output.
    Missing,
    /// Also report unused and duplicated definitions.
    #[default]
    Strict,
}

/// A marker that is either fixed or chosen per nesting level.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Deserialize), serde(untagged))]
pub enum Markers {
    One(Cow<'static, str>),
    PerLevel(Vec<Cow<'static, str>>),
}

impl Markers {
    /// Pick the marker for a 1-based level, sticking to the last one when
    /// the level runs past the list.
    pub fn clamped<'a>(&'a self, level: usize, fallback: &'a str) -> &'a str {
        match self {
            Self::One(marker) => marker.as_ref(),
            Self::PerLevel(markers) => markers
                .get(level.saturating_sub(1).min(markers.len().saturating_sub(1)))
                .map_or(fallback, |m| m.as_ref()),
        }
    }

    /// Pick the marker for a 1-based level, cycling through the list.
    pub fn cycled<'a>(&'a self, level: usize, fallback: &'a str) -> &'a str {
        match self {
            Self::One(marker) => marker.as_ref(),
            Self::PerLevel(markers) if markers.is_empty() => fallback,
            Self::PerLevel(markers) => markers[level.saturating_sub(1) % markers.len()].as_ref(),
        }
    }
}

impl From<&'static str> for Markers {
    fn from(marker: &'static str) -> Self {
        Self::One(Cow::Borrowed(marker))
    }
}

impl<const N: usize> From<[&'static str; N]> for Markers {
    fn from(markers: [&'static str; N]) -> Self {
        Self::PerLevel(markers.into_iter().map(Cow::Borrowed).collect())
    }
}

/// Code block layout.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Deserialize), serde(untagged))]
pub enum CodeblockStyle {
    /// Fenced block; the fence is lengthened when the code contains it.
    Fenced {
        fence: Cow<'static, str>,
        #[cfg_attr(feature = "json", serde(default))]
        indent: Cow<'static, str>,
    },
    /// Indented block; the language is dropped.
    Indented { indent: Cow<'static, str> },
}

/// Static rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub hr: Markers,
    pub bold: Cow<'static, str>,
    pub italic: Cow<'static, str>,
    pub strikethrough: Cow<'static, str>,
    pub subscript: Cow<'static, str>,
    pub superscript: Cow<'static, str>,
    pub highlight: Cow<'static, str>,
    pub blockquote: Cow<'static, str>,
    pub code: Cow<'static, str>,
    pub codeblock: CodeblockStyle,
    /// Hard line break inside paragraphs.
    pub nl: Cow<'static, str>,
    /// Line break inside table cells.
    pub table_nl: Cow<'static, str>,
    pub ordered_list: Cow<'static, str>,
    pub unordered_list: Markers,
    pub escape: EscapeMode,
    pub url_escape: UrlEscape,
    pub emoji_escape: EmojiEscape,
    pub footnote_indent: Cow<'static, str>,
    /// Append definitions that are referenced but never placed.
    pub auto_references: bool,
    /// Emit each definition at most once.
    pub dedup_references: bool,
    pub check_references: CheckReferences,
    pub heading_level: usize,
    pub list_level: usize,
    pub link_number_start: usize,
    pub footnote_number_start: usize,
}

impl Config {
    pub const DEFAULT: Config = Config {
        hr: Markers::One(Cow::Borrowed("---")),
        bold: Cow::Borrowed("**"),
        italic: Cow::Borrowed("*"),
        strikethrough: Cow::Borrowed("~~"),
        subscript: Cow::Borrowed("~"),
        superscript: Cow::Borrowed("^"),
        highlight: Cow::Borrowed("=="),
        blockquote: Cow::Borrowed("> "),
        code: Cow::Borrowed("`"),
        codeblock: CodeblockStyle::Fenced {
            fence: Cow::Borrowed("```"),
            indent: Cow::Borrowed(""),
        },
        nl: Cow::Borrowed("  \n"),
        table_nl: Cow::Borrowed("<br>"),
        ordered_list: Cow::Borrowed("."),
        unordered_list: Markers::One(Cow::Borrowed("-")),
        escape: EscapeMode::Smart,
        url_escape: UrlEscape::Smart,
        emoji_escape: EmojiEscape::Smart,
        footnote_indent: Cow::Borrowed("    "),
        auto_references: true,
        dedup_references: false,
        check_references: CheckReferences::Strict,
        heading_level: 1,
        list_level: 1,
        link_number_start: 1,
        footnote_number_start: 1,
    };

    /// Return a copy with every field present in `overrides` replaced.
    pub fn merged(&self, overrides: &ConfigOverrides) -> Config {
        let mut config = self.clone();
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = &overrides.$field {
                        config.$field = value.clone();
                    }
                )*
            };
        }
        take!(
            hr,
            bold,
            italic,
            strikethrough,
            subscript,
            superscript,
            highlight,
            blockquote,
            code,
            codeblock,
            nl,
            table_nl,
            ordered_list,
            unordered_list,
            escape,
            url_escape,
            emoji_escape,
            footnote_indent,
            auto_references,
            dedup_references,
            check_references,
            heading_level,
            list_level,
            link_number_start,
            footnote_number_start,
        );
        config
    }

    pub fn with_escape(mut self, escape: EscapeMode) -> Self {
        self.escape = escape;
        self
    }

    pub fn with_check_references(mut self, check: CheckReferences) -> Self {
        self.check_references = check;
        self
    }

    pub fn with_auto_references(mut self, auto: bool) -> Self {
        self.auto_references = auto;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Sparse per-call overrides for [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Deserialize), serde(default))]
pub struct ConfigOverrides {
    pub hr: Option<Markers>,
    pub bold: Option<Cow<'static, str>>,
    pub italic: Option<Cow<'static, str>>,
    pub strikethrough: Option<Cow<'static, str>>,
    pub subscript: Option<Cow<'static, str>>,
    pub superscript: Option<Cow<'static, str>>,
    pub highlight: Option<Cow<'static, str>>,
    pub blockquote: Option<Cow<'static, str>>,
    pub code: Option<Cow<'static, str>>,
    pub codeblock: Option<CodeblockStyle>,
    pub nl: Option<Cow<'static, str>>,
    pub table_nl: Option<Cow<'static, str>>,
    pub ordered_list: Option<Cow<'static, str>>,
    pub unordered_list: Option<Markers>,
    pub escape: Option<EscapeMode>,
    pub url_escape: Option<UrlEscape>,
    pub emoji_escape: Option<EmojiEscape>,
    pub footnote_indent: Option<Cow<'static, str>>,
    pub auto_references: Option<bool>,
    pub dedup_references: Option<bool>,
    pub check_references: Option<CheckReferences>,
    pub heading_level: Option<usize>,
    pub list_level: Option<usize>,
    pub link_number_start: Option<usize>,
    pub footnote_number_start: Option<usize>,
}
