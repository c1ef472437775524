//! Error types for mdscribe operations.

use std::fmt;

use thiserror::Error;

use crate::ir::RefId;

/// Errors that can occur while rendering or importing a document.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    Import(String),

    /// A link points at a heading that has no id to link to.
    #[error("Link to a heading without an id: {heading}")]
    HeadingWithoutId { heading: String },

    /// An explicit footnote id that cannot be written inside `[^...]`.
    #[error("Footnote id `{id}` cannot be used as a label: it must be non-empty, without whitespace, brackets or backslashes")]
    InvalidFootnoteId { id: String },

    /// An extension value reached a renderer that does not know it.
    #[error("Cannot render value of type `{type_name}`: no extension renderer handles it")]
    Unrenderable { type_name: &'static str },

    /// Reference validation failed and no handler was supplied.
    ///
    /// The rendered output is kept so callers can still inspect it.
    #[error("{}", summarize(.errors))]
    References {
        output: String,
        errors: Vec<ReferenceError>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a reference validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceErrorKind {
    LinkReferenceMissing,
    LinkReferenceNotUsed,
    LinkReferenceDuplicate,
    FootnoteMissing,
    FootnoteNotUsed,
    FootnoteDuplicate,
}

impl ReferenceErrorKind {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::LinkReferenceMissing => "LINK_REFERENCE_MISSING",
            Self::LinkReferenceNotUsed => "LINK_REFERENCE_NOT_USED",
            Self::LinkReferenceDuplicate => "LINK_REFERENCE_DUPLICATE",
            Self::FootnoteMissing => "FOOTNOTE_MISSING",
            Self::FootnoteNotUsed => "FOOTNOTE_NOT_USED",
            Self::FootnoteDuplicate => "FOOTNOTE_DUPLICATE",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::LinkReferenceMissing => "Link reference missing",
            Self::LinkReferenceNotUsed => "Reference not used",
            Self::LinkReferenceDuplicate => "Link reference duplicated",
            Self::FootnoteMissing => "Footnote missing",
            Self::FootnoteNotUsed => "Footnote not used",
            Self::FootnoteDuplicate => "Footnote duplicated",
        }
    }
}

impl fmt::Display for ReferenceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single problem found while validating link targets and footnotes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceError {
    pub kind: ReferenceErrorKind,
    /// Human-readable message with a short preview of the definition.
    pub message: String,
    /// Identity of the offending link target or footnote.
    pub target: RefId,
}

impl ReferenceError {
    pub(crate) fn new(kind: ReferenceErrorKind, preview: &str, target: RefId) -> Self {
        Self {
            kind,
            message: format!("{}: {preview}", kind.label()),
            target,
        }
    }
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ReferenceError {}

fn summarize(errors: &[ReferenceError]) -> String {
    let mut msg = format!(
        "{} reference error(s) while rendering and no error handler was given:",
        errors.len()
    );
    for error in errors {
        msg.push_str("\n- ");
        msg.push_str(&error.message);
    }
    msg
}
