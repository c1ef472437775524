//! # mdscribe
//!
//! Build Markdown documents from a typed node tree.
//!
//! ## Features
//!
//! - Context-aware escaping: text renders literally, wherever it lands
//! - Reference-style links and footnotes, numbered in reading order, with
//!   unplaced definitions appended and misuse reported
//! - Bounded previews that render only the requested prefix
//! - Pipe tables, lists, task lists, definitions, code blocks
//! - Extension values rendered by a caller-supplied [`Extension`]
//!
//! ## Quick Start
//!
//! ```
//! use mdscribe::{Node, blocks, inlines, md};
//!
//! let note = md::footnote(mdscribe::nodes!["Counted from one."]);
//! let doc: Node = md::section(
//!     Some(md::h("Notes")),
//!     blocks![
//!         md::p(inlines!["Stars like *this* stay literal", note.reference()]),
//!         md::codeblock("let x = 1;").with_language("rust"),
//!     ],
//! )
//! .into();
//!
//! assert_eq!(
//!     mdscribe::render(&doc).unwrap(),
//!     "\n# Notes\n\nStars like \\*this\\* stay literal[^1]\n\n```rust\nlet x = 1;\n```\n\n[^1]: Counted from one.\n"
//! );
//! ```
//!
//! ## Configuration
//!
//! Markers, escaping and reference handling are set through [`Config`].
//! [`ConfigOverrides`] carries sparse changes, for example from a JSON
//! document:
//!
//! ```
//! use mdscribe::{Config, ConfigOverrides, Node, Renderer, md};
//!
//! let overrides = ConfigOverrides {
//!     bold: Some("__".into()),
//!     ..Default::default()
//! };
//! let doc: Node = md::b("strong").into();
//! let out = Renderer::new().with_overrides(&overrides).render(&doc).unwrap();
//! assert_eq!(out, "__strong__");
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod ir;
pub mod markdown;
pub mod md;
pub mod render;

#[cfg(feature = "json")]
pub mod import;

pub use config::{CheckReferences, Config, ConfigOverrides, EmojiEscape, EscapeMode, UrlEscape};
pub use document::{Renderer, render, render_with};
pub use error::{Error, ReferenceError, ReferenceErrorKind, Result};
pub use ir::{Block, Inline, IntoInlines, Node};
pub use render::{Budget, Extension, ExtensionContext, Rendered, Unsupported};
