//! Cross-reference targets: reference-style link definitions and footnotes.
//!
//! Both kinds are identified by a [`RefId`] handed out at construction, not
//! by their content. Clones share the identity, so a target can be placed
//! in one part of the tree and referenced from many others; two targets with
//! the same URL stay distinct.

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::Node;

/// Identity of a link target or footnote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefId(u64);

impl RefId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        RefId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A reference-style link definition (`[n]: <url> "title"`).
///
/// Links point at it with [`Link::to_target`](super::Link::to_target); the
/// number is assigned while rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkTarget {
    id: RefId,
    pub href: String,
    pub title: Option<String>,
}

impl LinkTarget {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            id: RefId::next(),
            href: href.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn id(&self) -> RefId {
        self.id
    }
}

#[derive(Clone)]
struct FootnoteBody<X> {
    label: Option<String>,
    content: Vec<Node<X>>,
}

/// A footnote definition.
///
/// The body is shared behind an [`Arc`], so clones and the references
/// returned by [`Footnote::reference`] are cheap. Mutating a clone that
/// shares its body copies the body first; finish building before sharing.
pub struct Footnote<X = Infallible> {
    id: RefId,
    body: Arc<FootnoteBody<X>>,
}

impl<X> Footnote<X> {
    pub fn new(content: Vec<Node<X>>) -> Self {
        Self {
            id: RefId::next(),
            body: Arc::new(FootnoteBody {
                label: None,
                content,
            }),
        }
    }

    pub fn id(&self) -> RefId {
        self.id
    }

    /// Explicit label, used instead of an auto-assigned number.
    pub fn label(&self) -> Option<&str> {
        self.body.label.as_deref()
    }

    pub fn content(&self) -> &[Node<X>] {
        &self.body.content
    }

    /// An inline reference (`[^n]`) to this footnote.
    pub fn reference(&self) -> FootnoteRef<X> {
        FootnoteRef {
            footnote: self.clone(),
        }
    }
}

impl<X: Clone> Footnote<X> {
    pub fn with_id(mut self, label: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.body).label = Some(label.into());
        self
    }

    pub fn push(mut self, node: impl Into<Node<X>>) -> Self {
        Arc::make_mut(&mut self.body).content.push(node.into());
        self
    }
}

impl<X: Clone> Extend<Node<X>> for Footnote<X> {
    fn extend<I: IntoIterator<Item = Node<X>>>(&mut self, iter: I) {
        Arc::make_mut(&mut self.body).content.extend(iter);
    }
}

impl<X> Clone for Footnote<X> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            body: Arc::clone(&self.body),
        }
    }
}

impl<X> PartialEq for Footnote<X> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<X: fmt::Debug> fmt::Debug for Footnote<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Footnote")
            .field("id", &self.id)
            .field("label", &self.body.label)
            .field("content", &self.body.content)
            .finish()
    }
}

/// Inline reference to a [`Footnote`].
pub struct FootnoteRef<X = Infallible> {
    footnote: Footnote<X>,
}

impl<X> FootnoteRef<X> {
    pub fn footnote(&self) -> &Footnote<X> {
        &self.footnote
    }
}

impl<X> Clone for FootnoteRef<X> {
    fn clone(&self) -> Self {
        Self {
            footnote: self.footnote.clone(),
        }
    }
}

impl<X> PartialEq for FootnoteRef<X> {
    fn eq(&self, other: &Self) -> bool {
        self.footnote == other.footnote
    }
}

impl<X: fmt::Debug> fmt::Debug for FootnoteRef<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FootnoteRef").field(&self.footnote.id).finish()
    }
}
