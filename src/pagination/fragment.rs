//! Input units consumed by the paginator.

/// A unit of input to the [`Paginator`](crate::pagination::Paginator).
///
/// Fragments are immutable once added and consumed in order when pages are
/// computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// A run of text.
    Text {
        /// The text itself.
        content: String,
        /// When set, the text is never split on word boundaries; it is only
        /// hard-sliced as a last resort when it cannot fit on any page.
        locked: bool,
    },
    /// Forces a new page at this position regardless of remaining space.
    Break,
}

impl Fragment {
    /// Builds an ordinary (splittable) text fragment.
    pub fn text(content: impl Into<String>) -> Self {
        Fragment::Text {
            content: content.into(),
            locked: false,
        }
    }

    /// Builds a locked text fragment.
    pub fn locked(content: impl Into<String>) -> Self {
        Fragment::Text {
            content: content.into(),
            locked: true,
        }
    }
}
