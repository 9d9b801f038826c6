//! Emoji-triggered actions wired into a booklet's interaction loop.

/// What a button press asks the booklet loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move to the given page index (taken modulo the page count, so
    /// handlers can express "previous" as `index + count - 1`).
    Goto(usize),
    /// Keep the current page.
    Stay,
    /// Display the inline control help once, then retire the help button.
    ShowHelp,
    /// Stop the loop, clear reactions, keep the message.
    Close,
    /// Stop the loop and delete the message.
    Delete,
}

/// Computes a [`Transition`] from the current page index and page count.
pub type ButtonHandler = fn(usize, usize) -> Transition;

/// Immutable association of a trigger emoji with a handler and a
/// human-readable name and description (shown by the help button).
#[derive(Debug, Clone)]
pub struct Button {
    emoji: String,
    name: String,
    description: String,
    handler: ButtonHandler,
    multi_page_only: bool,
}

impl Button {
    /// Builds a button. Navigation-style buttons that are meaningless on a
    /// single-page booklet should also call [`Button::multi_page_only`].
    pub fn new(
        emoji: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: ButtonHandler,
    ) -> Self {
        Self {
            emoji: emoji.into(),
            name: name.into(),
            description: description.into(),
            handler,
            multi_page_only: false,
        }
    }

    /// Marks this button as only meaningful when there is more than one page.
    /// Single-page booklets drop such buttons from their active set.
    #[must_use]
    pub fn multi_page_only(mut self, flag: bool) -> Self {
        self.multi_page_only = flag;
        self
    }

    /// The trigger emoji.
    #[must_use]
    pub fn emoji(&self) -> &str {
        &self.emoji
    }

    /// Short name shown in the control help.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// One-line description shown in the control help.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether this button is dropped on single-page booklets.
    #[must_use]
    pub fn is_multi_page_only(&self) -> bool {
        self.multi_page_only
    }

    /// Runs the handler against the current position.
    pub(crate) fn press(&self, index: usize, page_count: usize) -> Transition {
        (self.handler)(index, page_count)
    }
}

/// The default navigation set: first/previous/next/last/help/close/delete.
#[must_use]
pub fn default_buttons() -> Vec<Button> {
    vec![
        Button::new("⏮", "first", "Jump to the first page", |_, _| {
            Transition::Goto(0)
        })
        .multi_page_only(true),
        Button::new("◀", "previous", "Go back one page", |index, count| {
            Transition::Goto(index + count.saturating_sub(1))
        })
        .multi_page_only(true),
        Button::new("▶", "next", "Advance one page", |index, _| {
            Transition::Goto(index + 1)
        })
        .multi_page_only(true),
        Button::new("⏭", "last", "Jump to the last page", |_, count| {
            Transition::Goto(count.saturating_sub(1))
        })
        .multi_page_only(true),
        Button::new("ℹ", "help", "Show what each button does", |_, _| {
            Transition::ShowHelp
        })
        .multi_page_only(true),
        Button::new("⏹", "close", "Stop the booklet, keeping the message", |_, _| {
            Transition::Close
        }),
        Button::new("🗑", "delete", "Stop the booklet and delete the message", |_, _| {
            Transition::Delete
        }),
    ]
}
