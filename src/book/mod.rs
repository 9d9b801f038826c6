//! The booklet: a reaction-driven state machine that displays an ordered
//! sequence of pages as a single, navigable message.
//!
//! A booklet owns one displayed message and one inbound reaction feed. Its
//! event loop runs as a single logical task: wait for a qualifying reaction,
//! dispatch the matching button, re-render in place, repeat until a terminal
//! transition. All runtime failures inside the loop degrade to termination
//! rather than propagating to the caller, since the loop usually runs
//! detached from the command that created it.

/// Fluent builder combining a paginator with booklet options
pub mod binder;
/// Emoji buttons and their transitions
pub mod buttons;
/// Page payloads
pub mod page;
/// Host-SDK seam: transport trait and reaction feed
pub mod transport;

pub use binder::BookBinder;
pub use buttons::{Button, ButtonHandler, Transition, default_buttons};
pub use page::{EmbedPage, Page};
pub use transport::{
    ChannelId, MessageId, ReactionEvent, ReactionFeed, ReactionSink, Transport, TransportError,
    UserId, reaction_channel,
};

use crate::errors::{Error, Result};
use crate::pagination::DEFAULT_MAX_CHARACTERS;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Default inactivity timeout for a booklet's event loop.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Formats the page-number annotation from a zero-based index and the total
/// page count.
pub type Numbering = fn(usize, usize) -> String;

/// The default `Page X of N` annotation.
#[must_use]
pub fn default_numbering(index: usize, count: usize) -> String {
    format!("Page {} of {}", index + 1, count)
}

/// Lifecycle of a booklet.
///
/// `Running` persists across page changes; the terminal states record how the
/// loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookletState {
    /// Built but `start()` has not run.
    NotStarted,
    /// The event loop is live.
    Running,
    /// The inactivity timeout elapsed with no qualifying input.
    TimedOut,
    /// A close or delete button ended the loop.
    ClosedByUser,
    /// The displayed message vanished out-of-band, or the event feed closed.
    ClosedExternally,
}

/// Everything about a booklet that is plain data: where it posts, who may
/// drive it, and how it renders.
///
/// Keeping this a value type with `PartialEq` is what makes the fluent
/// builder and the all-arguments construction style provably equivalent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookletOptions {
    /// Channel the booklet posts into.
    pub channel: ChannelId,
    /// User who asked for the booklet.
    pub requester: UserId,
    /// The bot's own user id; its reactions are never dispatched.
    pub bot_user: UserId,
    /// Inactivity timeout, measured from the start of each wait. `None`
    /// waits forever.
    pub timeout: Option<Duration>,
    /// When set, only the requester's reactions qualify.
    pub owner_only: bool,
    /// Page index to open on (clamped to the last page).
    pub start_index: usize,
    /// Character budget used to decide whether the page-number annotation
    /// still fits on a text page.
    pub char_limit: usize,
    /// Page-number annotation formatter.
    pub numbering: Numbering,
}

impl BookletOptions {
    /// Options with the default timeout, owner-only policy, and numbering.
    #[must_use]
    pub fn new(channel: ChannelId, requester: UserId, bot_user: UserId) -> Self {
        Self {
            channel,
            requester,
            bot_user,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            owner_only: true,
            start_index: 0,
            char_limit: DEFAULT_MAX_CHARACTERS,
            numbering: default_numbering,
        }
    }
}

/// A paginated display session over one message.
pub struct Booklet<T: Transport> {
    pages: Vec<Page>,
    options: BookletOptions,
    buttons: Vec<Button>,
    transport: T,
    feed: ReactionFeed,
    state: BookletState,
    index: usize,
    message: Option<MessageId>,
    on_timeout: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl<T: Transport> Booklet<T> {
    /// Builds an unstarted booklet.
    ///
    /// An empty page list degrades to a single placeholder page. A
    /// single-page booklet drops navigation buttons and keeps only the
    /// close/delete affordances. `buttons` overrides the default navigation
    /// set when given.
    pub fn new(
        pages: Vec<Page>,
        options: BookletOptions,
        buttons: Option<Vec<Button>>,
        transport: T,
        feed: ReactionFeed,
    ) -> Self {
        let pages = if pages.is_empty() {
            vec![Page::text("*This booklet has no content.*")]
        } else {
            pages
        };
        let mut buttons = buttons.unwrap_or_else(default_buttons);
        if pages.len() <= 1 {
            buttons.retain(|button| !button.is_multi_page_only());
        }
        let index = options.start_index.min(pages.len() - 1);
        Self {
            pages,
            options,
            buttons,
            transport,
            feed,
            state: BookletState::NotStarted,
            index,
            message: None,
            on_timeout: None,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BookletState {
        self.state
    }

    /// Zero-based index of the page currently displayed (or about to be).
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Number of pages, placeholder included.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Id of the displayed message, once `open()` has rendered it.
    #[must_use]
    pub fn message_id(&self) -> Option<MessageId> {
        self.message
    }

    /// The options this booklet was built with.
    #[must_use]
    pub fn options(&self) -> &BookletOptions {
        &self.options
    }

    /// Registers a hook invoked exactly once if the loop ends by timeout.
    pub fn set_on_timeout(&mut self, hook: impl FnOnce() + Send + Sync + 'static) {
        self.on_timeout = Some(Box::new(hook));
    }

    /// Renders the opening page as a new message and attaches the reaction
    /// buttons. Leaves the booklet in `Running`, ready for [`Booklet::run`].
    ///
    /// # Errors
    /// [`Error::AlreadyStarted`] when the booklet was started before, and
    /// [`Error::Transport`] when the initial message cannot be sent (reaction
    /// attachment is best-effort and never fails the open).
    pub async fn open(&mut self) -> Result<MessageId> {
        if self.state != BookletState::NotStarted {
            return Err(Error::AlreadyStarted);
        }
        self.state = BookletState::Running;

        let opening = self.rendered(self.index);
        let message = match self.transport.send_page(self.options.channel, &opening).await {
            Ok(message) => message,
            Err(source) => {
                self.state = BookletState::ClosedExternally;
                return Err(Error::Transport(source));
            }
        };
        self.message = Some(message);
        debug!(
            message = %message,
            pages = self.pages.len(),
            "booklet opened"
        );

        for button in &self.buttons {
            if let Err(source) = self
                .transport
                .add_reaction(self.options.channel, message, button.emoji())
                .await
            {
                debug!(emoji = button.emoji(), %source, "could not attach button");
            }
        }
        Ok(message)
    }

    /// Runs the interaction loop to completion and returns the terminal
    /// state. Requires a prior successful [`Booklet::open`].
    ///
    /// # Errors
    /// [`Error::NotRunning`] when the booklet is not in the `Running` state.
    /// Failures inside the loop never surface as errors; they terminate the
    /// loop with the appropriate state instead.
    pub async fn run(&mut self) -> Result<BookletState> {
        if self.state != BookletState::Running {
            return Err(Error::NotRunning);
        }

        let terminal = loop {
            let waited = match self.options.timeout {
                Some(limit) => tokio::time::timeout(limit, self.next_qualifying()).await,
                None => Ok(self.next_qualifying().await),
            };

            let event = match waited {
                Err(_elapsed) => {
                    self.clear_reactions_best_effort().await;
                    if let Some(hook) = self.on_timeout.take() {
                        hook();
                    }
                    break BookletState::TimedOut;
                }
                Ok(None) => break BookletState::ClosedExternally,
                Ok(Some(event)) => event,
            };

            // Cosmetic: take the user's reaction back off so the button
            // reads as pressable again.
            self.remove_reaction_best_effort(&event).await;

            let transition = {
                let Some(button) = self
                    .buttons
                    .iter()
                    .find(|button| button.emoji() == event.emoji)
                else {
                    continue;
                };
                button.press(self.index, self.pages.len())
            };
            trace!(emoji = %event.emoji, user = %event.user, ?transition, "button pressed");

            match transition {
                Transition::Stay => {}
                Transition::Goto(target) => {
                    self.index = target % self.pages.len();
                    let page = self.rendered(self.index);
                    if !self.edit_to(&page).await {
                        break BookletState::ClosedExternally;
                    }
                }
                Transition::ShowHelp => {
                    let help = self.help_page();
                    if !self.edit_to(&help).await {
                        break BookletState::ClosedExternally;
                    }
                    self.retire_button(&event.emoji).await;
                }
                Transition::Close => {
                    self.clear_reactions_best_effort().await;
                    break BookletState::ClosedByUser;
                }
                Transition::Delete => {
                    self.delete_message_best_effort().await;
                    break BookletState::ClosedByUser;
                }
            }
        };

        self.state = terminal;
        debug!(state = ?terminal, "booklet finished");
        Ok(terminal)
    }

    /// `open()` followed by `run()`: renders the first page and drives the
    /// interaction loop until a terminal state.
    ///
    /// # Errors
    /// Same conditions as [`Booklet::open`].
    pub async fn start(&mut self) -> Result<BookletState> {
        self.open().await?;
        self.run().await
    }

    /// Waits for the next event that targets this booklet's message with a
    /// registered button emoji, from a permitted user. Non-qualifying events
    /// are discarded without resetting the caller's timeout.
    async fn next_qualifying(&mut self) -> Option<ReactionEvent> {
        loop {
            let event = self.feed.next().await?;
            if self.qualifies(&event) {
                return Some(event);
            }
            trace!(emoji = %event.emoji, user = %event.user, "ignoring reaction");
        }
    }

    fn qualifies(&self, event: &ReactionEvent) -> bool {
        if self.message != Some(event.message) {
            return false;
        }
        if event.user == self.options.bot_user {
            return false;
        }
        if self.options.owner_only && event.user != self.options.requester {
            return false;
        }
        self.buttons.iter().any(|button| button.emoji() == event.emoji)
    }

    /// The page at `index`, annotated with the page number when there is
    /// more than one page and the annotation fits.
    fn rendered(&self, index: usize) -> Page {
        let Some(page) = self.pages.get(index) else {
            return Page::text("*This booklet has no content.*");
        };
        if self.pages.len() <= 1 {
            return page.clone();
        }
        let annotation = (self.options.numbering)(index, self.pages.len());
        page.with_annotation(&annotation, self.options.char_limit)
    }

    /// Inline help listing the active buttons.
    fn help_page(&self) -> Page {
        let mut help = String::from("**Booklet controls**\n");
        for button in &self.buttons {
            help.push_str(&format!(
                "{} `{}` — {}\n",
                button.emoji(),
                button.name(),
                button.description()
            ));
        }
        Page::Text(help)
    }

    /// Edits the displayed message in place. Returns `false` when the message
    /// is gone and the loop should wind down; other failures are logged and
    /// the loop keeps running with stale content.
    async fn edit_to(&self, page: &Page) -> bool {
        let Some(message) = self.message else {
            return false;
        };
        match self
            .transport
            .edit_page(self.options.channel, message, page)
            .await
        {
            Ok(()) => true,
            Err(TransportError::NotFound) => {
                debug!(%message, "displayed message vanished, closing booklet");
                false
            }
            Err(source) => {
                warn!(%message, %source, "page edit failed, keeping loop alive");
                true
            }
        }
    }

    /// Drops a button from the active set and takes the bot's own reaction
    /// for it off the message.
    async fn retire_button(&mut self, emoji: &str) {
        self.buttons.retain(|button| button.emoji() != emoji);
        let Some(message) = self.message else {
            return;
        };
        if let Err(source) = self
            .transport
            .remove_reaction(self.options.channel, message, emoji, self.options.bot_user)
            .await
        {
            debug!(emoji, %source, "could not retire button reaction");
        }
    }

    async fn remove_reaction_best_effort(&self, event: &ReactionEvent) {
        let Some(message) = self.message else {
            return;
        };
        if let Err(source) = self
            .transport
            .remove_reaction(self.options.channel, message, &event.emoji, event.user)
            .await
        {
            debug!(emoji = %event.emoji, %source, "could not remove reaction");
        }
    }

    async fn clear_reactions_best_effort(&self) {
        let Some(message) = self.message else {
            return;
        };
        if let Err(source) = self
            .transport
            .clear_reactions(self.options.channel, message)
            .await
        {
            debug!(%message, %source, "could not clear reactions");
        }
    }

    async fn delete_message_best_effort(&self) {
        let Some(message) = self.message else {
            return;
        };
        if let Err(source) = self
            .transport
            .delete_message(self.options.channel, message)
            .await
        {
            debug!(%message, %source, "could not delete message");
        }
    }
}
