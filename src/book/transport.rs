//! The seam between the booklet state machine and the hosting chat SDK.
//!
//! Outbound operations go through the [`Transport`] trait; inbound reaction
//! events arrive over an explicit channel ([`reaction_channel`]). Nothing in
//! this module knows about Discord, which is what lets the whole state
//! machine run against a fake transport in tests.

use crate::book::page::Page;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Identifies a chat channel, decoupled from any SDK's id types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u64);

/// Identifies a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

/// Identifies a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(u64);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            /// Wraps a raw snowflake.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// The raw snowflake.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

impl_id!(ChannelId);
impl_id!(MessageId);
impl_id!(UserId);

/// A reaction-added event as seen by a booklet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    /// The message the reaction landed on.
    pub message: MessageId,
    /// The reaction emoji (unicode form).
    pub emoji: String,
    /// Who reacted.
    pub user: UserId,
}

/// Failure taxonomy for transport operations.
///
/// The booklet loop keys its recovery behavior off these variants: `NotFound`
/// means the displayed message is gone and the loop must wind down, while
/// `Forbidden` on cosmetic reaction management is swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The target message or channel no longer exists.
    #[error("message or channel no longer exists")]
    NotFound,

    /// The bot lacks permission for the requested operation.
    #[error("missing permission for the requested operation")]
    Forbidden,

    /// Any other delivery failure.
    #[error("transport failure: {0}")]
    Other(String),
}

/// Outbound message operations a booklet needs from its host.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Posts a page as a new message and returns its id.
    async fn send_page(&self, channel: ChannelId, page: &Page)
    -> Result<MessageId, TransportError>;

    /// Replaces an existing message's content with a page.
    async fn edit_page(
        &self,
        channel: ChannelId,
        message: MessageId,
        page: &Page,
    ) -> Result<(), TransportError>;

    /// Deletes a message.
    async fn delete_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), TransportError>;

    /// Adds the bot's own reaction to a message.
    async fn add_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> Result<(), TransportError>;

    /// Removes one user's reaction from a message.
    async fn remove_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
        user: UserId,
    ) -> Result<(), TransportError>;

    /// Removes every reaction from a message.
    async fn clear_reactions(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), TransportError>;
}

/// Creates the submit/await pair a booklet uses to receive reaction events.
///
/// The sink side lives with the host integration (or a test); the feed side
/// is handed to the booklet, which owns it exclusively. Dropping every sink
/// reads as external closure on the feed side.
#[must_use]
pub fn reaction_channel(capacity: usize) -> (ReactionSink, ReactionFeed) {
    let (tx, rx) = mpsc::channel(capacity);
    (ReactionSink { tx }, ReactionFeed { rx })
}

/// Submit half of a booklet's reaction feed.
#[derive(Debug, Clone)]
pub struct ReactionSink {
    tx: mpsc::Sender<ReactionEvent>,
}

impl ReactionSink {
    /// Submits an event without blocking.
    ///
    /// Returns `false` when the event was dropped because the feed is full or
    /// the booklet has gone away. A full feed means the booklet is already
    /// far behind on input, so dropping is the right call.
    pub fn submit(&self, event: ReactionEvent) -> bool {
        self.tx.try_send(event).is_ok()
    }

    /// True when the receiving booklet has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receive half of a booklet's reaction feed.
#[derive(Debug)]
pub struct ReactionFeed {
    rx: mpsc::Receiver<ReactionEvent>,
}

impl ReactionFeed {
    /// Waits for the next submitted event. `None` means every sink is gone.
    pub async fn next(&mut self) -> Option<ReactionEvent> {
        self.rx.recv().await
    }
}
