//! Shared test utilities for `Flipbook`.
//!
//! This module provides a recording fake transport and booklet constructors
//! with sensible defaults, so state-machine tests can drive a full booklet
//! without any network or chat SDK.

#![allow(clippy::unwrap_used)]

use crate::book::page::Page;
use crate::book::transport::{
    ChannelId, MessageId, ReactionEvent, ReactionFeed, ReactionSink, Transport, TransportError,
    UserId, reaction_channel,
};
use crate::book::{Booklet, BookletOptions};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Channel every test booklet posts into.
pub const CHANNEL: ChannelId = ChannelId::new(100);
/// Id the fake transport assigns to the first sent message.
pub const MESSAGE: MessageId = MessageId::new(1);
/// The bot's own user id.
pub const BOT: UserId = UserId::new(1);
/// The user who requested the booklet.
pub const REQUESTER: UserId = UserId::new(7);
/// Some unrelated user, for permission-policy tests.
pub const OTHER_USER: UserId = UserId::new(8);

/// One recorded transport operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    /// A page was sent as a new message.
    Send {
        /// Target channel.
        channel: ChannelId,
        /// Rendered text (embed pages record their description).
        content: String,
    },
    /// A message was edited in place.
    Edit {
        /// Target message.
        message: MessageId,
        /// New rendered text.
        content: String,
    },
    /// A message was deleted.
    Delete {
        /// Target message.
        message: MessageId,
    },
    /// The bot attached a reaction.
    AddReaction {
        /// Target message.
        message: MessageId,
        /// The emoji.
        emoji: String,
    },
    /// One user's reaction was removed.
    RemoveReaction {
        /// Target message.
        message: MessageId,
        /// The emoji.
        emoji: String,
        /// Whose reaction was removed.
        user: UserId,
    },
    /// Every reaction was cleared.
    ClearReactions {
        /// Target message.
        message: MessageId,
    },
}

/// Fake [`Transport`] that records every operation and can be scripted to
/// fail edits or reaction management.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    calls: Arc<Mutex<Vec<Call>>>,
    next_message_id: Arc<AtomicU64>,
    edit_failure: Arc<Mutex<Option<TransportError>>>,
    reaction_failure: Arc<Mutex<Option<TransportError>>>,
}

impl RecordingTransport {
    /// Creates a transport with no scripted failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Makes every subsequent edit fail with the given error.
    pub fn fail_edits_with(&self, error: TransportError) {
        *self.edit_failure.lock().unwrap() = Some(error);
    }

    /// Makes every subsequent reaction operation fail with the given error.
    pub fn fail_reactions_with(&self, error: TransportError) {
        *self.reaction_failure.lock().unwrap() = Some(error);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn reaction_failure(&self) -> Option<TransportError> {
        self.reaction_failure.lock().unwrap().clone()
    }
}

fn render(page: &Page) -> String {
    match page {
        Page::Text(text) => text.clone(),
        Page::Embed(embed) => embed.description.clone(),
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_page(
        &self,
        channel: ChannelId,
        page: &Page,
    ) -> Result<MessageId, TransportError> {
        self.record(Call::Send {
            channel,
            content: render(page),
        });
        let id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(MessageId::new(id))
    }

    async fn edit_page(
        &self,
        _channel: ChannelId,
        message: MessageId,
        page: &Page,
    ) -> Result<(), TransportError> {
        if let Some(error) = self.edit_failure.lock().unwrap().clone() {
            return Err(error);
        }
        self.record(Call::Edit {
            message,
            content: render(page),
        });
        Ok(())
    }

    async fn delete_message(
        &self,
        _channel: ChannelId,
        message: MessageId,
    ) -> Result<(), TransportError> {
        self.record(Call::Delete { message });
        Ok(())
    }

    async fn add_reaction(
        &self,
        _channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> Result<(), TransportError> {
        if let Some(error) = self.reaction_failure() {
            return Err(error);
        }
        self.record(Call::AddReaction {
            message,
            emoji: emoji.to_owned(),
        });
        Ok(())
    }

    async fn remove_reaction(
        &self,
        _channel: ChannelId,
        message: MessageId,
        emoji: &str,
        user: UserId,
    ) -> Result<(), TransportError> {
        if let Some(error) = self.reaction_failure() {
            return Err(error);
        }
        self.record(Call::RemoveReaction {
            message,
            emoji: emoji.to_owned(),
            user,
        });
        Ok(())
    }

    async fn clear_reactions(
        &self,
        _channel: ChannelId,
        message: MessageId,
    ) -> Result<(), TransportError> {
        if let Some(error) = self.reaction_failure() {
            return Err(error);
        }
        self.record(Call::ClearReactions { message });
        Ok(())
    }
}

/// Standard test options: no timeout, owner-only, default numbering.
/// Timeout-driven tests opt in explicitly.
#[must_use]
pub fn booklet_options() -> BookletOptions {
    let mut options = BookletOptions::new(CHANNEL, REQUESTER, BOT);
    options.timeout = None;
    options
}

/// Builds a text-page booklet over a fresh recording transport.
/// Returns the booklet, the event sink that drives it, and the transport.
#[must_use]
pub fn test_booklet(
    pages: &[&str],
) -> (Booklet<RecordingTransport>, ReactionSink, RecordingTransport) {
    test_booklet_with(pages, |_| {})
}

/// Like [`test_booklet`], with an options tweak applied before construction.
pub fn test_booklet_with(
    pages: &[&str],
    tweak: impl FnOnce(&mut BookletOptions),
) -> (Booklet<RecordingTransport>, ReactionSink, RecordingTransport) {
    let mut options = booklet_options();
    tweak(&mut options);
    let transport = RecordingTransport::new();
    let (sink, feed) = reaction_channel(32);
    let pages = pages.iter().map(|page| Page::text(*page)).collect();
    let booklet = Booklet::new(pages, options, None, transport.clone(), feed);
    (booklet, sink, transport)
}

/// A feed with no live sink, for tests that only build booklets.
#[must_use]
pub fn test_feed() -> ReactionFeed {
    reaction_channel(8).1
}

/// Submits a reaction from the requester on the standard test message.
pub fn press(sink: &ReactionSink, emoji: &str) {
    assert!(sink.submit(ReactionEvent {
        message: MESSAGE,
        emoji: emoji.to_owned(),
        user: REQUESTER,
    }));
}
