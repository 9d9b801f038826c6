//! Serenity-backed transport and the gateway-to-booklet reaction router.
//!
//! This is the only module that translates between the SDK-agnostic booklet
//! core and Serenity's types: outbound through [`SerenityTransport`], inbound
//! through [`ReactionRouter`], which the gateway event handler feeds and
//! booklet-launching commands register against.

use crate::book::page::{EmbedPage, Page};
use crate::book::transport::{
    ChannelId, MessageId, ReactionEvent, ReactionSink, Transport, TransportError, UserId,
};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::trace;

/// [`Transport`] implementation backed by Serenity's HTTP client.
#[derive(Clone)]
pub struct SerenityTransport {
    http: Arc<serenity::Http>,
}

impl SerenityTransport {
    /// Wraps a shared Serenity HTTP handle.
    #[must_use]
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

/// Maps Serenity errors onto the transport taxonomy the booklet loop keys
/// its recovery behavior off.
fn map_error(error: serenity::Error) -> TransportError {
    if let serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)) = &error {
        return match response.status_code.as_u16() {
            403 => TransportError::Forbidden,
            404 => TransportError::NotFound,
            _ => TransportError::Other(error.to_string()),
        };
    }
    TransportError::Other(error.to_string())
}

fn build_embed(embed: &EmbedPage) -> serenity::CreateEmbed {
    let mut builder = serenity::CreateEmbed::new().description(&embed.description);
    if let Some(title) = &embed.title {
        builder = builder.title(title);
    }
    if let Some(colour) = embed.colour {
        builder = builder.colour(colour);
    }
    if let Some(footer) = &embed.footer {
        builder = builder.footer(serenity::CreateEmbedFooter::new(footer));
    }
    builder
}

fn create_message(page: &Page) -> serenity::CreateMessage {
    match page {
        Page::Text(text) => serenity::CreateMessage::new().content(text),
        Page::Embed(embed) => serenity::CreateMessage::new().embed(build_embed(embed)),
    }
}

fn edit_message(page: &Page) -> serenity::EditMessage {
    match page {
        Page::Text(text) => serenity::EditMessage::new().content(text),
        Page::Embed(embed) => serenity::EditMessage::new().embed(build_embed(embed)),
    }
}

fn reaction(emoji: &str) -> serenity::ReactionType {
    serenity::ReactionType::Unicode(emoji.to_owned())
}

#[async_trait]
impl Transport for SerenityTransport {
    async fn send_page(
        &self,
        channel: ChannelId,
        page: &Page,
    ) -> Result<MessageId, TransportError> {
        let message = serenity::ChannelId::new(channel.get())
            .send_message(&self.http, create_message(page))
            .await
            .map_err(map_error)?;
        Ok(MessageId::new(message.id.get()))
    }

    async fn edit_page(
        &self,
        channel: ChannelId,
        message: MessageId,
        page: &Page,
    ) -> Result<(), TransportError> {
        serenity::ChannelId::new(channel.get())
            .edit_message(
                &self.http,
                serenity::MessageId::new(message.get()),
                edit_message(page),
            )
            .await
            .map_err(map_error)?;
        Ok(())
    }

    async fn delete_message(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), TransportError> {
        serenity::ChannelId::new(channel.get())
            .delete_message(&self.http, serenity::MessageId::new(message.get()))
            .await
            .map_err(map_error)
    }

    async fn add_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
    ) -> Result<(), TransportError> {
        serenity::ChannelId::new(channel.get())
            .create_reaction(
                &self.http,
                serenity::MessageId::new(message.get()),
                reaction(emoji),
            )
            .await
            .map_err(map_error)
    }

    async fn remove_reaction(
        &self,
        channel: ChannelId,
        message: MessageId,
        emoji: &str,
        user: UserId,
    ) -> Result<(), TransportError> {
        serenity::ChannelId::new(channel.get())
            .delete_reaction(
                &self.http,
                serenity::MessageId::new(message.get()),
                Some(serenity::UserId::new(user.get())),
                reaction(emoji),
            )
            .await
            .map_err(map_error)
    }

    async fn clear_reactions(
        &self,
        channel: ChannelId,
        message: MessageId,
    ) -> Result<(), TransportError> {
        serenity::ChannelId::new(channel.get())
            .delete_reactions(&self.http, serenity::MessageId::new(message.get()))
            .await
            .map_err(map_error)
    }
}

/// Routes gateway reaction events to the booklet that owns the message.
///
/// Commands register a booklet's sink under its message id right after the
/// booklet opens, and unregister it when the loop finishes. Events for
/// unregistered messages are dropped.
#[derive(Debug, Clone, Default)]
pub struct ReactionRouter {
    routes: Arc<Mutex<HashMap<MessageId, ReactionSink>>>,
}

impl ReactionRouter {
    /// An empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a booklet's sink for a message.
    pub fn register(&self, message: MessageId, sink: ReactionSink) {
        self.lock().insert(message, sink);
    }

    /// Removes a message's route.
    pub fn unregister(&self, message: MessageId) {
        self.lock().remove(&message);
    }

    /// Forwards an event to its booklet, if any. Routes whose booklet has
    /// gone away are pruned on the spot. Returns whether the event was
    /// delivered.
    pub fn dispatch(&self, event: ReactionEvent) -> bool {
        let mut routes = self.lock();
        let Some(sink) = routes.get(&event.message) else {
            trace!(message = %event.message, "no booklet for reaction");
            return false;
        };
        if sink.is_closed() {
            routes.remove(&event.message);
            return false;
        }
        sink.submit(event)
    }

    /// Number of live routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when no booklet is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<MessageId, ReactionSink>> {
        self.routes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Translates a gateway reaction into the booklet core's event type.
/// Non-unicode (custom guild) emoji are not booklet buttons and map to
/// `None`, as do reactions with no resolvable user.
#[must_use]
pub fn reaction_event_from(add_reaction: &serenity::Reaction) -> Option<ReactionEvent> {
    let serenity::ReactionType::Unicode(emoji) = &add_reaction.emoji else {
        return None;
    };
    let user = add_reaction.user_id?;
    Some(ReactionEvent {
        message: MessageId::new(add_reaction.message_id.get()),
        emoji: emoji.clone(),
        user: UserId::new(user.get()),
    })
}
