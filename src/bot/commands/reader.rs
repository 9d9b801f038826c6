//! Booklet-driven text display commands.
//!
//! These commands are the live demonstration of the pagination core: they
//! run caller-supplied text through the binder and leave a detached booklet
//! loop driving the resulting message.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        book::{BookBinder, transport::{ChannelId, UserId, reaction_channel}},
        bot::{BotData, bridge::SerenityTransport},
        errors::{Error, Result},
    };
    use std::sync::Arc;
    use tracing::{info, warn};

    /// Capacity of a booklet's reaction feed. Reactions arrive at human
    /// speed; anything beyond this means the booklet is hopelessly behind.
    const FEED_CAPACITY: usize = 32;

    /// Lays a block of text out into pages and displays it as a navigable
    /// booklet.
    #[poise::command(slash_command, prefix_command)]
    pub async fn preview(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Text to lay out into pages"]
        #[rest]
        text: String,
    ) -> Result<()> {
        let data = ctx.data();
        let settings = &data.config;

        let channel = ChannelId::new(ctx.channel_id().get());
        let requester = UserId::new(ctx.author().id.get());
        let bot_user = UserId::new(ctx.framework().bot_id.get());

        let binder = BookBinder::new(channel, requester, bot_user)
            .with_max_characters(settings.pagination.max_characters)
            .with_max_lines(settings.pagination.effective_max_lines())
            .with_prefix(settings.pagination.prefix.clone())
            .with_suffix(settings.pagination.suffix.clone())
            .with_timeout(settings.booklet.timeout())
            .with_owner_only(settings.booklet.owner_only)
            .add(text);

        let transport = SerenityTransport::new(Arc::clone(&ctx.serenity_context().http));
        let (sink, feed) = reaction_channel(FEED_CAPACITY);
        let mut booklet = binder.build(transport, feed)?;

        info!(
            user = %ctx.author().name,
            pages = booklet.page_count(),
            "opening preview booklet"
        );
        ctx.defer_ephemeral().await?;
        let message = booklet.open().await?;
        data.router.register(message, sink);
        ctx.say(format!(
            "Opened a booklet with {} page(s) below.",
            booklet.page_count()
        ))
        .await?;

        // The loop outlives the command invocation; failures are logged,
        // never surfaced to the requester.
        let router = data.router.clone();
        tokio::spawn(async move {
            match booklet.run().await {
                Ok(state) => info!(?state, "preview booklet finished"),
                Err(error) => warn!(%error, "preview booklet aborted"),
            }
            router.unregister(message);
        });

        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
