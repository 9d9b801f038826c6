//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the Flipbook application:
//! the slash commands, the Serenity/Poise framework wiring, and the bridge
//! that carries gateway reaction events into running booklets.

/// Serenity transport and the reaction router
pub mod bridge;
/// Discord command implementations (general, reader)
pub mod commands;

use crate::config::AppConfig;
use crate::errors;
use bridge::ReactionRouter;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{info, instrument};

/// Shared data available to all bot commands.
/// Holds the loaded configuration and the router that connects gateway
/// reaction events to running booklets.
pub struct BotData {
    /// Application configuration loaded at startup.
    pub config: Arc<AppConfig>,
    /// Live message-to-booklet reaction routes.
    pub router: ReactionRouter,
}

impl BotData {
    /// Creates the shared command context for the framework setup hook.
    #[must_use]
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            router: ReactionRouter::new(),
        }
    }
}

/// Error type Poise carries through command invocations.
pub type Error = errors::Error;
/// Poise context alias used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx.say(format!("An error occurred: {error}")).await {
                tracing::error!("Failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Feeds gateway reaction events into the router; everything else passes
/// through untouched.
async fn handle_event(
    _ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<(), Error> {
    if let serenity::FullEvent::ReactionAdd { add_reaction } = event {
        if let Some(reaction_event) = bridge::reaction_event_from(add_reaction) {
            data.router.dispatch(reaction_event);
        }
    }
    Ok(())
}

/// Builds the Poise framework, registers the slash commands globally, and
/// runs the gateway client until it stops.
///
/// # Errors
/// Returns the underlying Serenity error when the client cannot be built or
/// the gateway connection fails.
#[instrument(skip(token, config))]
pub async fn run_bot(token: String, config: Arc<AppConfig>) -> Result<(), serenity::Error> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::preview(),
            ],
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(handle_event(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(BotData::new(config))
            })
        })
        .build();

    // Reactions are the booklet input surface, so the reaction intents are
    // required alongside the usual message ones.
    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::GUILD_MESSAGE_REACTIONS
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await?;

    info!("Starting bot client...");
    if let Err(why) = client.start().await {
        tracing::error!("Client error: {why:?}");
        return Err(why);
    }
    Ok(())
}
