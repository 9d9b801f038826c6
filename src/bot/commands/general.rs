//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require any booklet
//! machinery and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't touch any booklet
    /// state.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    ///
    /// This command provides users with information about all available bot
    /// commands and how booklet navigation works.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**Flipbook Help**\n\
        Here is a summary of all available commands for Flipbook.\n\n\
        **Commands**\n\
        • `/preview <text>` - Lays a block of text out into a navigable booklet.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.\n\n\
        **Booklet controls**\n\
        Booklets are driven by reacting to the message: ⏮ first, ◀ previous, \
        ▶ next, ⏭ last, ℹ control help, ⏹ close, 🗑 delete. By default only \
        the user who opened a booklet can turn its pages, and an idle booklet \
        closes itself after a while.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
