//! Nudge activation command handlers
//!
//! Handles: startnudges, stopnudges
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;

/// Handler for turning the nudge schedule on and off
pub struct NudgeControlHandler;

#[async_trait]
impl SlashCommandHandler for NudgeControlHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["startnudges", "stopnudges"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "startnudges" => self.handle_start(&ctx, serenity_ctx, command).await,
            "stopnudges" => self.handle_stop(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl NudgeControlHandler {
    /// Handle /startnudges - mark the user active and arm a chain.
    ///
    /// Works without prior onboarding: the upsert creates the row and the
    /// unset fields read back as defaults (general / full day / medium).
    async fn handle_start(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();
        let had_settings = ctx.database.get_user(&user_id).await?.is_some();
        let was_running = ctx.scheduler.is_scheduled(command.user.id.0);

        ctx.database
            .upsert_user(&user_id, &command.user.name)
            .await?;
        ctx.database.set_active(&user_id, true).await?;
        ctx.scheduler
            .start_nudges(serenity_ctx.http.clone(), command.user.id.0);

        info!("Nudges activated for user {user_id}");

        let mut content = if was_running {
            String::from("🔁 Nudges were already running — I've restarted your schedule.")
        } else {
            String::from("✅ Nudges activated! I'll ping you randomly within your set window.")
        };
        if !had_settings {
            content.push_str(
                "\nℹ️ You hadn't completed setup — I'm using defaults. Run /start to customize.",
            );
        }

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content(content))
            })
            .await?;

        Ok(())
    }

    /// Handle /stopnudges - clear the active flag, then cancel the timer.
    ///
    /// Order matters: the stored flag is cleared first so a fire already in
    /// flight sees it and refuses to re-arm even if the abort loses the race.
    async fn handle_stop(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();

        ctx.database.set_active(&user_id, false).await?;
        ctx.scheduler.stop_nudges(command.user.id.0);

        info!("Nudges stopped for user {user_id}");

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| message.content("🛑 Nudges stopped."))
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nudge_control_handler_commands() {
        let handler = NudgeControlHandler;
        let names = handler.command_names();

        assert!(names.contains(&"startnudges"));
        assert!(names.contains(&"stopnudges"));
        assert_eq!(names.len(), 2);
    }
}
