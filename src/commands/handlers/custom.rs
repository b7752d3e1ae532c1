//! Custom nudge message command handlers
//!
//! Handles: addnudge, mynudges
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
use crate::commands::slash::get_string_option;
use crate::core::preferences::NudgeMode;

/// Handler for the user's personal nudge message pool
pub struct CustomMessageHandler;

#[async_trait]
impl SlashCommandHandler for CustomMessageHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["addnudge", "mynudges"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "addnudge" => self.handle_add(&ctx, serenity_ctx, command).await,
            "mynudges" => self.handle_list_or_clear(&ctx, serenity_ctx, command).await,
            _ => Ok(()),
        }
    }
}

impl CustomMessageHandler {
    /// Handle /addnudge - append one message to the user's pool
    async fn handle_add(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();
        let message = get_string_option(&command.data.options, "message")
            .ok_or_else(|| anyhow::anyhow!("Missing message parameter"))?;

        ctx.database
            .upsert_user(&user_id, &command.user.name)
            .await?;
        ctx.database.add_custom_message(&user_id, &message).await?;

        let count = ctx.database.get_custom_messages(&user_id).await?.len();
        info!("User {user_id} added a custom nudge ({count} total)");

        let user = ctx.database.get_user(&user_id).await?;
        let mode_hint = match user.map(|u| u.nudge_mode) {
            Some(NudgeMode::Standard) | None => {
                "\nℹ️ Your nudges still come from the built-in pool. \
                 Switch the message source in /menu to use your own."
            }
            _ => "",
        };

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|msg| {
                        msg.content(format!(
                            "✅ Added! You now have **{count}** personal nudge{}.{mode_hint}",
                            if count == 1 { "" } else { "s" }
                        ))
                    })
            })
            .await?;

        Ok(())
    }

    /// Handle /mynudges - list the pool, or clear it
    async fn handle_list_or_clear(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();
        let action =
            get_string_option(&command.data.options, "action").unwrap_or_else(|| "list".to_string());

        let content = if action == "clear" {
            let cleared = ctx.database.clear_custom_messages(&user_id).await?;
            info!("User {user_id} cleared {cleared} custom nudges");
            format!(
                "🧹 Cleared **{cleared}** personal nudge{}.",
                if cleared == 1 { "" } else { "s" }
            )
        } else {
            let messages = ctx.database.get_custom_messages(&user_id).await?;
            if messages.is_empty() {
                "📋 You don't have any personal nudges yet.\n\nUse `/addnudge <message>` to add one!"
                    .to_string()
            } else {
                let mut listing = String::from("📋 **Your Personal Nudges:**\n\n");
                for (index, message) in messages.iter().enumerate() {
                    listing.push_str(&format!("**{}.** {message}\n", index + 1));
                }
                listing.push_str("\n*Use `/mynudges clear` to remove them all.*");
                listing
            }
        };

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|msg| msg.content(content))
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_message_handler_commands() {
        let handler = CustomMessageHandler;
        let names = handler.command_names();

        assert!(names.contains(&"addnudge"));
        assert!(names.contains(&"mynudges"));
        assert_eq!(names.len(), 2);
    }
}
