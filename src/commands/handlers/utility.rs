//! Utility command handlers
//!
//! Handles: help, menu
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::message_components::MessageComponentHandler;

const HELP_TEXT: &str = "🧾 **NudgeBot Help**\n\n\
This bot DMs you random motivational reminders within your chosen time window.\n\n\
• `/start` — pick your focus area, time window, and frequency\n\
• `/startnudges` — activate your nudge schedule\n\
• `/stopnudges` — stop all nudges\n\
• `/menu` — view and tweak your settings\n\
• `/addnudge` — add your own nudge messages\n\
• `/mynudges` — list or clear your messages";

/// Handler for help and the settings menu
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["help", "menu"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "help" => {
                command
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| message.content(HELP_TEXT))
                    })
                    .await?;
                Ok(())
            }
            "menu" => {
                command
                    .create_interaction_response(&serenity_ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message
                                    .content("Here's your menu:")
                                    .set_components(
                                        MessageComponentHandler::create_menu_buttons(),
                                    )
                            })
                    })
                    .await?;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_handler_commands() {
        let handler = UtilityHandler;
        let names = handler.command_names();

        assert!(names.contains(&"help"));
        assert!(names.contains(&"menu"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_help_text_mentions_every_command() {
        for command in ["/start", "/startnudges", "/stopnudges", "/menu", "/addnudge", "/mynudges"] {
            assert!(HELP_TEXT.contains(command), "help missing {command}");
        }
    }
}
