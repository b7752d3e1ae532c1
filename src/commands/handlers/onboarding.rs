//! Onboarding command handler
//!
//! Handles: start
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
use crate::message_components::MessageComponentHandler;

/// Handler for the /start onboarding entry point
pub struct OnboardingHandler;

#[async_trait]
impl SlashCommandHandler for OnboardingHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id.to_string();
        let display_name = command.user.name.clone();

        // Re-running /start restarts the capture; selections overwrite
        // whatever was stored before.
        ctx.database.upsert_user(&user_id, &display_name).await?;
        info!("Onboarding started for user {user_id} ({display_name})");

        command
            .create_interaction_response(&serenity_ctx.http, |response| {
                response
                    .kind(InteractionResponseType::ChannelMessageWithSource)
                    .interaction_response_data(|message| {
                        message
                            .content(format!(
                                "👋 Hi {display_name}! Welcome to **NudgeBot**.\n\n\
                                 Let's get you started.\n\n**Choose your focus area:**"
                            ))
                            .set_components(MessageComponentHandler::create_category_buttons())
                    })
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onboarding_handler_commands() {
        let handler = OnboardingHandler;
        assert_eq!(handler.command_names(), &["start"]);
    }
}
