//! Top-level slash command dispatcher
//!
//! Owns the handler registry and the shared [`CommandContext`]; the gateway
//! event handler forwards every application command interaction here.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use log::{debug, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handlers::{
    CustomMessageHandler, NudgeControlHandler, OnboardingHandler, UtilityHandler,
};
use crate::commands::registry::CommandRegistry;
use crate::database::Database;
use crate::features::nudges::NudgeScheduler;

/// Dispatches slash commands to their registered handlers
#[derive(Clone)]
pub struct CommandHandler {
    context: Arc<CommandContext>,
    registry: CommandRegistry,
}

impl CommandHandler {
    pub fn new(database: Database, scheduler: Arc<NudgeScheduler>) -> Self {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(OnboardingHandler));
        registry.register(Arc::new(NudgeControlHandler));
        registry.register(Arc::new(CustomMessageHandler));
        registry.register(Arc::new(UtilityHandler));

        CommandHandler {
            context: Arc::new(CommandContext::new(database, scheduler)),
            registry,
        }
    }

    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let name = command.data.name.as_str();
        debug!("Dispatching slash command /{name} from user {}", command.user.id);

        if let Some(handler) = self.registry.get(name) {
            handler.handle(Arc::clone(&self.context), ctx, command).await
        } else {
            warn!("No handler registered for command /{name}");
            command
                .create_interaction_response(&ctx.http, |response| {
                    response
                        .kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|message| {
                            message.content("❓ Unknown command. Try /help.")
                        })
                })
                .await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_all_defined_commands_have_handlers() {
        let database = Database::new(":memory:").await.unwrap();
        let scheduler = Arc::new(NudgeScheduler::new(database.clone()));
        let handler = CommandHandler::new(database, scheduler);

        for name in [
            "start",
            "startnudges",
            "stopnudges",
            "addnudge",
            "mynudges",
            "help",
            "menu",
        ] {
            assert!(
                handler.registry.contains(name),
                "no handler registered for /{name}"
            );
        }
    }
}
