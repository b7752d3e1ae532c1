//! # Nudge Control Commands
//!
//! Activation, deactivation, and custom message management.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_startnudges_command(),
        create_stopnudges_command(),
        create_addnudge_command(),
        create_mynudges_command(),
    ]
}

fn create_startnudges_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("startnudges")
        .description("Activate your nudge schedule");
    command
}

fn create_stopnudges_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("stopnudges")
        .description("Stop all nudges until you start them again");
    command
}

fn create_addnudge_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("addnudge")
        .description("Add one of your own nudge messages")
        .create_option(|option| {
            option
                .name("message")
                .description("The nudge text to add to your personal pool")
                .kind(CommandOptionType::String)
                .required(true)
                .min_length(1)
                .max_length(500)
        });
    command
}

fn create_mynudges_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("mynudges")
        .description("List or clear your own nudge messages")
        .create_option(|option| {
            option
                .name("action")
                .description("What to do with your messages (default: list)")
                .kind(CommandOptionType::String)
                .required(false)
                .add_string_choice("List my messages", "list")
                .add_string_choice("Clear all my messages", "clear")
        });
    command
}
