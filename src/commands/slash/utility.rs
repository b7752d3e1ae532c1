//! # Utility Commands
//!
//! Help text and the personal settings menu.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_help_command(), create_menu_command()]
}

fn create_help_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("help")
        .description("Show help and how to use this bot");
    command
}

fn create_menu_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("menu")
        .description("View your current nudge settings");
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_utility_commands() {
        let commands = create_commands();
        assert_eq!(commands.len(), 2);

        let help = commands[0].0.get("name").unwrap().as_str().unwrap();
        assert_eq!(help, "help");
        let menu = commands[1].0.get("name").unwrap().as_str().unwrap();
        assert_eq!(menu, "menu");
    }
}
