//! # Start Command
//!
//! Entry point of the conversational onboarding flow.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_start_command()]
}

fn create_start_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("start")
        .description("Set up your nudges: focus area, time window, and frequency");
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_start_command() {
        let commands = create_commands();
        assert_eq!(commands.len(), 1);

        let start = &commands[0];
        let name = start.0.get("name").unwrap().as_str().unwrap();
        assert_eq!(name, "start");
    }
}
