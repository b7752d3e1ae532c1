//! Message component handling for the onboarding flow and settings menu.
//!
//! Onboarding is a linear three-step capture: focus area, then time window,
//! then frequency. Each button press writes one field to the store and edits
//! the message in place into the next step, so re-running `/start` simply
//! overwrites prior values. Menu buttons are read-only views, except the
//! message-source view which offers mode buttons.

use anyhow::Result;
use log::info;
use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;

use crate::core::preferences::{Category, FrequencyBand, NudgeMode, TimeWindow};
use crate::database::Database;

/// Handler for all message component interactions
pub struct MessageComponentHandler {
    database: Database,
}

impl MessageComponentHandler {
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Dispatch a component interaction by its `custom_id`.
    pub async fn handle_component_interaction(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let custom_id = interaction.data.custom_id.clone();
        let user_id = interaction.user.id.to_string();

        info!("Processing component interaction: {custom_id} from user: {user_id}");

        match custom_id.as_str() {
            id if id.starts_with("category_") => {
                self.handle_category_selection(ctx, interaction, id).await?;
            }
            id if id.starts_with("window_") => {
                self.handle_window_selection(ctx, interaction, id).await?;
            }
            id if id.starts_with("freq_") => {
                self.handle_frequency_selection(ctx, interaction, id).await?;
            }
            id if id.starts_with("mode_") => {
                self.handle_mode_selection(ctx, interaction, id).await?;
            }
            id if id.starts_with("view_") => {
                self.handle_view_buttons(ctx, interaction, id).await?;
            }
            _ => {
                interaction
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| {
                                message.content("Unknown component interaction.")
                            })
                    })
                    .await?;
            }
        }

        Ok(())
    }

    /// Step 1 of onboarding: store the focus area, advance to time window.
    async fn handle_category_selection(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        custom_id: &str,
    ) -> Result<()> {
        let user_id = interaction.user.id.to_string();
        let category = custom_id
            .strip_prefix("category_")
            .and_then(Category::parse)
            .unwrap_or_default();

        // The row may not exist if the user clicked a stale button
        self.database
            .upsert_user(&user_id, &interaction.user.name)
            .await?;
        self.database.set_category(&user_id, category).await?;

        self.edit_step(
            ctx,
            interaction,
            "✅ Focus area saved.\n\n**Choose your active time range:**",
            Self::create_window_buttons(),
        )
        .await
    }

    /// Step 2 of onboarding: store the time window, advance to frequency.
    async fn handle_window_selection(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        custom_id: &str,
    ) -> Result<()> {
        let user_id = interaction.user.id.to_string();
        let window = custom_id
            .strip_prefix("window_")
            .and_then(TimeWindow::parse)
            .unwrap_or_default();

        self.database
            .upsert_user(&user_id, &interaction.user.name)
            .await?;
        self.database.set_time_window(&user_id, window).await?;

        self.edit_step(
            ctx,
            interaction,
            "⏰ Time range saved.\n\n**How often do you want to receive nudges?**",
            Self::create_frequency_buttons(),
        )
        .await
    }

    /// Step 3 of onboarding: store the frequency band and finish the flow.
    async fn handle_frequency_selection(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        custom_id: &str,
    ) -> Result<()> {
        let user_id = interaction.user.id.to_string();
        let band = custom_id
            .strip_prefix("freq_")
            .and_then(FrequencyBand::parse)
            .unwrap_or_default();

        self.database
            .upsert_user(&user_id, &interaction.user.name)
            .await?;
        self.database.set_frequency(&user_id, band).await?;

        self.edit_step(
            ctx,
            interaction,
            "✅ You're all set!\n\nUse /startnudges to begin your nudges any time 🚀",
            CreateComponents::default(),
        )
        .await
    }

    /// Switch where nudge text comes from (built-in, custom, or mixed).
    async fn handle_mode_selection(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        custom_id: &str,
    ) -> Result<()> {
        let user_id = interaction.user.id.to_string();
        let mode = custom_id
            .strip_prefix("mode_")
            .and_then(NudgeMode::parse)
            .unwrap_or_default();

        self.database
            .upsert_user(&user_id, &interaction.user.name)
            .await?;
        self.database.set_nudge_mode(&user_id, mode).await?;

        self.edit_step(
            ctx,
            interaction,
            &format!("✅ Message source set to: **{}**", mode.label()),
            CreateComponents::default(),
        )
        .await
    }

    /// Read-only views of current settings from the /menu message.
    async fn handle_view_buttons(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        custom_id: &str,
    ) -> Result<()> {
        let user_id = interaction.user.id.to_string();
        let user = self.database.get_user(&user_id).await?;

        let Some(user) = user else {
            return self
                .edit_step(
                    ctx,
                    interaction,
                    "⚠️ No settings found. Please use /start to configure first.",
                    CreateComponents::default(),
                )
                .await;
        };

        match custom_id {
            "view_category" => {
                self.edit_step(
                    ctx,
                    interaction,
                    &format!("🧠 Your current focus area is: **{}**", user.category.label()),
                    CreateComponents::default(),
                )
                .await
            }
            "view_window" => {
                self.edit_step(
                    ctx,
                    interaction,
                    &format!(
                        "⏰ Your active time window is: **{}**",
                        user.time_window.label()
                    ),
                    CreateComponents::default(),
                )
                .await
            }
            "view_freq" => {
                self.edit_step(
                    ctx,
                    interaction,
                    &format!("⚙️ Your frequency is: **{}**", user.frequency.label()),
                    CreateComponents::default(),
                )
                .await
            }
            "view_mode" => {
                self.edit_step(
                    ctx,
                    interaction,
                    &format!(
                        "💬 Your message source is: **{}**\n\nPick a new one:",
                        user.nudge_mode.label()
                    ),
                    Self::create_mode_buttons(),
                )
                .await
            }
            _ => {
                self.edit_step(
                    ctx,
                    interaction,
                    "Unknown menu selection.",
                    CreateComponents::default(),
                )
                .await
            }
        }
    }

    /// Edit the interaction's message in place with new text and components.
    async fn edit_step(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        content: &str,
        components: CreateComponents,
    ) -> Result<()> {
        interaction
            .create_interaction_response(&ctx.http, |response| {
                response
                    .kind(InteractionResponseType::UpdateMessage)
                    .interaction_response_data(|message| {
                        message.content(content).set_components(components)
                    })
            })
            .await?;
        Ok(())
    }

    /// Onboarding step 1: focus area buttons
    pub fn create_category_buttons() -> CreateComponents {
        CreateComponents::default()
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("category_general")
                        .label("🧠 General")
                        .style(ButtonStyle::Secondary)
                })
                .create_button(|button| {
                    button
                        .custom_id("category_security")
                        .label("🛡️ Cybersecurity")
                        .style(ButtonStyle::Secondary)
                })
            })
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("category_both")
                        .label("🌐 Both")
                        .style(ButtonStyle::Secondary)
                })
            })
            .to_owned()
    }

    /// Onboarding step 2: time window buttons
    pub fn create_window_buttons() -> CreateComponents {
        CreateComponents::default()
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("window_morning")
                        .label("🕘 9AM–12PM")
                        .style(ButtonStyle::Secondary)
                })
                .create_button(|button| {
                    button
                        .custom_id("window_afternoon")
                        .label("🕐 1PM–5PM")
                        .style(ButtonStyle::Secondary)
                })
            })
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("window_fullday")
                        .label("⏰ 9AM–5PM")
                        .style(ButtonStyle::Secondary)
                })
            })
            .to_owned()
    }

    /// Onboarding step 3: frequency band buttons
    pub fn create_frequency_buttons() -> CreateComponents {
        CreateComponents::default()
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("freq_short")
                        .label("Every 15–30 min")
                        .style(ButtonStyle::Secondary)
                })
                .create_button(|button| {
                    button
                        .custom_id("freq_medium")
                        .label("Every 30 min – 2 hrs")
                        .style(ButtonStyle::Secondary)
                })
                .create_button(|button| {
                    button
                        .custom_id("freq_long")
                        .label("Every 2–4 hrs")
                        .style(ButtonStyle::Secondary)
                })
            })
            .to_owned()
    }

    /// Message source buttons shown from the menu's view_mode entry
    pub fn create_mode_buttons() -> CreateComponents {
        CreateComponents::default()
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("mode_standard")
                        .label("📚 Built-in")
                        .style(ButtonStyle::Secondary)
                })
                .create_button(|button| {
                    button
                        .custom_id("mode_custom")
                        .label("✍️ Mine only")
                        .style(ButtonStyle::Secondary)
                })
                .create_button(|button| {
                    button
                        .custom_id("mode_mixed")
                        .label("🔀 Mixed")
                        .style(ButtonStyle::Secondary)
                })
            })
            .to_owned()
    }

    /// Settings menu buttons
    pub fn create_menu_buttons() -> CreateComponents {
        CreateComponents::default()
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("view_category")
                        .label("🧠 My Focus Area")
                        .style(ButtonStyle::Primary)
                })
                .create_button(|button| {
                    button
                        .custom_id("view_window")
                        .label("⏰ My Time Window")
                        .style(ButtonStyle::Primary)
                })
            })
            .create_action_row(|row| {
                row.create_button(|button| {
                    button
                        .custom_id("view_freq")
                        .label("⚙️ Frequency")
                        .style(ButtonStyle::Primary)
                })
                .create_button(|button| {
                    button
                        .custom_id("view_mode")
                        .label("💬 Message Source")
                        .style(ButtonStyle::Primary)
                })
            })
            .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_ids(components: &CreateComponents) -> Vec<String> {
        // CreateComponents serializes to a JSON array of action rows
        let value = serenity::json::Value::from(components.0.clone());
        let mut ids = Vec::new();
        if let Some(rows) = value.as_array() {
            for row in rows {
                if let Some(buttons) = row.get("components").and_then(|c| c.as_array()) {
                    for button in buttons {
                        if let Some(id) = button.get("custom_id").and_then(|v| v.as_str()) {
                            ids.push(id.to_string());
                        }
                    }
                }
            }
        }
        ids
    }

    #[test]
    fn test_category_buttons_cover_all_variants() {
        let ids = custom_ids(&MessageComponentHandler::create_category_buttons());
        assert_eq!(ids, vec!["category_general", "category_security", "category_both"]);
    }

    #[test]
    fn test_window_buttons_cover_all_variants() {
        let ids = custom_ids(&MessageComponentHandler::create_window_buttons());
        assert_eq!(ids, vec!["window_morning", "window_afternoon", "window_fullday"]);
    }

    #[test]
    fn test_frequency_buttons_cover_all_variants() {
        let ids = custom_ids(&MessageComponentHandler::create_frequency_buttons());
        assert_eq!(ids, vec!["freq_short", "freq_medium", "freq_long"]);
    }

    #[test]
    fn test_every_button_suffix_parses() {
        for id in custom_ids(&MessageComponentHandler::create_category_buttons()) {
            assert!(Category::parse(id.strip_prefix("category_").unwrap()).is_some());
        }
        for id in custom_ids(&MessageComponentHandler::create_window_buttons()) {
            assert!(TimeWindow::parse(id.strip_prefix("window_").unwrap()).is_some());
        }
        for id in custom_ids(&MessageComponentHandler::create_frequency_buttons()) {
            assert!(FrequencyBand::parse(id.strip_prefix("freq_").unwrap()).is_some());
        }
        for id in custom_ids(&MessageComponentHandler::create_mode_buttons()) {
            assert!(NudgeMode::parse(id.strip_prefix("mode_").unwrap()).is_some());
        }
    }
}
