use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::settings::UserSettings;
use crate::domain::types::{ButtonsPerScreen, UserId, Voice};

use super::FormError;

/// Display preferences submitted from the settings screen.
#[derive(Deserialize, Validate)]
pub struct UserSettingsForm {
    #[validate(range(min = 1, max = 48))]
    pub buttons_per_screen: i32,
    #[serde(default)]
    pub show_by_category: bool,
    #[validate(length(min = 1))]
    pub voice: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserSettingsFormPayload {
    pub buttons_per_screen: ButtonsPerScreen,
    pub show_by_category: bool,
    pub voice: Voice,
}

impl UserSettingsFormPayload {
    pub fn to_settings(&self, user_id: UserId) -> UserSettings {
        UserSettings {
            user_id,
            buttons_per_screen: self.buttons_per_screen,
            show_by_category: self.show_by_category,
            voice: self.voice,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<UserSettingsForm> for UserSettingsFormPayload {
    type Error = FormError;

    fn try_from(value: UserSettingsForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            buttons_per_screen: ButtonsPerScreen::new(value.buttons_per_screen)?,
            show_by_category: value.show_by_category,
            voice: Voice::parse(&value.voice)?,
        })
    }
}
