use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{ButtonsPerScreen, UserId, Voice};

/// Per-user display preferences of the pictogram board.
///
/// A user without stored settings is shown [`UserSettings::defaults`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserSettings {
    pub user_id: UserId,
    pub buttons_per_screen: ButtonsPerScreen,
    /// Group the board by category instead of one flat list.
    pub show_by_category: bool,
    pub voice: Voice,
    pub updated_at: NaiveDateTime,
}

impl UserSettings {
    /// Nine buttons per screen, a flat board and the female voice.
    pub fn defaults(user_id: UserId, updated_at: NaiveDateTime) -> Self {
        Self {
            user_id,
            buttons_per_screen: ButtonsPerScreen::default(),
            show_by_category: false,
            voice: Voice::default(),
            updated_at,
        }
    }
}
