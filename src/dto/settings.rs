use serde::Serialize;

use crate::domain::settings::UserSettings;
use crate::domain::types::Voice;

/// Display preferences as shown to the board. `stored` is false while the
/// defaults are in effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSettingsDto {
    pub user_id: i32,
    pub buttons_per_screen: i32,
    pub show_by_category: bool,
    pub voice: Voice,
    pub stored: bool,
}

impl UserSettingsDto {
    pub fn new(settings: UserSettings, stored: bool) -> Self {
        Self {
            user_id: settings.user_id.get(),
            buttons_per_screen: settings.buttons_per_screen.get(),
            show_by_category: settings.show_by_category,
            voice: settings.voice,
            stored,
        }
    }
}
