use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::settings::UserSettings as DomainUserSettings;
use crate::domain::types::{ButtonsPerScreen, TypeConstraintError, Voice};

/// Diesel model representing the `user_settings` table. Used for both reads
/// and upserts; the changeset leaves `user_id` alone.
#[derive(Debug, Clone, Queryable, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::user_settings, primary_key(user_id))]
pub struct UserSettings {
    pub user_id: i32,
    pub buttons_per_screen: i32,
    pub show_by_category: bool,
    pub voice: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<UserSettings> for DomainUserSettings {
    type Error = TypeConstraintError;

    fn try_from(settings: UserSettings) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: settings.user_id.try_into()?,
            buttons_per_screen: ButtonsPerScreen::new(settings.buttons_per_screen)?,
            show_by_category: settings.show_by_category,
            voice: Voice::parse(&settings.voice)?,
            updated_at: settings.updated_at,
        })
    }
}

impl From<&DomainUserSettings> for UserSettings {
    fn from(settings: &DomainUserSettings) -> Self {
        Self {
            user_id: settings.user_id.get(),
            buttons_per_screen: settings.buttons_per_screen.get(),
            show_by_category: settings.show_by_category,
            voice: settings.voice.as_str().to_string(),
            updated_at: settings.updated_at,
        }
    }
}
