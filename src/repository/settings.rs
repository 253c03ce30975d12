use diesel::prelude::*;

use crate::domain::settings::UserSettings;
use crate::domain::types::UserId;
use crate::models::settings::UserSettings as DbUserSettings;
use crate::repository::{DieselRepository, RepositoryResult, UserSettingsReader, UserSettingsWriter};

impl UserSettingsReader for DieselRepository {
    fn get_user_settings(&self, user_id: UserId) -> RepositoryResult<Option<UserSettings>> {
        use crate::schema::user_settings;

        let mut conn = self.conn()?;

        let settings = user_settings::table
            .find(user_id.get())
            .first::<DbUserSettings>(&mut conn)
            .optional()?;

        let settings = settings.map(TryInto::try_into).transpose()?;
        Ok(settings)
    }
}

impl UserSettingsWriter for DieselRepository {
    fn save_user_settings(&self, settings: &UserSettings) -> RepositoryResult<UserSettings> {
        use crate::schema::user_settings;

        let mut conn = self.conn()?;
        let row = DbUserSettings::from(settings);

        let saved = diesel::insert_into(user_settings::table)
            .values(&row)
            .on_conflict(user_settings::user_id)
            .do_update()
            .set(&row)
            .get_result::<DbUserSettings>(&mut conn)?
            .try_into()?;

        Ok(saved)
    }

    fn delete_user_settings(&self, user_id: UserId) -> RepositoryResult<usize> {
        use crate::schema::user_settings;

        let mut conn = self.conn()?;

        let affected = diesel::delete(user_settings::table.find(user_id.get()))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
