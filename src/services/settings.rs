//! Per-user display settings of the pictogram board.

use chrono::Utc;

use crate::domain::settings::UserSettings;
use crate::domain::types::UserId;
use crate::dto::settings::UserSettingsDto;
use crate::forms::settings::UserSettingsFormPayload;
use crate::repository::{UserReader, UserSettingsReader, UserSettingsWriter};
use crate::services::registration::require_user;

use super::ServiceResult;

/// The caller's settings, falling back to the defaults when none are stored.
pub fn get_settings<R>(caller: UserId, repo: &R) -> ServiceResult<UserSettingsDto>
where
    R: UserReader + UserSettingsReader,
{
    require_user(caller, repo)?;

    match repo.get_user_settings(caller) {
        Ok(Some(settings)) => Ok(UserSettingsDto::new(settings, true)),
        Ok(None) => {
            let defaults = UserSettings::defaults(caller, Utc::now().naive_utc());
            Ok(UserSettingsDto::new(defaults, false))
        }
        Err(e) => {
            log::error!("Failed to get settings of user {caller}: {e}");
            Err(e.into())
        }
    }
}

/// Store the caller's settings, replacing any previous ones.
pub fn save_settings<R>(
    payload: UserSettingsFormPayload,
    caller: UserId,
    repo: &R,
) -> ServiceResult<UserSettingsDto>
where
    R: UserReader + UserSettingsWriter,
{
    require_user(caller, repo)?;

    match repo.save_user_settings(&payload.to_settings(caller)) {
        Ok(saved) => {
            log::info!("Saved settings of user {caller}");
            Ok(UserSettingsDto::new(saved, true))
        }
        Err(e) => {
            log::error!("Failed to save settings of user {caller}: {e}");
            Err(e.into())
        }
    }
}

/// Drop the caller's stored settings so the defaults apply again. Returns
/// `false` if nothing was stored.
pub fn delete_settings<R>(caller: UserId, repo: &R) -> ServiceResult<bool>
where
    R: UserSettingsWriter,
{
    match repo.delete_user_settings(caller) {
        Ok(deleted) => Ok(deleted > 0),
        Err(e) => {
            log::error!("Failed to delete settings of user {caller}: {e}");
            Err(e.into())
        }
    }
}
