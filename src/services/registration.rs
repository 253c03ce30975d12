//! Account lifecycle: registration with the bootstrap clone, lookup by email
//! and account deletion.

use crate::domain::types::{Email, UserId};
use crate::domain::user::User;
use crate::dto::users::UserDto;
use crate::forms::users::RegisterUserFormPayload;
use crate::repository::{UserReader, UserWriter};

use super::{ServiceError, ServiceResult};

/// Register a new account.
///
/// The user row and the private copy of the current general association
/// graph are written in one transaction. A taken email is a `Conflict`.
pub fn register_user<R>(payload: RegisterUserFormPayload, repo: &R) -> ServiceResult<UserDto>
where
    R: UserWriter,
{
    match repo.create_user(&payload.to_new_user()) {
        Ok(user) => {
            log::info!("Registered user {}", user.id);
            Ok(user.into())
        }
        Err(e) => {
            log::warn!("Failed to register {}: {e}", payload.email);
            Err(e.into())
        }
    }
}

/// Re-run the bootstrap clone for an existing user. A user whose scope
/// already holds associations is left untouched. Returns the number of rows
/// created.
pub fn bootstrap_user_associations<R>(user_id: UserId, repo: &R) -> ServiceResult<usize>
where
    R: UserWriter,
{
    match repo.bootstrap_user_associations(user_id) {
        Ok(created) => {
            log::info!("Bootstrapped {created} associations for user {user_id}");
            Ok(created)
        }
        Err(e) => {
            log::error!("Failed to bootstrap user {user_id}: {e}");
            Err(e.into())
        }
    }
}

/// Resolve an authenticated subject to its account.
pub fn find_user_by_email<R>(email: &Email, repo: &R) -> ServiceResult<User>
where
    R: UserReader,
{
    match repo.get_user_by_email(email) {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get user by email: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Load the caller's account. A deleted account is `NotFound`.
pub(crate) fn require_user<R>(user_id: UserId, repo: &R) -> ServiceResult<User>
where
    R: UserReader,
{
    match repo.get_user_by_id(user_id) {
        Ok(Some(user)) => Ok(user),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get user {user_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete the caller's account and everything it owns.
pub fn delete_account<R>(caller: UserId, repo: &R) -> ServiceResult<()>
where
    R: UserWriter,
{
    match repo.delete_user(caller) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => {
            log::info!("Deleted user {caller}");
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete user {caller}: {e}");
            Err(e.into())
        }
    }
}
