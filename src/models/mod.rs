//! Diesel row models and their conversions into domain types.

use crate::domain::types::{Ownership, TypeConstraintError, UserId};

pub mod association;
pub mod category;
pub mod config;
pub mod hidden;
pub mod phrase;
pub mod pictogram;
pub mod settings;
pub mod user;

/// Interpret a nullable `user_id` column as ownership or scope.
pub(crate) fn ownership_from_column(
    user_id: Option<i32>,
) -> Result<Ownership, TypeConstraintError> {
    Ok(user_id.map(UserId::new).transpose()?.into())
}
