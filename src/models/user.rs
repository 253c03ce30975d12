use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{CredentialHash, DisplayName, Email, TypeConstraintError};
use crate::domain::user::{NewUser as DomainNewUser, User as DomainUser};

/// Diesel model representing the `users` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users)]
pub struct User {
    pub id: i32,
    pub display_name: String,
    pub email: String,
    pub credential_hash: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`User`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub display_name: &'a str,
    pub email: &'a str,
    pub credential_hash: &'a str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id.try_into()?,
            display_name: DisplayName::new(user.display_name)?,
            email: Email::new(user.email)?,
            credential_hash: CredentialHash::new(user.credential_hash)?,
            created_at: user.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            display_name: user.display_name.as_str(),
            email: user.email.as_str(),
            credential_hash: user.credential_hash.as_str(),
            created_at: user.created_at,
        }
    }
}
