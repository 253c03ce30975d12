use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{CredentialHash, DisplayName, Email, UserId};

/// A registered account.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub display_name: DisplayName,
    pub email: Email,
    #[serde(skip_serializing)]
    pub credential_hash: CredentialHash,
    pub created_at: NaiveDateTime,
}

/// Data required to register a new [`User`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub display_name: DisplayName,
    pub email: Email,
    pub credential_hash: CredentialHash,
    pub created_at: NaiveDateTime,
}
