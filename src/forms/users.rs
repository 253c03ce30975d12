use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{CredentialHash, DisplayName, Email};
use crate::domain::user::NewUser;

use super::FormError;

/// Registration request. The credential hash is produced by the
/// authentication collaborator before it reaches the catalog.
#[derive(Deserialize, Validate)]
pub struct RegisterUserForm {
    #[validate(length(min = 1))]
    pub display_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub credential_hash: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterUserFormPayload {
    pub display_name: DisplayName,
    pub email: Email,
    pub credential_hash: CredentialHash,
}

impl RegisterUserFormPayload {
    pub fn to_new_user(&self) -> NewUser {
        NewUser {
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            credential_hash: self.credential_hash.clone(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<RegisterUserForm> for RegisterUserFormPayload {
    type Error = FormError;

    fn try_from(value: RegisterUserForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            display_name: DisplayName::new(value.display_name)?,
            email: Email::new(value.email)?,
            credential_hash: CredentialHash::new(value.credential_hash)?,
        })
    }
}
