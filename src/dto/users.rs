use serde::Serialize;

use crate::domain::user::User;

/// Public view of an account; the credential hash never leaves the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub display_name: String,
    pub email: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id.get(),
            display_name: value.display_name.into_inner(),
            email: value.email.into_inner(),
        }
    }
}
