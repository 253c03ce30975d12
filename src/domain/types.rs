//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, text values and ownership are checked once at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Email validation failed.
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    /// A number fell outside its allowed range.
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
    /// A text value did not name a known variant.
    #[error("{0} is not a recognised option")]
    UnknownVariant(&'static str),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

id_newtype!(UserId, "Unique identifier for a user.", "user_id");
id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);
id_newtype!(
    PictogramId,
    "Unique identifier for a pictogram.",
    "pictogram_id"
);
id_newtype!(
    AssociationId,
    "Unique identifier for a category/pictogram association row.",
    "association_id"
);
id_newtype!(
    PhraseId,
    "Unique identifier for a saved phrase.",
    "phrase_id"
);

non_empty_string_newtype!(
    CategoryName,
    "Category name enforcing non-empty values.",
    "category name"
);
non_empty_string_newtype!(
    PictogramName,
    "Pictogram name enforcing non-empty values.",
    "pictogram name"
);
non_empty_string_newtype!(
    PictogramKind,
    "Free-form pictogram tag such as `verb` or `noun`.",
    "pictogram kind"
);
non_empty_string_newtype!(
    ImageRef,
    "Reference to the image rendered for a category or pictogram.",
    "image"
);
non_empty_string_newtype!(
    DisplayName,
    "User display name enforcing non-empty values.",
    "display name"
);
non_empty_string_newtype!(
    CredentialHash,
    "Opaque credential hash produced by the authentication collaborator.",
    "credential hash"
);
non_empty_string_newtype!(
    PhraseText,
    "Text of a phrase composed from pictograms.",
    "phrase text"
);

/// Number of pictogram buttons shown per screen, between 1 and
/// [`ButtonsPerScreen::MAX`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub struct ButtonsPerScreen(i32);

impl ButtonsPerScreen {
    pub const MAX: i32 = 48;

    pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::OutOfRange("buttons per screen"))
        }
    }

    pub const fn get(self) -> i32 {
        self.0
    }
}

impl Default for ButtonsPerScreen {
    fn default() -> Self {
        Self(9)
    }
}

impl TryFrom<i32> for ButtonsPerScreen {
    type Error = TypeConstraintError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ButtonsPerScreen> for i32 {
    fn from(value: ButtonsPerScreen) -> Self {
        value.0
    }
}

/// Voice used to read phrases aloud.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Female,
    Male,
}

impl Voice {
    /// Parse a stored or submitted voice name, ignoring case.
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            _ => Err(TypeConstraintError::UnknownVariant("voice")),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

impl Display for Voice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower-cased, validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Trims, lower-cases and validates the address.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "email")?.to_lowercase();
        if !trimmed.as_str().validate_email() {
            return Err(TypeConstraintError::InvalidEmail("email"));
        }
        Ok(Self(trimmed))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the owned address.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Who owns a category or pictogram.
///
/// `General` entries belong to the shared catalog and are visible to every
/// viewer, including anonymous ones. `OwnedBy` entries are private to a single
/// user. Serialized as a nullable owner id.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "Option<UserId>", into = "Option<UserId>")]
pub enum Ownership {
    #[default]
    General,
    OwnedBy(UserId),
}

/// Scope of an association row: the shared graph or one user's private view.
///
/// Shares its representation with [`Ownership`]; a user-scoped association is
/// "owned" by the user whose view it belongs to.
pub type Scope = Ownership;

impl Ownership {
    /// Owning user, or `None` for general entries.
    pub const fn user_id(self) -> Option<UserId> {
        match self {
            Self::General => None,
            Self::OwnedBy(user_id) => Some(user_id),
        }
    }

    pub const fn is_general(self) -> bool {
        matches!(self, Self::General)
    }

    /// Whether `user_id` is the owner. Always false for general entries.
    pub fn is_owned_by(self, user_id: UserId) -> bool {
        self == Self::OwnedBy(user_id)
    }

    /// Whether an entry with this ownership is visible to `viewer`.
    pub fn is_visible_to(self, viewer: Option<UserId>) -> bool {
        match self {
            Self::General => true,
            Self::OwnedBy(owner) => viewer == Some(owner),
        }
    }

    /// Whether an entry with this ownership may be referenced from
    /// associations recorded in `scope`.
    pub fn is_visible_in(self, scope: Scope) -> bool {
        self.is_visible_to(scope.user_id())
    }
}

impl From<Option<UserId>> for Ownership {
    fn from(value: Option<UserId>) -> Self {
        match value {
            Some(user_id) => Self::OwnedBy(user_id),
            None => Self::General,
        }
    }
}

impl From<Ownership> for Option<UserId> {
    fn from(value: Ownership) -> Self {
        value.user_id()
    }
}

impl From<UserId> for Ownership {
    fn from(value: UserId) -> Self {
        Self::OwnedBy(value)
    }
}

impl Display for Ownership {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::General => write!(f, "general"),
            Self::OwnedBy(user_id) => write!(f, "user {user_id}"),
        }
    }
}
