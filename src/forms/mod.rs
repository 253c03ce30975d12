//! Request payloads and their validation into typed domain values.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::{ImageRef, TypeConstraintError};

pub mod categories;
pub mod phrases;
pub mod pictograms;
pub mod settings;
pub mod users;

/// Failure turning a raw form into its typed payload.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("form validation failed: {0}")]
    Validation(String),
    #[error("form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for FormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for FormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Convert raw ids into typed ids, rejecting non-positive values.
pub(crate) fn parse_ids<T>(raw: Vec<i32>) -> Result<Vec<T>, TypeConstraintError>
where
    T: TryFrom<i32, Error = TypeConstraintError>,
{
    raw.into_iter().map(T::try_from).collect()
}

/// A blank image field means "no image".
pub(crate) fn parse_image(raw: Option<String>) -> Result<Option<ImageRef>, TypeConstraintError> {
    raw.filter(|value| !value.trim().is_empty())
        .map(ImageRef::new)
        .transpose()
}
