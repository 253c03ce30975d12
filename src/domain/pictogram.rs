use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ImageRef, Ownership, PictogramId, PictogramKind, PictogramName};

/// A communication symbol, either general or private to one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pictogram {
    pub id: PictogramId,
    pub name: PictogramName,
    pub image: Option<ImageRef>,
    pub kind: PictogramKind,
    pub owner: Ownership,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Pictogram`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPictogram {
    pub name: PictogramName,
    pub image: Option<ImageRef>,
    pub kind: PictogramKind,
    pub owner: Ownership,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable fields of an existing [`Pictogram`].
#[derive(Debug, Clone, PartialEq)]
pub struct PictogramUpdate {
    pub name: PictogramName,
    pub image: Option<ImageRef>,
    pub kind: PictogramKind,
}
