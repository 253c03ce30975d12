use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::pictogram::{NewPictogram as DomainNewPictogram, Pictogram as DomainPictogram};
use crate::domain::types::{ImageRef, PictogramKind, PictogramName, TypeConstraintError};
use crate::models::ownership_from_column;

/// Diesel model representing the `pictograms` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::pictograms)]
pub struct Pictogram {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub kind: String,
    pub user_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Pictogram`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::pictograms)]
pub struct NewPictogram {
    pub name: String,
    pub image: Option<String>,
    pub kind: String,
    pub user_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Pictogram> for DomainPictogram {
    type Error = TypeConstraintError;

    fn try_from(pictogram: Pictogram) -> Result<Self, Self::Error> {
        Ok(Self {
            id: pictogram.id.try_into()?,
            name: PictogramName::new(pictogram.name)?,
            image: pictogram.image.map(ImageRef::new).transpose()?,
            kind: PictogramKind::new(pictogram.kind)?,
            owner: ownership_from_column(pictogram.user_id)?,
            created_at: pictogram.created_at,
            updated_at: pictogram.updated_at,
        })
    }
}

impl From<&DomainNewPictogram> for NewPictogram {
    fn from(pictogram: &DomainNewPictogram) -> Self {
        Self {
            name: pictogram.name.as_str().to_string(),
            image: pictogram.image.as_ref().map(ToString::to_string),
            kind: pictogram.kind.as_str().to_string(),
            user_id: pictogram.owner.user_id().map(|id| id.get()),
            created_at: pictogram.created_at,
            updated_at: pictogram.updated_at,
        }
    }
}
