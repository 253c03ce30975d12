use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::pictogram::{NewPictogram, PictogramUpdate};
use crate::domain::types::{
    CategoryId, ImageRef, Ownership, PictogramId, PictogramKind, PictogramName,
};

use super::{FormError, parse_ids, parse_image};

#[derive(Deserialize, Validate)]
pub struct AddPictogramForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub image: Option<String>,
    #[validate(length(min = 1))]
    pub kind: String,
    #[serde(default)]
    pub categories: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddPictogramFormPayload {
    pub name: PictogramName,
    pub image: Option<ImageRef>,
    pub kind: PictogramKind,
    pub category_ids: Vec<CategoryId>,
}

impl AddPictogramFormPayload {
    pub fn to_new_pictogram(&self, owner: Ownership) -> NewPictogram {
        let now = Utc::now().naive_utc();
        NewPictogram {
            name: self.name.clone(),
            image: self.image.clone(),
            kind: self.kind.clone(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<AddPictogramForm> for AddPictogramFormPayload {
    type Error = FormError;

    fn try_from(value: AddPictogramForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: PictogramName::new(value.name)?,
            image: parse_image(value.image)?,
            kind: PictogramKind::new(value.kind)?,
            category_ids: parse_ids(value.categories)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdatePictogramForm {
    #[validate(range(min = 1))]
    pub pictogram_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub image: Option<String>,
    #[validate(length(min = 1))]
    pub kind: String,
    #[serde(default)]
    pub categories: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatePictogramFormPayload {
    pub pictogram_id: PictogramId,
    pub name: PictogramName,
    pub image: Option<ImageRef>,
    pub kind: PictogramKind,
    pub category_ids: Vec<CategoryId>,
}

impl UpdatePictogramFormPayload {
    pub fn to_update(&self) -> PictogramUpdate {
        PictogramUpdate {
            name: self.name.clone(),
            image: self.image.clone(),
            kind: self.kind.clone(),
        }
    }
}

impl TryFrom<UpdatePictogramForm> for UpdatePictogramFormPayload {
    type Error = FormError;

    fn try_from(value: UpdatePictogramForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            pictogram_id: PictogramId::new(value.pictogram_id)?,
            name: PictogramName::new(value.name)?,
            image: parse_image(value.image)?,
            kind: PictogramKind::new(value.kind)?,
            category_ids: parse_ids(value.categories)?,
        })
    }
}
