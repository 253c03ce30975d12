use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::category::{CategoryUpdate, NewCategory};
use crate::domain::types::{CategoryId, CategoryName, ImageRef, Ownership, PictogramId};

use super::{FormError, parse_ids, parse_image};

#[derive(Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub image: Option<String>,
    #[serde(default)]
    pub pictograms: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddCategoryFormPayload {
    pub name: CategoryName,
    pub image: Option<ImageRef>,
    pub pictogram_ids: Vec<PictogramId>,
}

impl AddCategoryFormPayload {
    pub fn to_new_category(&self, owner: Ownership) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name.clone(),
            image: self.image.clone(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: AddCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: CategoryName::new(value.name)?,
            image: parse_image(value.image)?,
            pictogram_ids: parse_ids(value.pictograms)?,
        })
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub image: Option<String>,
    #[serde(default)]
    pub pictograms: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCategoryFormPayload {
    pub category_id: CategoryId,
    pub name: CategoryName,
    pub image: Option<ImageRef>,
    pub pictogram_ids: Vec<PictogramId>,
}

impl UpdateCategoryFormPayload {
    pub fn to_update(&self) -> CategoryUpdate {
        CategoryUpdate {
            name: self.name.clone(),
            image: self.image.clone(),
        }
    }
}

impl TryFrom<UpdateCategoryForm> for UpdateCategoryFormPayload {
    type Error = FormError;

    fn try_from(value: UpdateCategoryForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            name: CategoryName::new(value.name)?,
            image: parse_image(value.image)?,
            pictogram_ids: parse_ids(value.pictograms)?,
        })
    }
}

/// Replace the caller's own pictogram set of a category.
#[derive(Deserialize, Validate)]
pub struct SetCategoryPictogramsForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[serde(default)]
    pub pictograms: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetCategoryPictogramsFormPayload {
    pub category_id: CategoryId,
    pub pictogram_ids: Vec<PictogramId>,
}

impl TryFrom<SetCategoryPictogramsForm> for SetCategoryPictogramsFormPayload {
    type Error = FormError;

    fn try_from(value: SetCategoryPictogramsForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            category_id: CategoryId::new(value.category_id)?,
            pictogram_ids: parse_ids(value.pictograms)?,
        })
    }
}
