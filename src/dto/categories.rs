use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::pictogram::Pictogram;
use crate::dto::pictograms::PictogramDto;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    /// `None` for general categories.
    pub owner_id: Option<i32>,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            image: value.image.map(|image| image.into_inner()),
            owner_id: value.owner.user_id().map(|id| id.get()),
        }
    }
}

/// A category together with the pictograms resolved for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithPictogramsDto {
    #[serde(flatten)]
    pub category: CategoryDto,
    pub pictograms: Vec<PictogramDto>,
}

impl CategoryWithPictogramsDto {
    pub fn new(category: Category, pictograms: Vec<Pictogram>) -> Self {
        Self {
            category: category.into(),
            pictograms: pictograms.into_iter().map(PictogramDto::from).collect(),
        }
    }
}
