use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::pictogram::Pictogram;
use crate::dto::categories::CategoryDto;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PictogramDto {
    pub id: i32,
    pub name: String,
    pub image: Option<String>,
    pub kind: String,
    /// `None` for general pictograms.
    pub owner_id: Option<i32>,
}

impl From<Pictogram> for PictogramDto {
    fn from(value: Pictogram) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            image: value.image.map(|image| image.into_inner()),
            kind: value.kind.into_inner(),
            owner_id: value.owner.user_id().map(|id| id.get()),
        }
    }
}

/// A pictogram together with the categories it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PictogramWithCategoriesDto {
    #[serde(flatten)]
    pub pictogram: PictogramDto,
    pub categories: Vec<CategoryDto>,
}

impl PictogramWithCategoriesDto {
    pub fn new(pictogram: Pictogram, categories: Vec<Category>) -> Self {
        Self {
            pictogram: pictogram.into(),
            categories: categories.into_iter().map(CategoryDto::from).collect(),
        }
    }
}
