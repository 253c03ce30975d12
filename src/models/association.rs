use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::association::Association as DomainAssociation;
use crate::domain::types::TypeConstraintError;
use crate::models::ownership_from_column;

/// Diesel model representing the `category_pictograms` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::category_pictograms)]
pub struct CategoryPictogram {
    pub id: i32,
    pub category_id: i32,
    pub pictogram_id: i32,
    pub user_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`CategoryPictogram`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::category_pictograms)]
pub struct NewCategoryPictogram {
    pub category_id: i32,
    pub pictogram_id: i32,
    pub user_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

impl TryFrom<CategoryPictogram> for DomainAssociation {
    type Error = TypeConstraintError;

    fn try_from(row: CategoryPictogram) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id.try_into()?,
            category_id: row.category_id.try_into()?,
            pictogram_id: row.pictogram_id.try_into()?,
            scope: ownership_from_column(row.user_id)?,
            created_at: row.created_at,
        })
    }
}
