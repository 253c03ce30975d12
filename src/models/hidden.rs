use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Diesel model representing the `hidden_pictograms` table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::hidden_pictograms)]
pub struct HiddenPictogram {
    pub user_id: i32,
    pub pictogram_id: i32,
    pub created_at: NaiveDateTime,
}
