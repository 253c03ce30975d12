use chrono::Utc;
use diesel::prelude::*;

use crate::domain::types::{PictogramId, UserId};
use crate::models::hidden::HiddenPictogram as DbHiddenPictogram;
use crate::repository::{
    DieselRepository, HiddenPictogramReader, HiddenPictogramWriter, RepositoryResult,
};

impl HiddenPictogramReader for DieselRepository {
    fn list_hidden_pictograms(&self, user_id: UserId) -> RepositoryResult<Vec<PictogramId>> {
        use crate::schema::hidden_pictograms;

        let mut conn = self.conn()?;

        let items = hidden_pictograms::table
            .filter(hidden_pictograms::user_id.eq(user_id.get()))
            .order(hidden_pictograms::pictogram_id.asc())
            .select(hidden_pictograms::pictogram_id)
            .load::<i32>(&mut conn)?
            .into_iter()
            .map(PictogramId::new)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }
}

impl HiddenPictogramWriter for DieselRepository {
    fn hide_pictogram(
        &self,
        user_id: UserId,
        pictogram_id: PictogramId,
    ) -> RepositoryResult<usize> {
        use crate::schema::hidden_pictograms;

        let mut conn = self.conn()?;
        let row = DbHiddenPictogram {
            user_id: user_id.get(),
            pictogram_id: pictogram_id.get(),
            created_at: Utc::now().naive_utc(),
        };

        let affected = diesel::insert_or_ignore_into(hidden_pictograms::table)
            .values(&row)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn unhide_pictogram(
        &self,
        user_id: UserId,
        pictogram_id: PictogramId,
    ) -> RepositoryResult<usize> {
        use crate::schema::hidden_pictograms;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            hidden_pictograms::table
                .filter(hidden_pictograms::user_id.eq(user_id.get()))
                .filter(hidden_pictograms::pictogram_id.eq(pictogram_id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
