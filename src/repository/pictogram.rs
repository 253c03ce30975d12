use chrono::Utc;
use diesel::prelude::*;

use crate::domain::association::AssociationPivot;
use crate::domain::pictogram::{NewPictogram, Pictogram, PictogramUpdate};
use crate::domain::types::{CategoryId, PictogramId, Scope};
use crate::models::pictogram::{NewPictogram as DbNewPictogram, Pictogram as DbPictogram};
use crate::repository::association::{link_pictogram_categories, unlink};
use crate::repository::{
    DieselRepository, OwnerFilter, PictogramReader, PictogramWriter, RepositoryError,
    RepositoryResult,
};

impl PictogramReader for DieselRepository {
    fn get_pictogram_by_id(&self, id: PictogramId) -> RepositoryResult<Option<Pictogram>> {
        use crate::schema::pictograms;

        let mut conn = self.conn()?;

        let pictogram = pictograms::table
            .find(id.get())
            .first::<DbPictogram>(&mut conn)
            .optional()?;

        let pictogram = pictogram.map(TryInto::try_into).transpose()?;
        Ok(pictogram)
    }

    fn list_pictograms(&self, filter: OwnerFilter) -> RepositoryResult<Vec<Pictogram>> {
        use crate::schema::pictograms;

        let mut conn = self.conn()?;

        let mut items = pictograms::table.into_boxed::<diesel::sqlite::Sqlite>();
        items = match filter {
            OwnerFilter::General => items.filter(pictograms::user_id.is_null()),
            OwnerFilter::OwnedBy(owner) => {
                items.filter(pictograms::user_id.assume_not_null().eq(owner.get()))
            }
            OwnerFilter::VisibleTo(viewer) => items.filter(
                pictograms::user_id
                    .is_null()
                    .or(pictograms::user_id.assume_not_null().eq(viewer.get())),
            ),
        };

        let items = items
            .order(pictograms::id.asc())
            .load::<DbPictogram>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Pictogram>, _>>()?;

        Ok(items)
    }

    fn get_pictograms_by_ids(&self, ids: &[PictogramId]) -> RepositoryResult<Vec<Pictogram>> {
        use crate::schema::pictograms;

        let mut conn = self.conn()?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let items = pictograms::table
            .filter(pictograms::id.eq_any(raw_ids))
            .order(pictograms::id.asc())
            .load::<DbPictogram>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Pictogram>, _>>()?;

        Ok(items)
    }
}

impl PictogramWriter for DieselRepository {
    fn create_pictogram(
        &self,
        pictogram: &NewPictogram,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<Pictogram> {
        use crate::schema::pictograms;

        let mut conn = self.conn()?;
        let db_pictogram = DbNewPictogram::from(pictogram);

        let created = conn.immediate_transaction(|conn| {
            let created: Pictogram = diesel::insert_into(pictograms::table)
                .values(&db_pictogram)
                .get_result::<DbPictogram>(conn)?
                .try_into()?;
            link_pictogram_categories(conn, created.id, category_ids, created.owner)?;
            Ok::<_, RepositoryError>(created)
        })?;

        Ok(created)
    }

    fn update_pictogram(
        &self,
        id: PictogramId,
        update: &PictogramUpdate,
        category_ids: &[CategoryId],
        scope: Scope,
    ) -> RepositoryResult<Pictogram> {
        use crate::schema::pictograms;

        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            let updated = diesel::update(pictograms::table.find(id.get()))
                .set((
                    pictograms::name.eq(update.name.as_str()),
                    pictograms::image.eq(update.image.as_ref().map(|image| image.as_str())),
                    pictograms::kind.eq(update.kind.as_str()),
                    pictograms::updated_at.eq(Utc::now().naive_utc()),
                ))
                .get_result::<DbPictogram>(conn)
                .optional()?
                .ok_or_else(|| RepositoryError::NotFound(format!("pictogram {id}")))?;

            unlink(conn, AssociationPivot::Pictogram(id), Some(scope))?;
            link_pictogram_categories(conn, id, category_ids, scope)?;

            Ok(updated.try_into()?)
        })
    }

    fn delete_pictogram(&self, id: PictogramId) -> RepositoryResult<usize> {
        use crate::schema::{hidden_pictograms, pictograms};

        let mut conn = self.conn()?;

        let affected = conn.immediate_transaction(|conn| {
            let unlinked = unlink(conn, AssociationPivot::Pictogram(id), None)?;
            let unhidden = diesel::delete(
                hidden_pictograms::table.filter(hidden_pictograms::pictogram_id.eq(id.get())),
            )
            .execute(conn)?;
            log::debug!(
                "Removed {unlinked} associations and {unhidden} hide entries of pictogram {id}"
            );
            let deleted = diesel::delete(pictograms::table.find(id.get())).execute(conn)?;
            Ok::<_, RepositoryError>(deleted)
        })?;

        Ok(affected)
    }
}
