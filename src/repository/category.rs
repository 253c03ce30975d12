use chrono::Utc;
use diesel::prelude::*;

use crate::domain::association::AssociationPivot;
use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::types::{CategoryId, PictogramId, Scope};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::association::{link_category_pictograms, unlink};
use crate::repository::{
    CategoryReader, CategoryWriter, DieselRepository, OwnerFilter, RepositoryError,
    RepositoryResult,
};

impl CategoryReader for DieselRepository {
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id.get())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn list_categories(&self, filter: OwnerFilter) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let mut items = categories::table.into_boxed::<diesel::sqlite::Sqlite>();
        items = match filter {
            OwnerFilter::General => items.filter(categories::user_id.is_null()),
            OwnerFilter::OwnedBy(owner) => {
                items.filter(categories::user_id.assume_not_null().eq(owner.get()))
            }
            OwnerFilter::VisibleTo(viewer) => items.filter(
                categories::user_id
                    .is_null()
                    .or(categories::user_id.assume_not_null().eq(viewer.get())),
            ),
        };

        let items = items
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_categories_by_ids(&self, ids: &[CategoryId]) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let items = categories::table
            .filter(categories::id.eq_any(raw_ids))
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        category: &NewCategory,
        pictogram_ids: &[PictogramId],
    ) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category = DbNewCategory::from(category);

        let created = conn.immediate_transaction(|conn| {
            let created: Category = diesel::insert_into(categories::table)
                .values(&db_category)
                .get_result::<DbCategory>(conn)?
                .try_into()?;
            link_category_pictograms(conn, created.id, pictogram_ids, created.owner)?;
            Ok::<_, RepositoryError>(created)
        })?;

        Ok(created)
    }

    fn update_category(
        &self,
        id: CategoryId,
        update: &CategoryUpdate,
        pictogram_ids: &[PictogramId],
        scope: Scope,
    ) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.immediate_transaction(|conn| {
            let updated = diesel::update(categories::table.find(id.get()))
                .set((
                    categories::name.eq(update.name.as_str()),
                    categories::image.eq(update.image.as_ref().map(|image| image.as_str())),
                    categories::updated_at.eq(Utc::now().naive_utc()),
                ))
                .get_result::<DbCategory>(conn)
                .optional()?
                .ok_or_else(|| RepositoryError::NotFound(format!("category {id}")))?;

            unlink(conn, AssociationPivot::Category(id), Some(scope))?;
            link_category_pictograms(conn, id, pictogram_ids, scope)?;

            Ok(updated.try_into()?)
        })
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = conn.immediate_transaction(|conn| {
            let unlinked = unlink(conn, AssociationPivot::Category(id), None)?;
            log::debug!("Removed {unlinked} associations of category {id}");
            let deleted = diesel::delete(categories::table.find(id.get())).execute(conn)?;
            Ok::<_, RepositoryError>(deleted)
        })?;

        Ok(affected)
    }
}
