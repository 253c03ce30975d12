//! Scoped category/pictogram association records.
//!
//! The connection-level helpers here are shared by the category, pictogram and
//! user repositories so that their composite writes can run the association
//! logic inside their own transactions.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use diesel::expression::BoxableExpression;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use diesel::sqlite::Sqlite;

use crate::domain::association::{Association, AssociationPivot};
use crate::domain::types::{CategoryId, PictogramId, Scope, UserId};
use crate::models::association::{
    CategoryPictogram as DbCategoryPictogram, NewCategoryPictogram as DbNewCategoryPictogram,
};
use crate::models::ownership_from_column;
use crate::repository::{
    AssociationQuery, AssociationReader, AssociationWriter, DieselRepository, RepositoryError,
    RepositoryResult,
};
use crate::schema::{categories, category_pictograms, pictograms};

type AssociationPredicate =
    Box<dyn BoxableExpression<category_pictograms::table, Sqlite, SqlType = Bool>>;

/// Rows recorded in `scope`, optionally widened to the shared graph.
fn in_scopes(scope: Scope, include_general: bool) -> AssociationPredicate {
    use category_pictograms::user_id;

    match (scope.user_id(), include_general) {
        (None, _) => Box::new(user_id.is_null()),
        (Some(owner), false) => Box::new(user_id.assume_not_null().eq(owner.get())),
        (Some(owner), true) => Box::new(
            user_id
                .is_null()
                .or(user_id.assume_not_null().eq(owner.get())),
        ),
    }
}

fn in_scope(scope: Scope) -> AssociationPredicate {
    in_scopes(scope, false)
}

fn on_pivot(pivot: AssociationPivot) -> AssociationPredicate {
    match pivot {
        AssociationPivot::Category(id) => Box::new(category_pictograms::category_id.eq(id.get())),
        AssociationPivot::Pictogram(id) => {
            Box::new(category_pictograms::pictogram_id.eq(id.get()))
        }
    }
}

pub(crate) fn load_associations(
    conn: &mut SqliteConnection,
    query: &AssociationQuery,
) -> RepositoryResult<Vec<Association>> {
    let mut items = category_pictograms::table
        .filter(in_scopes(query.scope, query.include_general))
        .into_boxed::<Sqlite>();
    if let Some(category_id) = query.category_id {
        items = items.filter(category_pictograms::category_id.eq(category_id.get()));
    }
    if let Some(pictogram_id) = query.pictogram_id {
        items = items.filter(category_pictograms::pictogram_id.eq(pictogram_id.get()));
    }

    let mut associations = items
        .order(category_pictograms::id.asc())
        .load::<DbCategoryPictogram>(conn)?
        .into_iter()
        .map(TryInto::try_into)
        .collect::<Result<Vec<Association>, _>>()?;

    // Stable: general rows first, creation order within each group.
    associations.sort_by_key(|association| !association.scope.is_general());
    Ok(associations)
}

fn reject_repeats<T>(ids: &[T], what: &str) -> RepositoryResult<()>
where
    T: Copy + Eq + std::hash::Hash + std::fmt::Display,
{
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(*id) {
            return Err(RepositoryError::Conflict(format!(
                "{what} {id} listed more than once"
            )));
        }
    }
    Ok(())
}

fn require_category_in_scope(
    conn: &mut SqliteConnection,
    category_id: CategoryId,
    scope: Scope,
) -> RepositoryResult<()> {
    require_categories_in_scope(conn, &[category_id], scope)
}

fn require_categories_in_scope(
    conn: &mut SqliteConnection,
    category_ids: &[CategoryId],
    scope: Scope,
) -> RepositoryResult<()> {
    let raw_ids: Vec<i32> = category_ids.iter().map(|id| id.get()).collect();
    let owners: HashMap<i32, Option<i32>> = categories::table
        .filter(categories::id.eq_any(raw_ids))
        .select((categories::id, categories::user_id))
        .load::<(i32, Option<i32>)>(conn)?
        .into_iter()
        .collect();

    for id in category_ids {
        let visible = match owners.get(&id.get()) {
            Some(owner) => ownership_from_column(*owner)?.is_visible_in(scope),
            None => false,
        };
        if !visible {
            return Err(RepositoryError::NotFound(format!(
                "category {id} in {scope} scope"
            )));
        }
    }
    Ok(())
}

fn require_pictograms_in_scope(
    conn: &mut SqliteConnection,
    pictogram_ids: &[PictogramId],
    scope: Scope,
) -> RepositoryResult<()> {
    let raw_ids: Vec<i32> = pictogram_ids.iter().map(|id| id.get()).collect();
    let owners: HashMap<i32, Option<i32>> = pictograms::table
        .filter(pictograms::id.eq_any(raw_ids))
        .select((pictograms::id, pictograms::user_id))
        .load::<(i32, Option<i32>)>(conn)?
        .into_iter()
        .collect();

    for id in pictogram_ids {
        let visible = match owners.get(&id.get()) {
            Some(owner) => ownership_from_column(*owner)?.is_visible_in(scope),
            None => false,
        };
        if !visible {
            return Err(RepositoryError::NotFound(format!(
                "pictogram {id} in {scope} scope"
            )));
        }
    }
    Ok(())
}

fn insert_pairs(
    conn: &mut SqliteConnection,
    pairs: &[(CategoryId, PictogramId)],
    scope: Scope,
) -> RepositoryResult<usize> {
    if pairs.is_empty() {
        return Ok(0);
    }

    let now = Utc::now().naive_utc();
    let rows = pairs
        .iter()
        .map(|(category_id, pictogram_id)| DbNewCategoryPictogram {
            category_id: category_id.get(),
            pictogram_id: pictogram_id.get(),
            user_id: scope.user_id().map(|id| id.get()),
            created_at: now,
        })
        .collect::<Vec<_>>();

    let affected = diesel::insert_into(category_pictograms::table)
        .values(&rows)
        .execute(conn)?;
    Ok(affected)
}

/// Link pictograms to a category in `scope`. Validates everything before writing.
pub(crate) fn link_category_pictograms(
    conn: &mut SqliteConnection,
    category_id: CategoryId,
    pictogram_ids: &[PictogramId],
    scope: Scope,
) -> RepositoryResult<usize> {
    require_category_in_scope(conn, category_id, scope)?;
    if pictogram_ids.is_empty() {
        return Ok(0);
    }
    reject_repeats(pictogram_ids, "pictogram")?;
    require_pictograms_in_scope(conn, pictogram_ids, scope)?;

    let raw_ids: Vec<i32> = pictogram_ids.iter().map(|id| id.get()).collect();
    let existing = category_pictograms::table
        .filter(category_pictograms::category_id.eq(category_id.get()))
        .filter(category_pictograms::pictogram_id.eq_any(raw_ids))
        .filter(in_scope(scope))
        .select(category_pictograms::pictogram_id)
        .first::<i32>(conn)
        .optional()?;
    if let Some(pictogram_id) = existing {
        return Err(RepositoryError::Conflict(format!(
            "category {category_id} already holds pictogram {pictogram_id} in {scope} scope"
        )));
    }

    let pairs: Vec<_> = pictogram_ids.iter().map(|id| (category_id, *id)).collect();
    insert_pairs(conn, &pairs, scope)
}

/// Link categories to a pictogram in `scope`. Validates everything before writing.
pub(crate) fn link_pictogram_categories(
    conn: &mut SqliteConnection,
    pictogram_id: PictogramId,
    category_ids: &[CategoryId],
    scope: Scope,
) -> RepositoryResult<usize> {
    require_pictograms_in_scope(conn, &[pictogram_id], scope)?;
    if category_ids.is_empty() {
        return Ok(0);
    }
    reject_repeats(category_ids, "category")?;
    require_categories_in_scope(conn, category_ids, scope)?;

    let raw_ids: Vec<i32> = category_ids.iter().map(|id| id.get()).collect();
    let existing = category_pictograms::table
        .filter(category_pictograms::pictogram_id.eq(pictogram_id.get()))
        .filter(category_pictograms::category_id.eq_any(raw_ids))
        .filter(in_scope(scope))
        .select(category_pictograms::category_id)
        .first::<i32>(conn)
        .optional()?;
    if let Some(category_id) = existing {
        return Err(RepositoryError::Conflict(format!(
            "category {category_id} already holds pictogram {pictogram_id} in {scope} scope"
        )));
    }

    let pairs: Vec<_> = category_ids.iter().map(|id| (*id, pictogram_id)).collect();
    insert_pairs(conn, &pairs, scope)
}

/// Delete the pivot's rows, limited to `scope` when given.
pub(crate) fn unlink(
    conn: &mut SqliteConnection,
    pivot: AssociationPivot,
    scope: Option<Scope>,
) -> RepositoryResult<usize> {
    let affected = match scope {
        Some(scope) => diesel::delete(
            category_pictograms::table
                .filter(on_pivot(pivot))
                .filter(in_scope(scope)),
        )
        .execute(conn)?,
        None => diesel::delete(category_pictograms::table.filter(on_pivot(pivot))).execute(conn)?,
    };
    Ok(affected)
}

/// Copy every general association into `user_id`'s scope.
///
/// Does nothing when the scope already holds rows, so repeated calls for the
/// same user never duplicate the clone.
pub(crate) fn clone_general_graph(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> RepositoryResult<usize> {
    let scope = Scope::OwnedBy(user_id);

    let seeded = category_pictograms::table
        .filter(in_scope(scope))
        .select(category_pictograms::id)
        .first::<i32>(conn)
        .optional()?;
    if seeded.is_some() {
        log::debug!("Associations for user {user_id} already seeded; skipping bootstrap");
        return Ok(0);
    }

    let pairs = category_pictograms::table
        .filter(category_pictograms::user_id.is_null())
        .order(category_pictograms::id.asc())
        .select((
            category_pictograms::category_id,
            category_pictograms::pictogram_id,
        ))
        .load::<(i32, i32)>(conn)?
        .into_iter()
        .map(|(category_id, pictogram_id)| {
            Ok((
                CategoryId::new(category_id)?,
                PictogramId::new(pictogram_id)?,
            ))
        })
        .collect::<RepositoryResult<Vec<_>>>()?;

    let created = insert_pairs(conn, &pairs, scope)?;
    log::info!("Seeded {created} associations for user {user_id}");
    Ok(created)
}

impl AssociationReader for DieselRepository {
    fn list_associations(&self, query: AssociationQuery) -> RepositoryResult<Vec<Association>> {
        let mut conn = self.conn()?;
        load_associations(&mut conn, &query)
    }
}

impl AssociationWriter for DieselRepository {
    fn create_associations(
        &self,
        category_id: CategoryId,
        pictogram_ids: &[PictogramId],
        scope: Scope,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| {
            link_category_pictograms(conn, category_id, pictogram_ids, scope)
        })
    }

    fn replace_category_pictograms(
        &self,
        category_id: CategoryId,
        pictogram_ids: &[PictogramId],
        scope: Scope,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| {
            let removed = unlink(conn, AssociationPivot::Category(category_id), Some(scope))?;
            let created = link_category_pictograms(conn, category_id, pictogram_ids, scope)?;
            log::debug!(
                "Replaced pictograms of category {category_id} ({scope}): -{removed} +{created}"
            );
            Ok(created)
        })
    }

    fn replace_pictogram_categories(
        &self,
        pictogram_id: PictogramId,
        category_ids: &[CategoryId],
        scope: Scope,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        conn.immediate_transaction(|conn| {
            let removed = unlink(conn, AssociationPivot::Pictogram(pictogram_id), Some(scope))?;
            let created = link_pictogram_categories(conn, pictogram_id, category_ids, scope)?;
            log::debug!(
                "Replaced categories of pictogram {pictogram_id} ({scope}): -{removed} +{created}"
            );
            Ok(created)
        })
    }

    fn delete_associations(
        &self,
        pivot: AssociationPivot,
        scope: Scope,
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        unlink(&mut conn, pivot, Some(scope))
    }

    fn delete_associations_for_entity(&self, pivot: AssociationPivot) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        unlink(&mut conn, pivot, None)
    }
}
