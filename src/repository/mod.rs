//! Persistence contract of the catalog and its Diesel implementation.
//!
//! Every multi-row write (create-with-associations, association replacement,
//! registration bootstrap, cascading deletes) is a single repository call so
//! that implementations can run it inside one transaction.

use crate::db::{DbConnection, DbPool};
use crate::domain::association::{Association, AssociationPivot};
use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::phrase::{NewPhrase, Phrase};
use crate::domain::pictogram::{NewPictogram, Pictogram, PictogramUpdate};
use crate::domain::settings::UserSettings;
use crate::domain::types::{CategoryId, Email, PictogramId, Scope, UserId};
use crate::domain::user::{NewUser, User};

pub mod association;
pub mod category;
pub mod errors;
pub mod hidden;
pub mod phrase;
pub mod pictogram;
pub mod settings;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Ownership filter applied when listing categories or pictograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerFilter {
    /// Only general entries.
    General,
    /// Only entries privately owned by the user.
    OwnedBy(UserId),
    /// General entries plus the user's private ones.
    VisibleTo(UserId),
}

impl OwnerFilter {
    /// Filter matching everything `viewer` may see.
    pub fn visible_to(viewer: Option<UserId>) -> Self {
        match viewer {
            Some(user_id) => Self::VisibleTo(user_id),
            None => Self::General,
        }
    }
}

/// Query parameters used when listing associations.
///
/// Rows are always matched on `scope`; `include_general` additionally pulls in
/// rows of the shared graph. Results list general rows first, each group in
/// creation order.
#[derive(Debug, Clone, Default)]
pub struct AssociationQuery {
    pub category_id: Option<CategoryId>,
    pub pictogram_id: Option<PictogramId>,
    pub scope: Scope,
    pub include_general: bool,
}

impl AssociationQuery {
    pub fn new(scope: Scope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn pictogram(mut self, pictogram_id: PictogramId) -> Self {
        self.pictogram_id = Some(pictogram_id);
        self
    }
    pub fn with_general(mut self) -> Self {
        self.include_general = true;
        self
    }

    /// Whether a row recorded in `scope` matches this query's scope rules.
    pub fn matches_scope(&self, scope: Scope) -> bool {
        scope == self.scope || (self.include_general && scope.is_general())
    }
}

/// Read-only operations for user accounts.
pub trait UserReader {
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &Email) -> RepositoryResult<Option<User>>;
}

/// Write operations for user accounts.
pub trait UserWriter {
    /// Insert the user and clone the current general association graph into
    /// the new user's scope, atomically.
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
    /// Clone the general association graph into `user_id`'s scope unless that
    /// scope already holds rows. Returns the number of rows created.
    fn bootstrap_user_associations(&self, user_id: UserId) -> RepositoryResult<usize>;
    /// Delete the user and everything the user owns, including phrases and
    /// settings.
    fn delete_user(&self, user_id: UserId) -> RepositoryResult<usize>;
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// List categories in creation order.
    fn list_categories(&self, filter: OwnerFilter) -> RepositoryResult<Vec<Category>>;
    /// Fetch the categories matching `ids`, in creation order. Unknown ids are skipped.
    fn get_categories_by_ids(&self, ids: &[CategoryId]) -> RepositoryResult<Vec<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category linked to `pictogram_ids` in the category owner's scope.
    fn create_category(
        &self,
        category: &NewCategory,
        pictogram_ids: &[PictogramId],
    ) -> RepositoryResult<Category>;
    /// Update the category and replace its pictogram set within `scope`.
    fn update_category(
        &self,
        id: CategoryId,
        update: &CategoryUpdate,
        pictogram_ids: &[PictogramId],
        scope: Scope,
    ) -> RepositoryResult<Category>;
    /// Delete the category together with its associations in every scope.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for pictogram entities.
pub trait PictogramReader {
    fn get_pictogram_by_id(&self, id: PictogramId) -> RepositoryResult<Option<Pictogram>>;
    /// List pictograms in creation order.
    fn list_pictograms(&self, filter: OwnerFilter) -> RepositoryResult<Vec<Pictogram>>;
    /// Fetch the pictograms matching `ids`, in creation order. Unknown ids are skipped.
    fn get_pictograms_by_ids(&self, ids: &[PictogramId]) -> RepositoryResult<Vec<Pictogram>>;
}

/// Write operations for pictogram entities.
pub trait PictogramWriter {
    /// Persist a new pictogram linked to `category_ids` in the pictogram owner's scope.
    fn create_pictogram(
        &self,
        pictogram: &NewPictogram,
        category_ids: &[CategoryId],
    ) -> RepositoryResult<Pictogram>;
    /// Update the pictogram and replace its category set within `scope`.
    fn update_pictogram(
        &self,
        id: PictogramId,
        update: &PictogramUpdate,
        category_ids: &[CategoryId],
        scope: Scope,
    ) -> RepositoryResult<Pictogram>;
    /// Delete the pictogram, its associations in every scope and its hide entries.
    fn delete_pictogram(&self, id: PictogramId) -> RepositoryResult<usize>;
}

/// Read-only operations for category/pictogram associations.
pub trait AssociationReader {
    fn list_associations(&self, query: AssociationQuery) -> RepositoryResult<Vec<Association>>;
}

/// Write operations for category/pictogram associations.
///
/// Every write runs in an immediate transaction, which takes SQLite's
/// database-wide write lock up front. Concurrent replaces of the same pivot
/// and scope serialise, and the last one to commit wins. Writes to other
/// scopes queue behind the same lock. If the lock is not acquired within the
/// pool's busy timeout the call fails with [`RepositoryError::DatabaseError`],
/// which services report as `ServiceError::Internal`.
pub trait AssociationWriter {
    /// Link `pictogram_ids` to the category in `scope`.
    ///
    /// Fails with `NotFound` before writing anything if the category or any
    /// pictogram is missing or invisible in `scope`, and with `Conflict` if a
    /// pair already exists in `scope` or repeats in `pictogram_ids`.
    fn create_associations(
        &self,
        category_id: CategoryId,
        pictogram_ids: &[PictogramId],
        scope: Scope,
    ) -> RepositoryResult<usize>;
    /// Atomically delete the category's rows in `scope` and link `pictogram_ids`.
    fn replace_category_pictograms(
        &self,
        category_id: CategoryId,
        pictogram_ids: &[PictogramId],
        scope: Scope,
    ) -> RepositoryResult<usize>;
    /// Atomically delete the pictogram's rows in `scope` and link `category_ids`.
    fn replace_pictogram_categories(
        &self,
        pictogram_id: PictogramId,
        category_ids: &[CategoryId],
        scope: Scope,
    ) -> RepositoryResult<usize>;
    /// Delete the pivot's rows in `scope` only.
    fn delete_associations(&self, pivot: AssociationPivot, scope: Scope)
    -> RepositoryResult<usize>;
    /// Delete the pivot's rows in every scope.
    fn delete_associations_for_entity(&self, pivot: AssociationPivot) -> RepositoryResult<usize>;
}

/// Read-only operations for the hide overlay.
pub trait HiddenPictogramReader {
    fn list_hidden_pictograms(&self, user_id: UserId) -> RepositoryResult<Vec<PictogramId>>;
}

/// Write operations for the hide overlay.
pub trait HiddenPictogramWriter {
    /// Hide the pictogram for the user. Returns 0 if it was already hidden.
    fn hide_pictogram(&self, user_id: UserId, pictogram_id: PictogramId)
    -> RepositoryResult<usize>;
    /// Unhide the pictogram for the user. Returns 0 if it was not hidden.
    fn unhide_pictogram(
        &self,
        user_id: UserId,
        pictogram_id: PictogramId,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for the phrase history.
pub trait PhraseReader {
    /// List the user's phrases, newest first.
    fn list_phrases(&self, user_id: UserId) -> RepositoryResult<Vec<Phrase>>;
}

/// Write operations for the phrase history.
pub trait PhraseWriter {
    fn create_phrase(&self, phrase: &NewPhrase) -> RepositoryResult<Phrase>;
}

/// Read-only operations for per-user display settings.
pub trait UserSettingsReader {
    /// Stored settings, or `None` when the user never saved any.
    fn get_user_settings(&self, user_id: UserId) -> RepositoryResult<Option<UserSettings>>;
}

/// Write operations for per-user display settings.
pub trait UserSettingsWriter {
    /// Insert or overwrite the user's settings.
    fn save_user_settings(&self, settings: &UserSettings) -> RepositoryResult<UserSettings>;
    /// Remove stored settings. Returns 0 if none were stored.
    fn delete_user_settings(&self, user_id: UserId) -> RepositoryResult<usize>;
}
