//! Resolution of what a viewing context may see.
//!
//! A viewer is either anonymous (`None`), who sees the general catalog only,
//! or a user, who additionally sees their private entities and associations
//! recorded in their own scope. Entities the viewer cannot see are reported as
//! missing rather than forbidden.

use std::collections::{HashMap, HashSet};

use crate::domain::association::Association;
use crate::domain::category::Category;
use crate::domain::pictogram::Pictogram;
use crate::domain::types::{CategoryId, PictogramId, Scope, UserId};
use crate::repository::{
    AssociationQuery, AssociationReader, CategoryReader, OwnerFilter, PictogramReader,
};

use super::{ServiceError, ServiceResult};

/// Which association scopes feed a resolved category.
///
/// `UserOnly` relies on every user's scope having been seeded with a copy of
/// the general graph at registration: general associations added later do
/// not appear in it until the user's scope is re-seeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// General-scope rows plus the viewer's rows, deduplicated by pictogram.
    Union,
    /// Only rows recorded in the viewer's own scope.
    UserOnly,
}

/// Categories visible to `viewer`, in creation order.
pub fn visible_categories<R>(viewer: Option<UserId>, repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    Ok(repo.list_categories(OwnerFilter::visible_to(viewer))?)
}

/// Pictograms visible to `viewer` in a flat listing, in creation order.
pub fn visible_pictograms<R>(viewer: Option<UserId>, repo: &R) -> ServiceResult<Vec<Pictogram>>
where
    R: PictogramReader,
{
    Ok(repo.list_pictograms(OwnerFilter::visible_to(viewer))?)
}

/// Fetch a category, treating one the viewer cannot see as missing.
pub fn require_visible_category<R>(
    id: CategoryId,
    viewer: Option<UserId>,
    repo: &R,
) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    match repo.get_category_by_id(id) {
        Ok(Some(category)) if category.owner.is_visible_to(viewer) => Ok(category),
        Ok(_) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Fetch a pictogram, treating one the viewer cannot see as missing.
pub fn require_visible_pictogram<R>(
    id: PictogramId,
    viewer: Option<UserId>,
    repo: &R,
) -> ServiceResult<Pictogram>
where
    R: PictogramReader,
{
    match repo.get_pictogram_by_id(id) {
        Ok(Some(pictogram)) if pictogram.owner.is_visible_to(viewer) => Ok(pictogram),
        Ok(_) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get pictogram {id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn association_query(viewer: Option<UserId>, mode: ResolutionMode) -> AssociationQuery {
    let query = AssociationQuery::new(Scope::from(viewer));
    match mode {
        ResolutionMode::Union => query.with_general(),
        ResolutionMode::UserOnly => query,
    }
}

/// Associations of a category as seen by `viewer`, one per pictogram.
///
/// Rows arrive general-first, so in `Union` mode the general copy of a pair
/// keeps its position.
pub fn associations_for_category<R>(
    category_id: CategoryId,
    viewer: Option<UserId>,
    mode: ResolutionMode,
    repo: &R,
) -> ServiceResult<Vec<Association>>
where
    R: CategoryReader + AssociationReader,
{
    require_visible_category(category_id, viewer, repo)?;

    let rows = repo.list_associations(association_query(viewer, mode).category(category_id))?;
    let mut seen = HashSet::new();
    Ok(rows
        .into_iter()
        .filter(|association| seen.insert(association.pictogram_id))
        .collect())
}

/// Pictograms of a category as seen by `viewer`, in association order.
pub fn pictograms_for_category<R>(
    category_id: CategoryId,
    viewer: Option<UserId>,
    mode: ResolutionMode,
    repo: &R,
) -> ServiceResult<Vec<Pictogram>>
where
    R: CategoryReader + AssociationReader + PictogramReader,
{
    let associations = associations_for_category(category_id, viewer, mode, repo)?;
    let ids: Vec<PictogramId> = associations.iter().map(|a| a.pictogram_id).collect();

    let mut by_id: HashMap<PictogramId, Pictogram> = repo
        .get_pictograms_by_ids(&ids)?
        .into_iter()
        .filter(|p| p.owner.is_visible_to(viewer))
        .map(|p| (p.id, p))
        .collect();

    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

/// Categories a pictogram belongs to as seen by `viewer`, combining the
/// general graph with the viewer's scope.
pub fn categories_for_pictogram<R>(
    pictogram_id: PictogramId,
    viewer: Option<UserId>,
    repo: &R,
) -> ServiceResult<Vec<Category>>
where
    R: PictogramReader + AssociationReader + CategoryReader,
{
    require_visible_pictogram(pictogram_id, viewer, repo)?;

    let rows = repo.list_associations(
        association_query(viewer, ResolutionMode::Union).pictogram(pictogram_id),
    )?;
    let mut seen = HashSet::new();
    let ids: Vec<CategoryId> = rows
        .into_iter()
        .map(|association| association.category_id)
        .filter(|id| seen.insert(*id))
        .collect();

    let mut by_id: HashMap<CategoryId, Category> = repo
        .get_categories_by_ids(&ids)?
        .into_iter()
        .filter(|c| c.owner.is_visible_to(viewer))
        .map(|c| (c.id, c))
        .collect();

    Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
}

/// Every pictogram reachable through the categories visible to `viewer`,
/// deduplicated, in category then association order.
pub fn reachable_pictograms<R>(
    viewer: Option<UserId>,
    mode: ResolutionMode,
    repo: &R,
) -> ServiceResult<Vec<Pictogram>>
where
    R: CategoryReader + AssociationReader + PictogramReader,
{
    let mut seen = HashSet::new();
    let mut pictograms = Vec::new();
    for category in visible_categories(viewer, repo)? {
        for pictogram in pictograms_for_category(category.id, viewer, mode, repo)? {
            if seen.insert(pictogram.id) {
                pictograms.push(pictogram);
            }
        }
    }
    Ok(pictograms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::NewCategory;
    use crate::domain::pictogram::NewPictogram;
    use crate::domain::types::{CategoryName, Ownership, PictogramKind, PictogramName};
    use crate::repository::test::TestRepository;
    use crate::repository::{AssociationWriter, CategoryWriter, PictogramWriter};
    use chrono::DateTime;

    fn new_category(name: &str, owner: Ownership) -> NewCategory {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        NewCategory {
            name: CategoryName::new(name).unwrap(),
            image: None,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    fn new_pictogram(name: &str, owner: Ownership) -> NewPictogram {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        NewPictogram {
            name: PictogramName::new(name).unwrap(),
            image: None,
            kind: PictogramKind::new("noun").unwrap(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    fn add_general_pictogram(repo: &TestRepository, name: &str) -> Pictogram {
        repo.create_pictogram(&new_pictogram(name, Ownership::General), &[])
            .unwrap()
    }

    fn ids(pictograms: &[Pictogram]) -> Vec<i32> {
        pictograms.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn anonymous_viewer_sees_only_general_categories() {
        let repo = TestRepository::new();
        let owner = repo.add_user("a@example.com");
        repo.create_category(&new_category("Food", Ownership::General), &[])
            .unwrap();
        repo.create_category(&new_category("Mine", Ownership::OwnedBy(owner)), &[])
            .unwrap();

        let general = visible_categories(None, &repo).unwrap();
        assert_eq!(general.len(), 1);
        assert!(general[0].owner.is_general());

        let mine = visible_categories(Some(owner), &repo).unwrap();
        assert_eq!(mine.len(), 2);
    }

    #[test]
    fn other_users_private_category_is_not_found() {
        let repo = TestRepository::new();
        let owner = repo.add_user("a@example.com");
        let intruder = repo.add_user("b@example.com");
        let category = repo
            .create_category(&new_category("Mine", Ownership::OwnedBy(owner)), &[])
            .unwrap();

        let err = associations_for_category(
            category.id,
            Some(intruder),
            ResolutionMode::Union,
            &repo,
        )
        .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn union_mode_merges_scopes_without_duplicates() {
        let repo = TestRepository::new();
        let user = repo.add_user("a@example.com");
        let cat = add_general_pictogram(&repo, "cat");
        let dog = add_general_pictogram(&repo, "dog");
        let category = repo
            .create_category(&new_category("Animals", Ownership::General), &[cat.id])
            .unwrap();
        repo.create_associations(category.id, &[dog.id, cat.id], Scope::OwnedBy(user))
            .unwrap();

        let union =
            pictograms_for_category(category.id, Some(user), ResolutionMode::Union, &repo).unwrap();
        assert_eq!(ids(&union), vec![cat.id.get(), dog.id.get()]);

        let anonymous =
            pictograms_for_category(category.id, None, ResolutionMode::Union, &repo).unwrap();
        assert_eq!(ids(&anonymous), vec![cat.id.get()]);
    }

    #[test]
    fn user_only_mode_ignores_general_rows() {
        let repo = TestRepository::new();
        let user = repo.add_user("a@example.com");
        let cat = add_general_pictogram(&repo, "cat");
        let category = repo
            .create_category(&new_category("Animals", Ownership::General), &[cat.id])
            .unwrap();

        let listed =
            pictograms_for_category(category.id, Some(user), ResolutionMode::UserOnly, &repo)
                .unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn categories_for_pictogram_hides_invisible_categories() {
        let repo = TestRepository::new();
        let owner = repo.add_user("a@example.com");
        let other = repo.add_user("b@example.com");
        let cat = add_general_pictogram(&repo, "cat");
        let general = repo
            .create_category(&new_category("Animals", Ownership::General), &[cat.id])
            .unwrap();
        repo.create_category(&new_category("Pets", Ownership::OwnedBy(owner)), &[cat.id])
            .unwrap();

        let for_owner = categories_for_pictogram(cat.id, Some(owner), &repo).unwrap();
        assert_eq!(for_owner.len(), 2);

        let for_other = categories_for_pictogram(cat.id, Some(other), &repo).unwrap();
        assert_eq!(for_other.len(), 1);
        assert_eq!(for_other[0].id, general.id);
    }

    #[test]
    fn reachable_pictograms_are_deduplicated_across_categories() {
        let repo = TestRepository::new();
        let cat = add_general_pictogram(&repo, "cat");
        repo.create_category(&new_category("Animals", Ownership::General), &[cat.id])
            .unwrap();
        repo.create_category(&new_category("Pets", Ownership::General), &[cat.id])
            .unwrap();

        let reachable = reachable_pictograms(None, ResolutionMode::Union, &repo).unwrap();
        assert_eq!(ids(&reachable), vec![cat.id.get()]);
    }
}
