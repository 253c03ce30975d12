//! Per-user suppression of pictograms from resolved listings.
//!
//! Hiding never touches pictograms or associations and is applied only as
//! the final step over already-resolved output.

use std::collections::HashSet;

use crate::domain::pictogram::Pictogram;
use crate::domain::types::{PictogramId, UserId};
use crate::dto::pictograms::PictogramDto;
use crate::repository::{HiddenPictogramReader, HiddenPictogramWriter, PictogramReader};
use crate::services::visibility::require_visible_pictogram;

use super::ServiceResult;

/// Drop every pictogram whose id is in `hidden`, preserving order.
pub fn apply_hide_filter(
    hidden: &HashSet<PictogramId>,
    pictograms: Vec<Pictogram>,
) -> Vec<Pictogram> {
    pictograms
        .into_iter()
        .filter(|pictogram| !hidden.contains(&pictogram.id))
        .collect()
}

/// Load `user_id`'s hidden set and filter `pictograms` through it.
pub fn filter_hidden<R>(
    user_id: UserId,
    pictograms: Vec<Pictogram>,
    repo: &R,
) -> ServiceResult<Vec<Pictogram>>
where
    R: HiddenPictogramReader,
{
    let hidden: HashSet<PictogramId> = repo.list_hidden_pictograms(user_id)?.into_iter().collect();
    Ok(apply_hide_filter(&hidden, pictograms))
}

/// Hide a pictogram the caller can see. Returns `false` if it was already hidden.
pub fn hide_pictogram<R>(caller: UserId, pictogram_id: PictogramId, repo: &R) -> ServiceResult<bool>
where
    R: PictogramReader + HiddenPictogramWriter,
{
    require_visible_pictogram(pictogram_id, Some(caller), repo)?;

    match repo.hide_pictogram(caller, pictogram_id) {
        Ok(inserted) => Ok(inserted > 0),
        Err(e) => {
            log::error!("Failed to hide pictogram {pictogram_id} for user {caller}: {e}");
            Err(e.into())
        }
    }
}

/// Unhide a pictogram. Returns `false` if it was not hidden.
pub fn unhide_pictogram<R>(
    caller: UserId,
    pictogram_id: PictogramId,
    repo: &R,
) -> ServiceResult<bool>
where
    R: HiddenPictogramWriter,
{
    match repo.unhide_pictogram(caller, pictogram_id) {
        Ok(deleted) => Ok(deleted > 0),
        Err(e) => {
            log::error!("Failed to unhide pictogram {pictogram_id} for user {caller}: {e}");
            Err(e.into())
        }
    }
}

/// Pictograms the caller has hidden, in id order.
pub fn hidden_pictograms<R>(caller: UserId, repo: &R) -> ServiceResult<Vec<PictogramDto>>
where
    R: HiddenPictogramReader + PictogramReader,
{
    let ids = repo.list_hidden_pictograms(caller)?;
    let pictograms = repo.get_pictograms_by_ids(&ids)?;
    Ok(pictograms
        .into_iter()
        .filter(|p| p.owner.is_visible_to(Some(caller)))
        .map(PictogramDto::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pictogram::NewPictogram;
    use crate::domain::types::{Ownership, PictogramKind, PictogramName};
    use crate::repository::PictogramWriter;
    use crate::repository::test::TestRepository;
    use crate::services::ServiceError;
    use chrono::DateTime;

    fn add_pictogram(repo: &TestRepository, name: &str, owner: Ownership) -> Pictogram {
        let now = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        let new = NewPictogram {
            name: PictogramName::new(name).unwrap(),
            image: None,
            kind: PictogramKind::new("noun").unwrap(),
            owner,
            created_at: now,
            updated_at: now,
        };
        repo.create_pictogram(&new, &[]).unwrap()
    }

    #[test]
    fn hiding_is_idempotent_and_per_user() {
        let repo = TestRepository::new();
        let ann = repo.add_user("ann@example.com");
        let bob = repo.add_user("bob@example.com");
        let cat = add_pictogram(&repo, "cat", Ownership::General);
        let dog = add_pictogram(&repo, "dog", Ownership::General);

        assert!(hide_pictogram(ann, cat.id, &repo).unwrap());
        assert!(!hide_pictogram(ann, cat.id, &repo).unwrap());

        let all = vec![cat.clone(), dog.clone()];
        let for_ann = filter_hidden(ann, all.clone(), &repo).unwrap();
        assert_eq!(for_ann, vec![dog.clone()]);
        let for_bob = filter_hidden(bob, all, &repo).unwrap();
        assert_eq!(for_bob.len(), 2);
        assert!(repo.get_pictogram_by_id(cat.id).unwrap().is_some());
    }

    #[test]
    fn unhide_restores_and_is_idempotent() {
        let repo = TestRepository::new();
        let ann = repo.add_user("ann@example.com");
        let cat = add_pictogram(&repo, "cat", Ownership::General);

        hide_pictogram(ann, cat.id, &repo).unwrap();
        assert!(unhide_pictogram(ann, cat.id, &repo).unwrap());
        assert!(!unhide_pictogram(ann, cat.id, &repo).unwrap());
        assert!(hidden_pictograms(ann, &repo).unwrap().is_empty());
    }

    #[test]
    fn cannot_hide_someone_elses_private_pictogram() {
        let repo = TestRepository::new();
        let ann = repo.add_user("ann@example.com");
        let bob = repo.add_user("bob@example.com");
        let secret = add_pictogram(&repo, "secret", Ownership::OwnedBy(bob));

        assert_eq!(
            hide_pictogram(ann, secret.id, &repo),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn hidden_pictograms_lists_what_was_hidden() {
        let repo = TestRepository::new();
        let ann = repo.add_user("ann@example.com");
        let cat = add_pictogram(&repo, "cat", Ownership::General);
        add_pictogram(&repo, "dog", Ownership::General);

        hide_pictogram(ann, cat.id, &repo).unwrap();
        let hidden = hidden_pictograms(ann, &repo).unwrap();
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].name, "cat");
    }
}
