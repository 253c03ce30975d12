//! Ownership rules gating catalog mutations.
//!
//! | action            | general   | caller's  | other user's |
//! |-------------------|-----------|-----------|--------------|
//! | update category   | allowed   | allowed   | forbidden    |
//! | update pictogram  | allowed   | allowed   | per policy   |
//! | delete category   | forbidden | allowed   | forbidden    |
//! | delete pictogram  | forbidden | allowed   | forbidden    |

use crate::domain::types::{Ownership, UserId};
use crate::models::config::PictogramUpdatePolicy;

use super::{ServiceError, ServiceResult};

/// Mutation being attempted on an existing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogAction {
    UpdateCategory,
    UpdatePictogram(PictogramUpdatePolicy),
    DeleteCategory,
    DeletePictogram,
}

/// Check whether `caller` may perform `action` on an entity owned by `owner`.
pub fn authorize(action: CatalogAction, owner: Ownership, caller: UserId) -> ServiceResult<()> {
    let allowed = match (action, owner) {
        (_, Ownership::OwnedBy(user_id)) if user_id == caller => true,
        (CatalogAction::UpdatePictogram(PictogramUpdatePolicy::Open), _) => true,
        (CatalogAction::UpdateCategory | CatalogAction::UpdatePictogram(_), Ownership::General) => {
            true
        }
        (CatalogAction::DeleteCategory | CatalogAction::DeletePictogram, Ownership::General) => {
            false
        }
        (_, Ownership::OwnedBy(_)) => false,
    };

    if allowed {
        Ok(())
    } else {
        log::warn!("User {caller} denied {action:?} on {owner} entity");
        Err(ServiceError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caller() -> UserId {
        UserId::new(1).unwrap()
    }

    fn other() -> Ownership {
        Ownership::OwnedBy(UserId::new(2).unwrap())
    }

    fn own() -> Ownership {
        Ownership::OwnedBy(caller())
    }

    #[test]
    fn general_entities_are_never_deletable() {
        for action in [CatalogAction::DeleteCategory, CatalogAction::DeletePictogram] {
            assert_eq!(
                authorize(action, Ownership::General, caller()),
                Err(ServiceError::Forbidden)
            );
        }
    }

    #[test]
    fn owners_may_update_and_delete() {
        for action in [
            CatalogAction::UpdateCategory,
            CatalogAction::UpdatePictogram(PictogramUpdatePolicy::OwnerGated),
            CatalogAction::DeleteCategory,
            CatalogAction::DeletePictogram,
        ] {
            assert_eq!(authorize(action, own(), caller()), Ok(()));
        }
    }

    #[test]
    fn other_users_entities_are_protected() {
        for action in [
            CatalogAction::UpdateCategory,
            CatalogAction::UpdatePictogram(PictogramUpdatePolicy::OwnerGated),
            CatalogAction::DeleteCategory,
            CatalogAction::DeletePictogram,
        ] {
            assert_eq!(
                authorize(action, other(), caller()),
                Err(ServiceError::Forbidden)
            );
        }
    }

    #[test]
    fn general_category_is_editable_by_any_caller() {
        assert_eq!(
            authorize(CatalogAction::UpdateCategory, Ownership::General, caller()),
            Ok(())
        );
    }

    #[test]
    fn open_pictogram_policy_skips_the_owner_gate() {
        let action = CatalogAction::UpdatePictogram(PictogramUpdatePolicy::Open);
        assert_eq!(authorize(action, other(), caller()), Ok(()));
        assert_eq!(authorize(action, Ownership::General, caller()), Ok(()));
    }
}
