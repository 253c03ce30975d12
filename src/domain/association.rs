use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{AssociationId, CategoryId, PictogramId, Scope};

/// A category/pictogram fact recorded in one scope.
///
/// The same pair may exist once per scope: once in the shared graph and once
/// in any number of private views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Association {
    pub id: AssociationId,
    pub category_id: CategoryId,
    pub pictogram_id: PictogramId,
    pub scope: Scope,
    pub created_at: NaiveDateTime,
}

/// Entity an association set is anchored on when it is replaced or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssociationPivot {
    Category(CategoryId),
    Pictogram(PictogramId),
}

impl std::fmt::Display for AssociationPivot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Category(id) => write!(f, "category {id}"),
            Self::Pictogram(id) => write!(f, "pictogram {id}"),
        }
    }
}
