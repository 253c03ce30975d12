use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::types::{PhraseId, PhraseText, UserId};

/// A phrase a user composed and spoke, kept as personal history.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Phrase {
    pub id: PhraseId,
    pub user_id: UserId,
    pub text: PhraseText,
    pub created_at: NaiveDateTime,
}

/// Data required to record a new [`Phrase`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewPhrase {
    pub user_id: UserId,
    pub text: PhraseText,
    pub created_at: NaiveDateTime,
}
