use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::phrase::Phrase;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhraseDto {
    pub id: i32,
    pub text: String,
    pub created_at: NaiveDateTime,
}

impl From<Phrase> for PhraseDto {
    fn from(value: Phrase) -> Self {
        Self {
            id: value.id.get(),
            text: value.text.into_inner(),
            created_at: value.created_at,
        }
    }
}
