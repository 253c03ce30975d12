use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::phrase::{NewPhrase as DomainNewPhrase, Phrase as DomainPhrase};
use crate::domain::types::{PhraseText, TypeConstraintError};

/// Diesel model representing the `phrases` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::phrases)]
pub struct Phrase {
    pub id: i32,
    pub user_id: i32,
    pub text: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Phrase`].
#[derive(Insertable)]
#[diesel(table_name = crate::schema::phrases)]
pub struct NewPhrase<'a> {
    pub user_id: i32,
    pub text: &'a str,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Phrase> for DomainPhrase {
    type Error = TypeConstraintError;

    fn try_from(phrase: Phrase) -> Result<Self, Self::Error> {
        Ok(Self {
            id: phrase.id.try_into()?,
            user_id: phrase.user_id.try_into()?,
            text: PhraseText::new(phrase.text)?,
            created_at: phrase.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewPhrase> for NewPhrase<'a> {
    fn from(phrase: &'a DomainNewPhrase) -> Self {
        Self {
            user_id: phrase.user_id.get(),
            text: phrase.text.as_str(),
            created_at: phrase.created_at,
        }
    }
}
