use diesel::prelude::*;

use crate::domain::phrase::{NewPhrase, Phrase};
use crate::domain::types::UserId;
use crate::models::phrase::{NewPhrase as DbNewPhrase, Phrase as DbPhrase};
use crate::repository::{DieselRepository, PhraseReader, PhraseWriter, RepositoryResult};

impl PhraseReader for DieselRepository {
    fn list_phrases(&self, user_id: UserId) -> RepositoryResult<Vec<Phrase>> {
        use crate::schema::phrases;

        let mut conn = self.conn()?;

        let items = phrases::table
            .filter(phrases::user_id.eq(user_id.get()))
            .order((phrases::created_at.desc(), phrases::id.desc()))
            .load::<DbPhrase>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }
}

impl PhraseWriter for DieselRepository {
    fn create_phrase(&self, phrase: &NewPhrase) -> RepositoryResult<Phrase> {
        use crate::schema::phrases;

        let mut conn = self.conn()?;
        let db_phrase = DbNewPhrase::from(phrase);

        let created = diesel::insert_into(phrases::table)
            .values(&db_phrase)
            .get_result::<DbPhrase>(&mut conn)?
            .try_into()?;

        Ok(created)
    }
}
