//! Phrase history: what a user composed and spoke, newest first.

use crate::domain::types::UserId;
use crate::dto::phrases::PhraseDto;
use crate::forms::phrases::AddPhraseFormPayload;
use crate::repository::{PhraseReader, PhraseWriter, UserReader};
use crate::services::registration::require_user;

use super::ServiceResult;

/// Record a phrase in the caller's history.
pub fn create_phrase<R>(
    payload: AddPhraseFormPayload,
    caller: UserId,
    repo: &R,
) -> ServiceResult<PhraseDto>
where
    R: UserReader + PhraseWriter,
{
    require_user(caller, repo)?;

    match repo.create_phrase(&payload.to_new_phrase(caller)) {
        Ok(phrase) => {
            log::debug!("Saved phrase {} for user {caller}", phrase.id);
            Ok(phrase.into())
        }
        Err(e) => {
            log::error!("Failed to save phrase for user {caller}: {e}");
            Err(e.into())
        }
    }
}

/// The caller's phrases. Other users' history is never included.
pub fn list_phrases<R>(caller: UserId, repo: &R) -> ServiceResult<Vec<PhraseDto>>
where
    R: PhraseReader,
{
    match repo.list_phrases(caller) {
        Ok(phrases) => Ok(phrases.into_iter().map(PhraseDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list phrases for user {caller}: {e}");
            Err(e.into())
        }
    }
}
