use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::domain::phrase::NewPhrase;
use crate::domain::types::{PhraseText, UserId};

use super::FormError;

/// A phrase submitted after the user composed and spoke it.
#[derive(Deserialize, Validate)]
pub struct AddPhraseForm {
    #[validate(length(min = 1, max = 1000))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddPhraseFormPayload {
    pub text: PhraseText,
}

impl AddPhraseFormPayload {
    pub fn to_new_phrase(&self, user_id: UserId) -> NewPhrase {
        NewPhrase {
            user_id,
            text: self.text.clone(),
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<AddPhraseForm> for AddPhraseFormPayload {
    type Error = FormError;

    fn try_from(value: AddPhraseForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            text: PhraseText::new(value.text)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_form_trims_text() {
        let form = AddPhraseForm {
            text: "  I want water  ".to_string(),
        };

        let payload: AddPhraseFormPayload = form.try_into().unwrap();
        assert_eq!(payload.text.as_str(), "I want water");
    }

    #[test]
    fn phrase_form_rejects_blank_text() {
        let form = AddPhraseForm {
            text: "   ".to_string(),
        };

        let payload: Result<AddPhraseFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(FormError::TypeConstraint(_))));
    }
}
