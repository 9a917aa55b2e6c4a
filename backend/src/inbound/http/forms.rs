//! Decoding of the editor form.
//!
//! The editor posts repeated `skill` fields, one per slot, so the body is
//! decoded as ordered pairs rather than into a struct.

use serde::Deserialize;

use crate::domain::{Draft, EditorIntent, Error, SortKey, UserId};

/// Decoded `POST /users` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSubmission {
    pub draft: Draft,
    pub intent: EditorIntent,
    pub sort: SortKey,
}

impl EditorSubmission {
    /// Build the submission from raw form pairs.
    ///
    /// Slot fields (`skill`) take precedence over the comma-separated
    /// `skills` field when both are present. An `id` of `""` or `"0"` marks
    /// a new record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_request`] when `id` is neither blank nor a
    /// positive integer.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, Error> {
        let mut draft = Draft::new();
        let mut intent = EditorIntent::Save;
        let mut sort = SortKey::Unsorted;
        let mut slots = Vec::new();
        let mut skills_text = None;

        for (key, value) in pairs {
            match key.as_str() {
                "id" => draft = draft.with_id(parse_draft_id(&value)?),
                "name" => draft.set_name(value),
                "surname" => draft.set_surname(value),
                "email" => draft.set_email(value),
                "skill" => slots.push(value),
                "skills" => skills_text = Some(value),
                "intent" => intent = EditorIntent::parse(&value),
                "sort" => sort = SortKey::parse(&value),
                _ => {}
            }
        }

        match skills_text {
            Some(text) if slots.is_empty() => draft.set_skills_text(&text),
            _ => draft.set_skills(slots),
        }

        Ok(Self {
            draft,
            intent,
            sort,
        })
    }
}

fn parse_draft_id(value: &str) -> Result<Option<UserId>, Error> {
    match value.trim() {
        "" | "0" => Ok(None),
        raw => raw.parse::<UserId>().map(Some).map_err(|_| {
            Error::invalid_request("user id must be a positive integer")
                .with_details(serde_json::json!({ "field": "id", "value": value }))
        }),
    }
}

/// Body of the per-row delete form.
#[derive(Debug, Default, Deserialize)]
pub struct SortForm {
    #[serde(default)]
    pub sort: String,
}

/// Body of the delete-by-id form.
#[derive(Debug, Deserialize)]
pub struct DeleteByIdForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub sort: String,
}
