//! Journal entry records and the save payload.
//!
//! A [`JournalEntry`] is the server-side mirror of one user's journal. It is
//! written only through [`SaveJournalEntry`] payloads, which are validated in
//! full before any store is touched.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::navigation::JournalStep;
use crate::responses::ResponseDocument;
use crate::types::{EntityId, Timestamp, UserId};

/// `currentStep` assigned to a new entry when the payload omits it.
pub const DEFAULT_CURRENT_STEP: &str = "1";

/// Persisted string values of the `completed` flag.
pub const COMPLETED_TRUE: &str = "true";
pub const COMPLETED_FALSE: &str = "false";

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// One user's journal as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: EntityId,
    pub user_id: UserId,
    pub responses: ResponseDocument,
    pub current_step: String,
    pub completed: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl JournalEntry {
    /// Build a fresh entry for `user_id` with a newly generated id.
    pub fn create(user_id: UserId, payload: &SaveJournalEntry, now: Timestamp) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            user_id,
            responses: payload.responses.clone(),
            current_step: payload
                .current_step
                .clone()
                .unwrap_or_else(|| DEFAULT_CURRENT_STEP.to_owned()),
            completed: payload
                .completed
                .clone()
                .unwrap_or_else(|| COMPLETED_FALSE.to_owned()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the mutable fields present in `payload`.
    ///
    /// `responses` is always replaced; `currentStep` and `completed` only
    /// when the payload carries them. Identity fields never change.
    pub fn apply(&mut self, payload: &SaveJournalEntry, now: Timestamp) {
        self.responses = payload.responses.clone();
        if let Some(step) = &payload.current_step {
            self.current_step = step.clone();
        }
        if let Some(completed) = &payload.completed {
            self.completed = completed.clone();
        }
        self.updated_at = now;
    }

    /// The persisted step as a navigation state.
    pub fn step(&self) -> Result<JournalStep, CoreError> {
        JournalStep::from_str_db(&self.current_step)
    }

    pub fn is_completed(&self) -> bool {
        self.completed == COMPLETED_TRUE
    }
}

// ---------------------------------------------------------------------------
// Save payload
// ---------------------------------------------------------------------------

/// Body of a journal save request.
///
/// `responses` is required. `currentStep` and `completed` are optional and
/// only overwrite stored values when present. Unrecognised top-level keys
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveJournalEntry {
    pub responses: ResponseDocument,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<String>,
}

impl SaveJournalEntry {
    pub fn new(responses: ResponseDocument, step: JournalStep, completed: bool) -> Self {
        Self {
            responses,
            current_step: Some(step.as_db_string()),
            completed: Some(completed_str(completed).to_owned()),
        }
    }

    /// Decode and validate a raw JSON body.
    ///
    /// Either the whole payload is accepted or an error is returned; callers
    /// must not touch storage until this succeeds.
    pub fn from_json(value: serde_json::Value) -> Result<Self, CoreError> {
        let payload: Self = serde_json::from_value(value)
            .map_err(|e| CoreError::Validation(format!("Malformed journal payload: {e}")))?;
        payload.validate()?;
        Ok(payload)
    }

    /// Check the optional scalar fields.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(step) = &self.current_step {
            JournalStep::from_str_db(step)?;
        }
        if let Some(completed) = &self.completed {
            validate_completed(completed)?;
        }
        Ok(())
    }
}

/// Persisted string form of a completion flag.
pub fn completed_str(completed: bool) -> &'static str {
    if completed {
        COMPLETED_TRUE
    } else {
        COMPLETED_FALSE
    }
}

/// Validate a `completed` flag string.
pub fn validate_completed(value: &str) -> Result<(), CoreError> {
    match value {
        COMPLETED_TRUE | COMPLETED_FALSE => Ok(()),
        _ => Err(CoreError::Validation(format!(
            "Invalid completed flag '{value}'. Must be one of: true, false"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::ResponseField;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn empty_responses() -> serde_json::Value {
        serde_json::to_value(ResponseDocument::initial()).unwrap()
    }

    #[test]
    fn payload_accepts_full_body() {
        let payload = SaveJournalEntry::from_json(json!({
            "responses": empty_responses(),
            "currentStep": "2",
            "completed": "false"
        }))
        .unwrap();
        assert_eq!(payload.current_step.as_deref(), Some("2"));
        assert_eq!(payload.completed.as_deref(), Some("false"));
    }

    #[test]
    fn payload_optional_fields_may_be_omitted() {
        let payload =
            SaveJournalEntry::from_json(json!({ "responses": empty_responses() })).unwrap();
        assert_eq!(payload.current_step, None);
        assert_eq!(payload.completed, None);
    }

    #[test]
    fn payload_ignores_unknown_top_level_keys() {
        let payload = SaveJournalEntry::from_json(json!({
            "responses": empty_responses(),
            "id": "client-side-id"
        }));
        assert!(payload.is_ok());
    }

    #[test]
    fn payload_without_responses_is_rejected() {
        let result =
            SaveJournalEntry::from_json(json!({ "currentStep": "1", "completed": "false" }));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn payload_with_malformed_responses_is_rejected() {
        let result = SaveJournalEntry::from_json(json!({ "responses": { "step1": "oops" } }));
        assert_matches!(result, Err(CoreError::Validation(_)));

        let result = SaveJournalEntry::from_json(json!({ "responses": "not an object" }));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn payload_with_bad_scalars_is_rejected() {
        let result = SaveJournalEntry::from_json(json!({
            "responses": empty_responses(),
            "currentStep": "9"
        }));
        assert_matches!(result, Err(CoreError::InvalidStep(_)));

        let result = SaveJournalEntry::from_json(json!({
            "responses": empty_responses(),
            "completed": "yes"
        }));
        assert_matches!(result, Err(CoreError::Validation(_)));

        let result = SaveJournalEntry::from_json(json!({
            "responses": empty_responses(),
            "currentStep": 2
        }));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn create_applies_defaults() {
        let payload = SaveJournalEntry {
            responses: ResponseDocument::initial(),
            current_step: None,
            completed: None,
        };
        let entry = JournalEntry::create(UserId::new("demo-user"), &payload, Utc::now());
        assert_eq!(entry.current_step, DEFAULT_CURRENT_STEP);
        assert_eq!(entry.completed, COMPLETED_FALSE);
        assert_eq!(entry.step().unwrap(), JournalStep::Love);
        assert!(!entry.is_completed());
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[test]
    fn apply_overwrites_only_present_fields() {
        let created = Utc::now();
        let first = SaveJournalEntry::new(ResponseDocument::initial(), JournalStep::GoodAt, false);
        let mut entry = JournalEntry::create(UserId::new("demo-user"), &first, created);
        let id = entry.id;

        let edited = ResponseDocument::initial().update(ResponseField::Ikigai, "Build tools");
        let partial = SaveJournalEntry {
            responses: edited.clone(),
            current_step: None,
            completed: Some(COMPLETED_TRUE.to_owned()),
        };
        let later = created + Duration::seconds(5);
        entry.apply(&partial, later);

        assert_eq!(entry.id, id);
        assert_eq!(entry.responses, edited);
        assert_eq!(entry.current_step, "2");
        assert!(entry.is_completed());
        assert_eq!(entry.created_at, created);
        assert_eq!(entry.updated_at, later);
    }

    #[test]
    fn entry_serializes_camel_case() {
        let payload = SaveJournalEntry::new(ResponseDocument::initial(), JournalStep::Love, false);
        let entry = JournalEntry::create(UserId::new("demo-user"), &payload, Utc::now());
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["userId"], "demo-user");
        assert_eq!(value["currentStep"], "1");
        assert_eq!(value["completed"], "false");
        assert!(value["id"].is_string());
        assert!(value["responses"]["step5"].is_object());
    }
}
