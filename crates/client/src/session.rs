//! The journal as the user works through it.
//!
//! A [`JournalSession`] owns the draft document, the navigation state and
//! the draft store. Every edit is persisted immediately; syncing to the
//! server is a separate, explicit step (see [`crate::sync`]).

use ikigai_core::entry::{JournalEntry, SaveJournalEntry};
use ikigai_core::error::CoreError;
use ikigai_core::navigation::{JournalStep, Navigator};
use ikigai_core::responses::{ResponseDocument, ResponseField};
use ikigai_core::summary::JournalSummary;

use crate::draft::DraftStore;

/// Question put to the user before a reset clears the journal.
pub const RESET_CONFIRMATION: &str =
    "Are you sure you want to start over? This will clear all your responses.";

pub struct JournalSession<S: DraftStore> {
    store: S,
    key: String,
    document: ResponseDocument,
    navigator: Navigator,
    completed: bool,
}

impl<S: DraftStore> JournalSession<S> {
    /// Load the draft stored under `key` and start on the welcome screen.
    pub fn open(mut store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let document = store.load(&key);
        tracing::debug!(key = %key, answered = document.answered_count(), "Opened journal draft");

        Self {
            store,
            key,
            document,
            navigator: Navigator::new(),
            completed: false,
        }
    }

    pub fn document(&self) -> &ResponseDocument {
        &self.document
    }

    pub fn current_step(&self) -> JournalStep {
        self.navigator.current()
    }

    /// Whether the summary has been reached since the last reset.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn progress_percent(&self) -> u8 {
        self.navigator.progress_percent()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace one answer and persist the draft.
    pub fn update(&mut self, field: ResponseField, value: impl Into<String>) -> &ResponseDocument {
        self.document = self.document.update(field, value);
        self.persist();
        &self.document
    }

    /// [`update`](Self::update) addressed by string keys such as
    /// `("step3", "prompt2")`.
    pub fn update_by_key(
        &mut self,
        section: &str,
        field: &str,
        value: impl Into<String>,
    ) -> Result<&ResponseDocument, CoreError> {
        let field = ResponseField::parse(section, field)?;
        Ok(self.update(field, value))
    }

    pub fn start(&mut self) -> JournalStep {
        self.navigator.start()
    }

    pub fn next(&mut self) -> JournalStep {
        let step = self.navigator.next();
        if step == JournalStep::Summary {
            self.completed = true;
        }
        step
    }

    pub fn previous(&mut self) -> JournalStep {
        self.navigator.previous()
    }

    pub fn go_to(&mut self, n: u8) -> Result<JournalStep, CoreError> {
        self.navigator.go_to(n)
    }

    /// Clear every answer and return to the welcome screen.
    ///
    /// `confirm` is asked [`RESET_CONFIRMATION`]; when it declines nothing
    /// changes. Returns whether the reset happened.
    pub fn reset(&mut self, confirm: impl FnOnce(&str) -> bool) -> bool {
        if !confirm(RESET_CONFIRMATION) {
            return false;
        }

        self.document = ResponseDocument::initial();
        self.persist();
        self.navigator.reset();
        self.completed = false;
        tracing::info!(key = %self.key, "Journal reset");
        true
    }

    /// Adopt an entry fetched from the sync server.
    ///
    /// The entry's document replaces the draft and navigation resumes at its
    /// stored step. A step that does not parse is rejected before anything
    /// changes.
    pub fn restore(&mut self, entry: &JournalEntry) -> Result<(), CoreError> {
        let step = entry.step()?;
        self.document = entry.responses.clone();
        self.navigator = Navigator::restore(step);
        self.completed = entry.is_completed() || step == JournalStep::Summary;
        self.persist();
        Ok(())
    }

    /// Payload for an explicit save of the current state.
    pub fn save_payload(&self) -> SaveJournalEntry {
        SaveJournalEntry::new(self.document.clone(), self.current_step(), self.completed)
    }

    pub fn summary(&self) -> JournalSummary {
        JournalSummary::from_document(&self.document)
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn persist(&mut self) {
        self.store.save(&self.key, &self.document);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
