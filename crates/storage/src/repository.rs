use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use med_core::model::{QuestionKey, QuizId, QuizState};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted shape of a learner's progress in one quiz.
///
/// Field names and the RFC 3339 timestamp match the JSON blobs earlier
/// releases wrote to their key-value store, so existing saves remain
/// readable. `last_updated` is stamped by the caller at save time and
/// drives the 24-hour expiry check on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub current_case: usize,
    pub current_question: usize,
    pub selected_answers: BTreeMap<QuestionKey, usize>,
    pub score: u32,
    pub completed: bool,
    pub last_updated: DateTime<Utc>,
}

impl ProgressRecord {
    #[must_use]
    pub fn from_state(state: &QuizState, last_updated: DateTime<Utc>) -> Self {
        Self {
            current_case: state.current_case,
            current_question: state.current_question,
            selected_answers: state.selected_answers.clone(),
            score: state.score,
            completed: state.completed,
            last_updated,
        }
    }

    /// Convert the record back into in-memory state. The persisted score is
    /// carried over verbatim; callers rehydrating a session are expected to
    /// recompute it against the quiz definition.
    #[must_use]
    pub fn into_state(self) -> QuizState {
        QuizState {
            current_case: self.current_case,
            current_question: self.current_question,
            selected_answers: self.selected_answers,
            score: self.score,
            completed: self.completed,
        }
    }
}

/// Repository contract for quiz progress records: one record per quiz id.
///
/// Writes are last-write-wins; a given quiz id has a single owner at a time
/// in this application, so `put` is a plain replace rather than a
/// compare-and-swap. A multi-writer deployment would need to revisit that.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the record for a quiz.
    ///
    /// Returns `Ok(None)` when no record exists or when the stored bytes
    /// are unreadable (unreadable records are dropped on the spot).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached.
    async fn get(&self, quiz_id: &QuizId) -> Result<Option<ProgressRecord>, StorageError>;

    /// Insert or replace the record for a quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn put(&self, quiz_id: &QuizId, record: &ProgressRecord) -> Result<(), StorageError>;

    /// Remove the record for a quiz; removing an absent record is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be reached.
    async fn delete(&self, quiz_id: &QuizId) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<HashMap<QuizId, ProgressRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn get(&self, quiz_id: &QuizId) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(quiz_id).cloned())
    }

    async fn put(&self, quiz_id: &QuizId, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(quiz_id.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, quiz_id: &QuizId) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(quiz_id);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            progress: Arc::new(InMemoryRepository::new()),
        }
    }
}
