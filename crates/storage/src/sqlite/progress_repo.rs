use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{ProgressRecord, ProgressRepository, StorageError};
use med_core::model::QuizId;

use super::SqliteRepository;

/// Row key for a quiz's progress blob, keeping the `quiz_state_<quizId>`
/// naming of earlier releases so records migrate over unchanged.
fn storage_key(quiz_id: &QuizId) -> String {
    format!("quiz_state_{quiz_id}")
}

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn get(&self, quiz_id: &QuizId) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query("SELECT state FROM quiz_progress WHERE storage_key = ?1")
            .bind(storage_key(quiz_id))
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let blob: String = row
            .try_get("state")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        match serde_json::from_str::<ProgressRecord>(&blob) {
            Ok(record) => Ok(Some(record)),
            Err(err) => {
                // An unreadable blob is lost progress, not a fatal error:
                // drop the row and report the record as absent.
                log::warn!("discarding malformed progress record for quiz {quiz_id}: {err}");
                ProgressRepository::delete(self, quiz_id).await?;
                Ok(None)
            }
        }
    }

    async fn put(&self, quiz_id: &QuizId, record: &ProgressRecord) -> Result<(), StorageError> {
        let blob = serde_json::to_string(record)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO quiz_progress (storage_key, state, last_updated)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(storage_key) DO UPDATE SET
                state = excluded.state,
                last_updated = excluded.last_updated
            ",
        )
        .bind(storage_key(quiz_id))
        .bind(blob)
        .bind(record.last_updated.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }

    async fn delete(&self, quiz_id: &QuizId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM quiz_progress WHERE storage_key = ?1")
            .bind(storage_key(quiz_id))
            .execute(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_keep_the_legacy_naming() {
        assert_eq!(
            storage_key(&QuizId::new("jaundice-quiz")),
            "quiz_state_jaundice-quiz"
        );
    }
}
