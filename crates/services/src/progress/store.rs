use std::sync::Arc;

use chrono::Duration;

use med_core::Clock;
use med_core::model::{QuizDefinition, QuizId};
use storage::repository::{ProgressRecord, ProgressRepository};

use super::session::QuizSession;
use super::view::ProgressSnapshot;

/// Saved progress older than this is discarded at load instead of resumed.
const EXPIRY_HOURS: i64 = 24;

/// Durable progress tracking for one quiz session.
///
/// Owns the in-memory `QuizSession` and commits it to the repository after
/// every state-changing operation, so an abrupt close loses at most the
/// action in flight. Persistence is best-effort throughout: a record that
/// is absent, expired, unreadable, or from a differently-shaped quiz is
/// silently replaced by a fresh attempt, and a failed write is logged
/// without interrupting the session — the in-memory state stays
/// authoritative.
pub struct QuizProgressStore {
    quiz_id: QuizId,
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
    session: QuizSession,
}

impl QuizProgressStore {
    #[must_use]
    pub fn new(
        quiz_id: QuizId,
        definition: QuizDefinition,
        clock: Clock,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            quiz_id,
            clock,
            progress,
            session: QuizSession::new(definition),
        }
    }

    #[must_use]
    pub fn quiz_id(&self) -> &QuizId {
        &self.quiz_id
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Returns a summary of the current progress.
    #[must_use]
    pub fn progress(&self) -> ProgressSnapshot {
        self.session.progress()
    }

    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.session.can_advance()
    }

    /// Resumes persisted progress for this quiz, if a fresh record exists.
    ///
    /// A record older than 24 hours, one that fails to parse, or one whose
    /// answers no longer fit the quiz content is deleted and replaced by
    /// the zero state. Storage read failures are logged and also fall back
    /// to the zero state; this never errors outward.
    pub async fn load(&mut self) -> &QuizSession {
        self.session.reset();
        match self.progress.get(&self.quiz_id).await {
            Ok(Some(record)) => {
                let age = self.clock.now() - record.last_updated;
                if age > Duration::hours(EXPIRY_HOURS) {
                    self.discard_record().await;
                } else if !self.session.try_restore(record.into_state()) {
                    self.discard_record().await;
                }
            }
            Ok(None) => {}
            Err(err) => {
                log::warn!("failed to read progress for quiz {}: {err}", self.quiz_id);
            }
        }
        &self.session
    }

    /// Records the learner's pick for the current question and commits.
    /// First answer wins; returns whether anything changed.
    pub async fn select_answer(&mut self, answer_index: usize) -> bool {
        let changed = self.session.select_answer(answer_index);
        if changed {
            self.save().await;
        }
        changed
    }

    /// Moves forward if the current question is answered and commits.
    pub async fn advance(&mut self) -> bool {
        let changed = self.session.advance();
        if changed {
            self.save().await;
        }
        changed
    }

    /// Moves backward and commits; free of any gating.
    pub async fn retreat(&mut self) -> bool {
        let changed = self.session.retreat();
        if changed {
            self.save().await;
        }
        changed
    }

    /// Jumps to a question within the current group and commits.
    pub async fn go_to_question(&mut self, target: usize) -> bool {
        let changed = self.session.go_to_question(target);
        if changed {
            self.save().await;
        }
        changed
    }

    /// Jumps to another case group and commits.
    pub async fn go_to_case(&mut self, target: usize) -> bool {
        let changed = self.session.go_to_case(target);
        if changed {
            self.save().await;
        }
        changed
    }

    /// Drops the persisted record and resets the session to the zero state.
    pub async fn restart(&mut self) -> &QuizSession {
        self.discard_record().await;
        self.session.reset();
        &self.session
    }

    /// Commits the full authoritative state, stamped with the current time.
    ///
    /// Progress tracking is a convenience, not a guarantee: on a write
    /// failure the error is logged and the session carries on; the next
    /// load simply will not see the newest progress.
    async fn save(&self) {
        let record = ProgressRecord::from_state(self.session.state(), self.clock.now());
        if let Err(err) = self.progress.put(&self.quiz_id, &record).await {
            log::warn!("failed to persist progress for quiz {}: {err}", self.quiz_id);
        }
    }

    async fn discard_record(&self) {
        if let Err(err) = self.progress.delete(&self.quiz_id).await {
            log::warn!(
                "failed to delete stale progress for quiz {}: {err}",
                self.quiz_id
            );
        }
    }
}
