use med_core::model::{CaseGroup, Question, QuestionKey, QuizDefinition, QuizState};

use super::view::ProgressSnapshot;

/// In-memory stepping rules for one quiz attempt.
///
/// Binds a `QuizDefinition` to the learner's `QuizState` and enforces the
/// forced-sequential policy: the current question must be answered before
/// moving forward, while moving backward and revisiting within the current
/// case are always free. Every operation is total and synchronous; a
/// disallowed request is a silent no-op reported through the `bool` return
/// value, never an error.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    definition: QuizDefinition,
    state: QuizState,
}

impl QuizSession {
    /// Starts a fresh attempt at the first question of the first group.
    #[must_use]
    pub fn new(definition: QuizDefinition) -> Self {
        Self {
            definition,
            state: QuizState::default(),
        }
    }

    /// Attempts to adopt a persisted state.
    ///
    /// Returns `false` — leaving the zero state in place — when the record
    /// does not match this quiz's shape (out-of-range positions, or answer
    /// keys that no longer resolve because the content changed). On
    /// success the score is recomputed from the answers; the persisted
    /// score is never trusted.
    pub fn try_restore(&mut self, state: QuizState) -> bool {
        if !state.is_consistent_with(&self.definition) {
            return false;
        }
        self.state = state;
        self.state.recompute_score(&self.definition);
        true
    }

    /// Drops all progress and returns to the zero state.
    pub fn reset(&mut self) {
        self.state = QuizState::default();
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn definition(&self) -> &QuizDefinition {
        &self.definition
    }

    #[must_use]
    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// The case group being presented; `None` for flat quizzes.
    #[must_use]
    pub fn current_case(&self) -> Option<&CaseGroup> {
        self.definition.case(self.state.current_case)
    }

    #[must_use]
    pub fn current_case_index(&self) -> usize {
        self.state.current_case
    }

    /// The question being presented; `None` only for an empty quiz.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.definition
            .question(self.state.current_case, self.state.current_question)
    }

    #[must_use]
    pub fn current_question_index(&self) -> usize {
        self.state.current_question
    }

    /// Answer key of the question being presented.
    #[must_use]
    pub fn current_key(&self) -> QuestionKey {
        self.definition
            .key_for(self.state.current_case, self.state.current_question)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.state.score
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    /// Share of answered questions as a whole percentage, regardless of
    /// correctness. 0 for an empty quiz.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn progress_percent(&self) -> u8 {
        let total = self.definition.total_questions();
        if total == 0 {
            return 0;
        }
        let answered = self.state.answered_count();
        ((answered as f64 / total as f64) * 100.0).round() as u8
    }

    /// Returns a summary of the current progress.
    #[must_use]
    pub fn progress(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            total: self.definition.total_questions(),
            answered: self.state.answered_count(),
            percent: self.progress_percent(),
            score: self.state.score,
            completed: self.state.completed,
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Records the learner's pick for the current question.
    ///
    /// First answer wins: if the question already has a recorded answer
    /// nothing changes and `false` is returned. The score is credited only
    /// when the pick is the correct option; an out-of-range index is
    /// recorded but never credited.
    pub fn select_answer(&mut self, answer_index: usize) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        let key = self.current_key();
        if self.state.is_answered(&key) {
            return false;
        }
        let correct = question.is_correct(answer_index);
        self.state.selected_answers.insert(key, answer_index);
        if correct {
            self.state.score += 1;
        }
        true
    }

    /// True iff the current question has a recorded answer, i.e. the
    /// learner may move forward.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        self.state.is_answered(&self.current_key())
    }

    /// Moves forward: next question in the group, else the first question
    /// of the next group, else marks the quiz completed with the indices
    /// frozen. A no-op while the current question is unanswered, and once
    /// the quiz is completed.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        let case = self.state.current_case;
        if self.state.current_question + 1 < self.definition.question_count(case) {
            self.state.current_question += 1;
        } else if case + 1 < self.definition.group_count() {
            self.state.current_case = case + 1;
            self.state.current_question = 0;
        } else if self.state.completed {
            // terminal: there is no forward transition out of completion
            return false;
        } else {
            self.state.completed = true;
        }
        true
    }

    /// Moves backward: previous question in the group, else the last
    /// question of the previous group. Never gated and never touches the
    /// score or the completion flag; a no-op at the very first question.
    pub fn retreat(&mut self) -> bool {
        if self.state.current_question > 0 {
            self.state.current_question -= 1;
            true
        } else if self.state.current_case > 0 {
            self.state.current_case -= 1;
            self.state.current_question = self
                .definition
                .question_count(self.state.current_case)
                .saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// Free navigation within the current group, bypassing the answer gate
    /// so learners can revisit questions. Out-of-range targets are ignored.
    pub fn go_to_question(&mut self, target: usize) -> bool {
        if target == self.state.current_question
            || target >= self.definition.question_count(self.state.current_case)
        {
            return false;
        }
        self.state.current_question = target;
        true
    }

    /// Jumps to another case group, landing on its first question.
    /// Out-of-range targets (and flat quizzes, which have one group) are
    /// ignored.
    pub fn go_to_case(&mut self, target: usize) -> bool {
        if target == self.state.current_case || target >= self.definition.group_count() {
            return false;
        }
        self.state.current_case = target;
        self.state.current_question = 0;
        true
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
