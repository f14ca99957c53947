use std::collections::BTreeMap;

use crate::model::quiz::{QuestionKey, QuizDefinition};

/// A learner's position and recorded answers within one quiz.
///
/// This is pure data; the stepping rules (answer gating, advancing,
/// retreating) live in the services layer, bound to a `QuizDefinition`.
/// `Default` is the zero-value state a fresh quiz starts from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizState {
    /// Index into the case list; always 0 for flat quizzes.
    pub current_case: usize,
    /// Index into the current group's question list.
    pub current_question: usize,
    /// One entry per answered question; an absent key means unanswered.
    pub selected_answers: BTreeMap<QuestionKey, usize>,
    /// Count of correctly answered questions, non-decreasing within a session.
    pub score: u32,
    /// Set once the learner advances past the last question of the last group.
    pub completed: bool,
}

impl QuizState {
    /// Number of questions answered so far.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selected_answers.len()
    }

    #[must_use]
    pub fn is_answered(&self, key: &QuestionKey) -> bool {
        self.selected_answers.contains_key(key)
    }

    #[must_use]
    pub fn answer_for(&self, key: &QuestionKey) -> Option<usize> {
        self.selected_answers.get(key).copied()
    }

    /// Replays the recorded answers against the definition and rewrites
    /// `score` accordingly.
    ///
    /// A persisted score is never trusted: after any rehydration the score
    /// must equal the number of recorded answers matching their question's
    /// correct option, so the state is recomputed rather than left to drift.
    pub fn recompute_score(&mut self, definition: &QuizDefinition) {
        let correct = self
            .selected_answers
            .iter()
            .filter(|(key, answer)| {
                definition
                    .resolve_key(key)
                    .is_some_and(|question| question.is_correct(**answer))
            })
            .count();
        self.score = u32::try_from(correct).unwrap_or(u32::MAX);
    }

    /// True iff every recorded answer key resolves to a question of this
    /// definition and the position indices are in range.
    ///
    /// A state failing this check came from a differently-shaped quiz (the
    /// content changed underneath a saved record) and must be discarded.
    #[must_use]
    pub fn is_consistent_with(&self, definition: &QuizDefinition) -> bool {
        let in_range = self.current_case < definition.group_count()
            && self.current_question < definition.question_count(self.current_case);
        in_range
            && self
                .selected_answers
                .keys()
                .all(|key| definition.resolve_key(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quiz::Question;

    fn question(id: u32, correct: usize) -> Question {
        Question {
            id,
            text: String::new(),
            options: vec!["A".into(), "B".into(), "C".into()],
            correct_answer: correct,
            explanation: String::new(),
            image_url: None,
            difficulty: None,
        }
    }

    fn flat() -> QuizDefinition {
        QuizDefinition::Flat {
            questions: vec![question(1, 0), question(2, 1), question(3, 2)],
        }
    }

    #[test]
    fn zero_state_is_default() {
        let state = QuizState::default();
        assert_eq!(state.current_case, 0);
        assert_eq!(state.current_question, 0);
        assert_eq!(state.answered_count(), 0);
        assert_eq!(state.score, 0);
        assert!(!state.completed);
    }

    #[test]
    fn recompute_score_ignores_wrong_and_out_of_range_answers() {
        let definition = flat();
        let mut state = QuizState {
            selected_answers: BTreeMap::from([
                (QuestionKey::flat(0), 0), // correct
                (QuestionKey::flat(1), 2), // wrong
                (QuestionKey::flat(2), 9), // out of range
            ]),
            score: 99, // persisted scores are not trusted
            ..QuizState::default()
        };
        state.recompute_score(&definition);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn consistency_rejects_foreign_keys_and_bad_positions() {
        let definition = flat();

        let good = QuizState {
            current_question: 2,
            selected_answers: BTreeMap::from([(QuestionKey::flat(1), 1)]),
            ..QuizState::default()
        };
        assert!(good.is_consistent_with(&definition));

        let foreign_key = QuizState {
            selected_answers: BTreeMap::from([(QuestionKey::grouped(0, 1), 1)]),
            ..QuizState::default()
        };
        assert!(!foreign_key.is_consistent_with(&definition));

        let out_of_range = QuizState {
            current_question: 3,
            ..QuizState::default()
        };
        assert!(!out_of_range.is_consistent_with(&definition));
    }
}
