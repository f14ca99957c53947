use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::content::MediaUri;
use crate::model::ids::QuizId;

//
// ─── ERRORS (authoring validation) ─────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("question {key} has no options")]
    NoOptions { key: QuestionKey },

    #[error("question {key} marks option {index} correct but only {len} options exist")]
    CorrectAnswerOutOfRange {
        key: QuestionKey,
        index: usize,
        len: usize,
    },
}

//
// ─── QUESTIONS & CASES ─────────────────────────────────────────────────────────
//

/// Author-assigned difficulty tag, shown as a badge next to the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A single multiple-choice question. Immutable content data; the progress
/// state never owns or mutates questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    pub explanation: String,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<MediaUri>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl Question {
    /// True iff `answer` picks the correct option.
    ///
    /// An out-of-range index is never credited, even when the authored
    /// `correct_answer` is itself out of range.
    #[must_use]
    pub fn is_correct(&self, answer: usize) -> bool {
        answer < self.options.len() && answer == self.correct_answer
    }
}

/// A clinical case: a titled vignette with its own question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseGroup {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub presentation: String,
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<MediaUri>,
}

//
// ─── QUESTION KEYS ─────────────────────────────────────────────────────────────
//

/// Stable key identifying a question position within a quiz, used to index
/// recorded answers. Same positions always derive the same key, so lookups
/// survive re-renders and persistence round-trips.
///
/// The wire format matches the records earlier releases persisted
/// (`case_{case}_q_{question}` for grouped quizzes, `q_{question}` for flat
/// ones) and parses back to positions so stale records can be detected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionKey(String);

impl QuestionKey {
    /// Key for a question in a flat quiz.
    #[must_use]
    pub fn flat(question: usize) -> Self {
        Self(format!("q_{question}"))
    }

    /// Key for a question inside a case group.
    #[must_use]
    pub fn grouped(case: usize, question: usize) -> Self {
        Self(format!("case_{case}_q_{question}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parse_flat(&self) -> Option<usize> {
        self.0.strip_prefix("q_")?.parse().ok()
    }

    fn parse_grouped(&self) -> Option<(usize, usize)> {
        let rest = self.0.strip_prefix("case_")?;
        let (case, question) = rest.split_once("_q_")?;
        Some((case.parse().ok()?, question.parse().ok()?))
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── QUIZ DEFINITION ───────────────────────────────────────────────────────────
//

/// The shape of a quiz: a flat question list or a list of case groups.
///
/// The variant is decided once, at deserialization, instead of re-probing
/// the data for a `cases` field on every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuizDefinition {
    Grouped { cases: Vec<CaseGroup> },
    Flat { questions: Vec<Question> },
}

impl QuizDefinition {
    /// Number of case groups; a flat quiz counts as one group.
    #[must_use]
    pub fn group_count(&self) -> usize {
        match self {
            QuizDefinition::Grouped { cases } => cases.len(),
            QuizDefinition::Flat { .. } => 1,
        }
    }

    /// Number of questions in the given group, 0 if the group does not exist.
    #[must_use]
    pub fn question_count(&self, case: usize) -> usize {
        match self {
            QuizDefinition::Grouped { cases } => {
                cases.get(case).map_or(0, |group| group.questions.len())
            }
            QuizDefinition::Flat { questions } => {
                if case == 0 { questions.len() } else { 0 }
            }
        }
    }

    /// Total question count across all groups.
    #[must_use]
    pub fn total_questions(&self) -> usize {
        match self {
            QuizDefinition::Grouped { cases } => {
                cases.iter().map(|group| group.questions.len()).sum()
            }
            QuizDefinition::Flat { questions } => questions.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_questions() == 0
    }

    /// The question at the given position, if it exists.
    #[must_use]
    pub fn question(&self, case: usize, question: usize) -> Option<&Question> {
        match self {
            QuizDefinition::Grouped { cases } => cases.get(case)?.questions.get(question),
            QuizDefinition::Flat { questions } => {
                if case == 0 { questions.get(question) } else { None }
            }
        }
    }

    /// The case group at the given index; always `None` for flat quizzes.
    #[must_use]
    pub fn case(&self, case: usize) -> Option<&CaseGroup> {
        match self {
            QuizDefinition::Grouped { cases } => cases.get(case),
            QuizDefinition::Flat { .. } => None,
        }
    }

    /// Derives the answer key for a question position.
    #[must_use]
    pub fn key_for(&self, case: usize, question: usize) -> QuestionKey {
        match self {
            QuizDefinition::Grouped { .. } => QuestionKey::grouped(case, question),
            QuizDefinition::Flat { .. } => QuestionKey::flat(question),
        }
    }

    /// Resolves a persisted answer key back to its question.
    ///
    /// Returns `None` when the key does not follow this quiz's shape or
    /// points outside it — the signal that a persisted record belongs to a
    /// differently-shaped quiz and must be discarded.
    #[must_use]
    pub fn resolve_key(&self, key: &QuestionKey) -> Option<&Question> {
        match self {
            QuizDefinition::Grouped { .. } => {
                let (case, question) = key.parse_grouped()?;
                self.question(case, question)
            }
            QuizDefinition::Flat { .. } => {
                let question = key.parse_flat()?;
                self.question(0, question)
            }
        }
    }

    /// Iterates over all questions in group order.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        let groups: Vec<&[Question]> = match self {
            QuizDefinition::Grouped { cases } => {
                cases.iter().map(|group| group.questions.as_slice()).collect()
            }
            QuizDefinition::Flat { questions } => vec![questions.as_slice()],
        };
        groups.into_iter().flatten()
    }

    /// Authoring check: every question has options and a correct answer
    /// that refers to one of them.
    ///
    /// # Errors
    ///
    /// Returns the first `QuizError` found, keyed by question position.
    pub fn validate(&self) -> Result<(), QuizError> {
        fn check(question: &Question, key: QuestionKey) -> Result<(), QuizError> {
            if question.options.is_empty() {
                return Err(QuizError::NoOptions { key });
            }
            if question.correct_answer >= question.options.len() {
                return Err(QuizError::CorrectAnswerOutOfRange {
                    key,
                    index: question.correct_answer,
                    len: question.options.len(),
                });
            }
            Ok(())
        }

        match self {
            QuizDefinition::Grouped { cases } => {
                for (case, group) in cases.iter().enumerate() {
                    for (index, question) in group.questions.iter().enumerate() {
                        check(question, QuestionKey::grouped(case, index))?;
                    }
                }
            }
            QuizDefinition::Flat { questions } => {
                for (index, question) in questions.iter().enumerate() {
                    check(question, QuestionKey::flat(index))?;
                }
            }
        }
        Ok(())
    }
}

/// A quiz as authored: identity plus its question shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: QuizId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub definition: QuizDefinition,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, correct: usize) -> Question {
        Question {
            id,
            text: format!("Question {id}"),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct,
            explanation: String::new(),
            image_url: None,
            difficulty: None,
        }
    }

    fn grouped() -> QuizDefinition {
        QuizDefinition::Grouped {
            cases: vec![
                CaseGroup {
                    id: "case1".into(),
                    title: "Typical presentation".into(),
                    presentation: "A 54-year-old patient presents with...".into(),
                    questions: vec![question(1, 0), question(2, 1)],
                    image_url: None,
                },
                CaseGroup {
                    id: "case2".into(),
                    title: "Atypical presentation".into(),
                    presentation: String::new(),
                    questions: vec![question(3, 2)],
                    image_url: None,
                },
            ],
        }
    }

    #[test]
    fn flat_quiz_counts_as_one_group() {
        let quiz = QuizDefinition::Flat {
            questions: vec![question(1, 0), question(2, 1)],
        };
        assert_eq!(quiz.group_count(), 1);
        assert_eq!(quiz.question_count(0), 2);
        assert_eq!(quiz.question_count(1), 0);
        assert_eq!(quiz.total_questions(), 2);
        assert!(quiz.case(0).is_none());
    }

    #[test]
    fn grouped_quiz_sums_questions_across_cases() {
        let quiz = grouped();
        assert_eq!(quiz.group_count(), 2);
        assert_eq!(quiz.total_questions(), 3);
        assert_eq!(quiz.question_count(1), 1);
        assert_eq!(quiz.question(1, 0).unwrap().id, 3);
    }

    #[test]
    fn keys_are_stable_and_shape_specific() {
        let flat = QuizDefinition::Flat {
            questions: vec![question(1, 0)],
        };
        assert_eq!(flat.key_for(0, 0).as_str(), "q_0");

        let quiz = grouped();
        assert_eq!(quiz.key_for(1, 0).as_str(), "case_1_q_0");
        assert_eq!(quiz.key_for(1, 0), quiz.key_for(1, 0));
    }

    #[test]
    fn resolve_key_rejects_foreign_and_out_of_range_keys() {
        let quiz = grouped();
        assert_eq!(quiz.resolve_key(&QuestionKey::grouped(0, 1)).unwrap().id, 2);
        // flat-form key against a grouped quiz
        assert!(quiz.resolve_key(&QuestionKey::flat(0)).is_none());
        // beyond the last case
        assert!(quiz.resolve_key(&QuestionKey::grouped(2, 0)).is_none());
        // beyond the case's last question
        assert!(quiz.resolve_key(&QuestionKey::grouped(1, 1)).is_none());
    }

    #[test]
    fn out_of_range_answer_is_never_correct() {
        let q = question(1, 1);
        assert!(q.is_correct(1));
        assert!(!q.is_correct(4));

        let bad = Question {
            correct_answer: 9,
            ..question(1, 0)
        };
        assert!(!bad.is_correct(9));
    }

    #[test]
    fn validate_flags_bad_correct_answer() {
        let quiz = QuizDefinition::Flat {
            questions: vec![question(1, 0), question(2, 7)],
        };
        let err = quiz.validate().unwrap_err();
        assert_eq!(
            err,
            QuizError::CorrectAnswerOutOfRange {
                key: QuestionKey::flat(1),
                index: 7,
                len: 4,
            }
        );
    }

    #[test]
    fn definition_deserializes_by_shape() {
        let flat: QuizDefinition = serde_json::from_value(serde_json::json!({
            "questions": [{
                "id": 1,
                "text": "Which value?",
                "options": ["20", "35", "50", "75"],
                "correctAnswer": 2,
                "explanation": "50 is the clinical threshold.",
                "difficulty": "easy"
            }]
        }))
        .unwrap();
        assert!(matches!(flat, QuizDefinition::Flat { .. }));

        let grouped: QuizDefinition = serde_json::from_value(serde_json::json!({
            "cases": [{
                "id": "case1",
                "title": "Case 1",
                "questions": []
            }]
        }))
        .unwrap();
        assert!(matches!(grouped, QuizDefinition::Grouped { .. }));
    }
}
