use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::media::MediaUri;

//
// ─── MATCHING ──────────────────────────────────────────────────────────────────
//

/// One left/right pair of a matching exercise. The learner is shown both
/// columns shuffled and draws links between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingPair {
    pub id: String,
    pub left_column: String,
    pub right_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingExercise {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub items: Vec<MatchingPair>,
}

/// Result of grading a set of drawn links: one verdict per pair the learner
/// attempted, plus the totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingOutcome {
    pub verdicts: BTreeMap<String, bool>,
    pub correct: usize,
    pub total: usize,
}

impl MatchingOutcome {
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }

    /// Share of correct links as a whole percentage, 0 for an empty exercise.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.correct as f64 / self.total as f64) * 100.0).round() as u8
    }
}

impl MatchingExercise {
    /// Grades the learner's links: `matches` maps a pair id to the chosen
    /// right-column text. A pair is correct when the chosen text equals its
    /// own right column; unattempted pairs count as wrong.
    #[must_use]
    pub fn check(&self, matches: &BTreeMap<String, String>) -> MatchingOutcome {
        let mut verdicts = BTreeMap::new();
        let mut correct = 0;
        for item in &self.items {
            let ok = matches
                .get(&item.id)
                .is_some_and(|chosen| *chosen == item.right_column);
            if ok {
                correct += 1;
            }
            verdicts.insert(item.id.clone(), ok);
        }
        MatchingOutcome {
            verdicts,
            correct,
            total: self.items.len(),
        }
    }
}

//
// ─── FILL IN THE BLANKS ────────────────────────────────────────────────────────
//

/// A word offered in the word bank; decoy words carry ids that no blank
/// refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordChoice {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blank {
    pub id: String,
    pub correct_word: String,
}

/// A cloze text: the `text` contains `___` placeholders filled from the
/// word bank, graded against `blanks` in placeholder order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillBlanksExercise {
    pub text: String,
    pub words: Vec<WordChoice>,
    pub blanks: Vec<Blank>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlanksOutcome {
    pub correct: usize,
    pub total: usize,
}

impl BlanksOutcome {
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.correct == self.total
    }
}

impl FillBlanksExercise {
    /// Grades placed words: `answers` maps a blank id to the word text the
    /// learner dropped into it.
    #[must_use]
    pub fn check(&self, answers: &BTreeMap<String, String>) -> BlanksOutcome {
        let correct = self
            .blanks
            .iter()
            .filter(|blank| {
                answers
                    .get(&blank.id)
                    .is_some_and(|placed| *placed == blank.correct_word)
            })
            .count();
        BlanksOutcome {
            correct,
            total: self.blanks.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillBlanksSet {
    pub id: String,
    pub title: String,
    pub exercises: Vec<FillBlanksExercise>,
}

//
// ─── CHRONOLOGY ────────────────────────────────────────────────────────────────
//

/// One step of a management timeline (e.g. `H0`, `H0-H2`, `J1`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChronologyEvent {
    pub time: String,
    pub event: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "image", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<MediaUri>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chronology {
    pub title: String,
    pub events: Vec<ChronologyEvent>,
}

//
// ─── MIND MAP ──────────────────────────────────────────────────────────────────
//

/// Mind-map graph data. Node positions and styling are a rendering concern
/// and deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapNode {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapEdge {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMap {
    #[serde(default)]
    pub interactive: bool,
    pub title: String,
    pub nodes: Vec<MindMapNode>,
    pub edges: Vec<MindMapEdge>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
