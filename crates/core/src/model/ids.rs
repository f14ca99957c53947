use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for a quiz, assigned by the content author (e.g. `jaundice-quiz`).
///
/// The progress store keys persisted records by this value; it is
/// caller-provided and not checked for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizId(String);

/// Identifier for a top-level content module (e.g. `gastro`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

/// Identifier for a chapter within a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChapterId(String);

/// Identifier for a course within a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            /// Creates a new identifier from the given slug.
            #[must_use]
            pub fn new(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Returns the underlying slug.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                Self::new(raw)
            }
        }
    };
}

string_id!(QuizId);
string_id!(ModuleId);
string_id!(ChapterId);
string_id!(CourseId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_id_display_round_trips() {
        let id = QuizId::new("jaundice-quiz");
        assert_eq!(id.to_string(), "jaundice-quiz");
        assert_eq!(QuizId::new(id.to_string()), id);
    }

    #[test]
    fn ids_of_different_kinds_are_distinct_types() {
        let module = ModuleId::from("gastro");
        let chapter = ChapterId::from("gastro-symptoms");
        assert_eq!(module.as_str(), "gastro");
        assert_eq!(chapter.as_str(), "gastro-symptoms");
    }
}
