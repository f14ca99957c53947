pub mod content;
mod ids;
mod progress;
mod quiz;

pub use content::{MediaUri, MediaValidationError};
pub use ids::{ChapterId, CourseId, ModuleId, QuizId};
pub use progress::QuizState;
pub use quiz::{CaseGroup, Difficulty, Question, QuestionKey, Quiz, QuizDefinition, QuizError};
