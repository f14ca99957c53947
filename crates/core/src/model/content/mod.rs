mod course;
mod exercises;
mod media;

pub use course::{Chapter, Course, CourseContent, Keyword, Module, Note, NoteKind, Reference, VideoLink};
pub use exercises::{
    Blank, BlanksOutcome, Chronology, ChronologyEvent, FillBlanksExercise, FillBlanksSet,
    MatchingExercise, MatchingOutcome, MatchingPair, MindMap, MindMapEdge, MindMapNode, WordChoice,
};
pub use media::{MediaUri, MediaValidationError};
