use serde::{Deserialize, Serialize};

use super::exercises::{Chronology, FillBlanksSet, MatchingExercise, MindMap};
use super::media::MediaUri;
use crate::model::ids::{ChapterId, CourseId, ModuleId};
use crate::model::quiz::Quiz;

/// A top-level specialty (e.g. gastroenterology) grouping its chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: ModuleId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<MediaUri>,
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: ChapterId,
    pub title: String,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub content: CourseContent,
}

impl Course {
    /// All quizzes attached to this course, normal mode first.
    pub fn quizzes(&self) -> impl Iterator<Item = &Quiz> {
        self.content
            .quiz
            .iter()
            .chain(self.content.clinical_quiz.iter())
    }
}

/// Everything a course page can show besides its title. All sections are
/// optional; content authors fill in what exists for the topic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseContent {
    #[serde(default)]
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz: Option<Quiz>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical_quiz: Option<Quiz>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matching: Vec<MatchingExercise>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_blanks: Option<FillBlanksSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronology: Option<Chronology>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mind_map: Option<MindMap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<Note>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<VideoLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<Keyword>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<MediaUri>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    Definition,
    Concept,
    Important,
    Summary,
}

/// A highlighted study note within a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub title: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: NoteKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoLink {
    pub title: String,
    pub url: MediaUri,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub definition: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::QuizDefinition;
    use crate::model::ids::QuizId;

    #[test]
    fn course_lists_both_quizzes_when_present() {
        let course = Course {
            id: CourseId::new("jaundice"),
            title: "Jaundice".into(),
            content: CourseContent {
                definition: "Yellow discoloration caused by bilirubin.".into(),
                quiz: Some(Quiz {
                    id: QuizId::new("jaundice-quiz"),
                    title: "Quiz".into(),
                    description: None,
                    definition: QuizDefinition::Flat { questions: vec![] },
                }),
                clinical_quiz: Some(Quiz {
                    id: QuizId::new("clinical-jaundice-quiz"),
                    title: "Clinical cases".into(),
                    description: None,
                    definition: QuizDefinition::Grouped { cases: vec![] },
                }),
                ..CourseContent::default()
            },
        };
        let ids: Vec<_> = course.quizzes().map(|quiz| quiz.id.as_str()).collect();
        assert_eq!(ids, ["jaundice-quiz", "clinical-jaundice-quiz"]);
    }

    #[test]
    fn course_content_deserializes_from_sparse_data() {
        let course: Course = serde_json::from_value(serde_json::json!({
            "id": "jaundice",
            "title": "Icter",
            "content": {
                "definition": "Jaundice is a yellow discoloration...",
                "keywords": [
                    { "term": "Bilirubin", "definition": "Yellow pigment." }
                ]
            }
        }))
        .unwrap();
        assert!(course.content.quiz.is_none());
        assert_eq!(course.content.keywords.len(), 1);
        assert!(course.quizzes().next().is_none());
    }
}
