use med_core::model::content::{Chapter, Course, Module};
use med_core::model::{CourseId, Quiz, QuizId};

/// Read side of the bundled course catalog.
///
/// The module hierarchy is static content compiled into the app; this
/// service owns one copy and answers lookups and searches over it.
#[derive(Debug, Clone)]
pub struct CatalogService {
    modules: Vec<Module>,
}

impl CatalogService {
    #[must_use]
    pub fn new(modules: Vec<Module>) -> Self {
        Self { modules }
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Case-insensitive search over course titles and definitions.
    ///
    /// Chapters and modules left without a matching course are pruned from
    /// the result; a blank query returns the whole catalog.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<Module> {
        if query.trim().is_empty() {
            return self.modules.clone();
        }
        let needle = query.to_lowercase();

        self.modules
            .iter()
            .filter_map(|module| {
                let chapters: Vec<Chapter> = module
                    .chapters
                    .iter()
                    .filter_map(|chapter| {
                        let courses: Vec<Course> = chapter
                            .courses
                            .iter()
                            .filter(|course| {
                                course.title.to_lowercase().contains(&needle)
                                    || course
                                        .content
                                        .definition
                                        .to_lowercase()
                                        .contains(&needle)
                            })
                            .cloned()
                            .collect();
                        (!courses.is_empty()).then(|| Chapter {
                            id: chapter.id.clone(),
                            title: chapter.title.clone(),
                            courses,
                        })
                    })
                    .collect();
                (!chapters.is_empty()).then(|| Module {
                    id: module.id.clone(),
                    title: module.title.clone(),
                    icon: module.icon.clone(),
                    chapters,
                })
            })
            .collect()
    }

    /// Iterates over every course in the catalog, in module order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.modules
            .iter()
            .flat_map(|module| module.chapters.iter())
            .flat_map(|chapter| chapter.courses.iter())
    }

    #[must_use]
    pub fn find_course(&self, id: &CourseId) -> Option<&Course> {
        self.courses().find(|course| course.id == *id)
    }

    /// Looks a quiz up across both normal and clinical quizzes of every
    /// course.
    #[must_use]
    pub fn find_quiz(&self, id: &QuizId) -> Option<&Quiz> {
        self.courses()
            .flat_map(Course::quizzes)
            .find(|quiz| quiz.id == *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use med_core::model::content::CourseContent;
    use med_core::model::{ChapterId, ModuleId, QuizDefinition};

    fn course(id: &str, title: &str, definition: &str, quiz_id: Option<&str>) -> Course {
        Course {
            id: CourseId::new(id),
            title: title.into(),
            content: CourseContent {
                definition: definition.into(),
                quiz: quiz_id.map(|quiz_id| Quiz {
                    id: QuizId::new(quiz_id),
                    title: format!("Quiz - {title}"),
                    description: None,
                    definition: QuizDefinition::Flat { questions: vec![] },
                }),
                ..CourseContent::default()
            },
        }
    }

    fn catalog() -> CatalogService {
        CatalogService::new(vec![Module {
            id: ModuleId::new("gastro"),
            title: "Gastrology".into(),
            icon: None,
            chapters: vec![
                Chapter {
                    id: ChapterId::new("gastro-symptoms"),
                    title: "Symptoms".into(),
                    courses: vec![
                        course(
                            "jaundice",
                            "Jaundice",
                            "Yellow discoloration caused by bilirubin buildup.",
                            Some("jaundice-quiz"),
                        ),
                        course("hep", "Hepatomegaly", "Enlargement of the liver.", None),
                    ],
                },
                Chapter {
                    id: ChapterId::new("gastro-diseases"),
                    title: "Diseases".into(),
                    courses: vec![course("hepatitis", "Hepatitis", "Liver inflammation.", None)],
                },
            ],
        }])
    }

    #[test]
    fn blank_query_returns_everything() {
        let catalog = catalog();
        assert_eq!(catalog.filter("  "), catalog.modules());
    }

    #[test]
    fn filter_matches_titles_and_definitions_case_insensitively() {
        let catalog = catalog();

        let by_title = catalog.filter("JAUN");
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].chapters.len(), 1);
        assert_eq!(by_title[0].chapters[0].courses.len(), 1);
        assert_eq!(by_title[0].chapters[0].courses[0].id, CourseId::new("jaundice"));

        let by_definition = catalog.filter("bilirubin");
        assert_eq!(by_definition[0].chapters[0].courses[0].id, CourseId::new("jaundice"));
    }

    #[test]
    fn filter_prunes_empty_chapters_and_modules() {
        let catalog = catalog();
        let hits = catalog.filter("hepatitis");
        assert_eq!(hits.len(), 1);
        // the symptoms chapter has no match and is gone entirely
        assert_eq!(hits[0].chapters.len(), 1);
        assert_eq!(hits[0].chapters[0].id, ChapterId::new("gastro-diseases"));

        assert!(catalog.filter("cardiomyopathy").is_empty());
    }

    #[test]
    fn lookups_traverse_the_whole_hierarchy() {
        let catalog = catalog();
        assert!(catalog.find_course(&CourseId::new("hepatitis")).is_some());
        assert!(catalog.find_course(&CourseId::new("missing")).is_none());

        let quiz = catalog.find_quiz(&QuizId::new("jaundice-quiz")).unwrap();
        assert_eq!(quiz.title, "Quiz - Jaundice");
        assert!(catalog.find_quiz(&QuizId::new("missing-quiz")).is_none());
    }
}
