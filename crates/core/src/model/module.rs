use serde::{Deserialize, Serialize};

use crate::model::ids::{LessonId, ModuleId};
use crate::model::lesson::Lesson;

/// A named, ordered group of lessons.
///
/// The lesson set is fixed once the module is materialized; only the nested
/// completion flags change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    id: ModuleId,
    title: String,
    lessons: Vec<Lesson>,
}

impl Module {
    #[must_use]
    pub fn new(id: ModuleId, title: impl Into<String>, lessons: Vec<Lesson>) -> Self {
        Self {
            id,
            title: title.into(),
            lessons,
        }
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Lessons in display order.
    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.lessons.iter().filter(|l| l.is_done()).count()
    }

    #[must_use]
    pub fn lesson(&self, id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| *l.id() == *id)
    }

    pub(crate) fn lesson_mut(&mut self, id: &str) -> Option<&mut Lesson> {
        self.lessons.iter_mut().find(|l| *l.id() == *id)
    }

    /// Convenience for building template modules from `(id, title)` pairs.
    pub(crate) fn from_titles(id: &str, title: &str, lessons: &[(&str, &str)]) -> Self {
        let lessons = lessons
            .iter()
            .map(|(lesson_id, lesson_title)| Lesson::new(LessonId::new(*lesson_id), *lesson_title))
            .collect();
        Self::new(ModuleId::new(id), title, lessons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_completed_lessons() {
        let mut module = Module::from_titles("m1", "Basics", &[("l1", "One"), ("l2", "Two")]);
        assert_eq!(module.lesson_count(), 2);
        assert_eq!(module.completed_count(), 0);

        module.lesson_mut("l2").unwrap().toggle();
        assert_eq!(module.completed_count(), 1);
        assert!(module.lesson("l2").unwrap().is_done());
        assert!(!module.lesson("l1").unwrap().is_done());
    }

    #[test]
    fn missing_lesson_lookup_is_none() {
        let module = Module::from_titles("m1", "Basics", &[("l1", "One")]);
        assert!(module.lesson("l9").is_none());
    }
}
