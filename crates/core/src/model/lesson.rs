use serde::{Deserialize, Serialize};

use crate::model::ids::LessonId;

/// Smallest trackable unit of course content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    id: LessonId,
    title: String,
    done: bool,
}

impl Lesson {
    /// Creates an incomplete lesson.
    #[must_use]
    pub fn new(id: LessonId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            done: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> &LessonId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Flips the completion flag and returns the new value.
    pub(crate) fn toggle(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }
}
