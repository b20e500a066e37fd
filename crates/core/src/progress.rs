//! Course progress state manager.
//!
//! Owns the enrollment flag, the materialized modules and the derived
//! `finished` flag. Every mutating call recomputes `finished` before it
//! returns, so readers never observe a stale value.

use thiserror::Error;

use crate::model::{Lesson, Module};
use crate::template::CourseTemplate;

/// Lookup miss reported by [`CourseProgress::try_toggle_lesson`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LookupError {
    #[error("unknown module: {module_id}")]
    UnknownModule { module_id: String },

    #[error("unknown lesson {lesson_id} in module {module_id}")]
    UnknownLesson { module_id: String, lesson_id: String },
}

/// Coarse state of a progress session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    NotEnrolled,
    InProgress,
    Complete,
}

impl CourseStatus {
    /// Badge text shown next to the course.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotEnrolled => "Não inscrito",
            Self::InProgress => "Inscrito",
            Self::Complete => "Concluído",
        }
    }
}

/// In-memory progress for the single tracked course.
///
/// Starts out not enrolled with no modules. Nothing here is persisted; a new
/// process starts from scratch.
#[derive(Debug, Clone, Default)]
pub struct CourseProgress {
    template: CourseTemplate,
    enrolled: bool,
    finished: bool,
    modules: Vec<Module>,
}

impl CourseProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::with_template(CourseTemplate::new())
    }

    #[must_use]
    pub fn with_template(template: CourseTemplate) -> Self {
        Self {
            template,
            enrolled: false,
            finished: false,
            modules: Vec::new(),
        }
    }

    #[must_use]
    pub fn template(&self) -> &CourseTemplate {
        &self.template
    }

    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        self.enrolled
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Modules of the current session; empty when not enrolled.
    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    /// Materialize a fresh, all-incomplete session from the template.
    ///
    /// Re-enrolling discards any previous progress.
    pub fn enroll(&mut self) {
        self.modules = self.template.modules();
        self.enrolled = true;
        self.finished = false;
        self.recompute();
    }

    /// Flip the completion flag of one lesson.
    ///
    /// Unknown module or lesson ids leave the state untouched.
    pub fn toggle_lesson(&mut self, module_id: &str, lesson_id: &str) {
        let _ = self.try_toggle_lesson(module_id, lesson_id);
    }

    /// Strict variant of [`toggle_lesson`](Self::toggle_lesson).
    ///
    /// Returns the lesson's new `done` flag.
    ///
    /// # Errors
    ///
    /// Returns `LookupError` if the module or the lesson does not exist; the
    /// state is unchanged in that case.
    pub fn try_toggle_lesson(
        &mut self,
        module_id: &str,
        lesson_id: &str,
    ) -> Result<bool, LookupError> {
        let module = self
            .modules
            .iter_mut()
            .find(|m| *m.id() == *module_id)
            .ok_or_else(|| LookupError::UnknownModule {
                module_id: module_id.to_string(),
            })?;
        let lesson = module
            .lesson_mut(lesson_id)
            .ok_or_else(|| LookupError::UnknownLesson {
                module_id: module_id.to_string(),
                lesson_id: lesson_id.to_string(),
            })?;

        let done = lesson.toggle();
        self.recompute();
        Ok(done)
    }

    #[must_use]
    pub fn module(&self, module_id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| *m.id() == *module_id)
    }

    #[must_use]
    pub fn lesson(&self, module_id: &str, lesson_id: &str) -> Option<&Lesson> {
        self.module(module_id)?.lesson(lesson_id)
    }

    #[must_use]
    pub fn total_lessons(&self) -> usize {
        self.modules.iter().map(Module::lesson_count).sum()
    }

    #[must_use]
    pub fn completed_lessons(&self) -> usize {
        self.modules.iter().map(Module::completed_count).sum()
    }

    /// Share of completed lessons, rounded to the nearest whole percent.
    ///
    /// Returns 0 when there are no lessons.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        let total = self.total_lessons();
        if total == 0 {
            return 0;
        }
        let done = self.completed_lessons();
        // Integer round-half-up of 100 * done / total.
        let percent = (200 * done + total) / (2 * total);
        u8::try_from(percent).unwrap_or(100)
    }

    #[must_use]
    pub fn status(&self) -> CourseStatus {
        if self.finished {
            CourseStatus::Complete
        } else if self.enrolled {
            CourseStatus::InProgress
        } else {
            CourseStatus::NotEnrolled
        }
    }

    #[must_use]
    pub fn certificate_available(&self) -> bool {
        self.finished
    }

    fn recompute(&mut self) {
        let total = self.total_lessons();
        self.finished = self.enrolled && total > 0 && self.completed_lessons() == total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_LESSONS: [(&str, &str); 8] = [
        ("m1", "l1"),
        ("m1", "l2"),
        ("m1", "l3"),
        ("m2", "l4"),
        ("m2", "l5"),
        ("m2", "l6"),
        ("m3", "l7"),
        ("m3", "l8"),
    ];

    fn enrolled() -> CourseProgress {
        let mut progress = CourseProgress::new();
        progress.enroll();
        progress
    }

    fn complete_all(progress: &mut CourseProgress) {
        for (module_id, lesson_id) in ALL_LESSONS {
            progress.toggle_lesson(module_id, lesson_id);
        }
    }

    #[test]
    fn starts_not_enrolled() {
        let progress = CourseProgress::new();
        assert!(!progress.is_enrolled());
        assert!(!progress.is_finished());
        assert!(progress.modules().is_empty());
        assert_eq!(progress.progress_percent(), 0);
        assert_eq!(progress.status(), CourseStatus::NotEnrolled);
    }

    #[test]
    fn enroll_materializes_template() {
        let progress = enrolled();
        assert!(progress.is_enrolled());
        assert!(!progress.is_finished());
        assert_eq!(progress.modules().len(), 3);
        assert_eq!(progress.total_lessons(), 8);
        assert_eq!(progress.completed_lessons(), 0);
        assert_eq!(progress.progress_percent(), 0);
        assert_eq!(progress.status(), CourseStatus::InProgress);
    }

    #[test]
    fn completing_every_lesson_finishes_course() {
        let mut progress = enrolled();
        complete_all(&mut progress);
        assert_eq!(progress.progress_percent(), 100);
        assert!(progress.is_finished());
        assert!(progress.certificate_available());
        assert_eq!(progress.status(), CourseStatus::Complete);
    }

    #[test]
    fn untoggling_one_lesson_reopens_course() {
        let mut progress = enrolled();
        complete_all(&mut progress);
        progress.toggle_lesson("m2", "l5");
        assert_eq!(progress.progress_percent(), 88);
        assert!(!progress.is_finished());
        assert_eq!(progress.status(), CourseStatus::InProgress);
    }

    #[test]
    fn finished_is_never_stale_after_last_toggle() {
        let mut progress = enrolled();
        for (i, (module_id, lesson_id)) in ALL_LESSONS.iter().enumerate() {
            progress.toggle_lesson(module_id, lesson_id);
            assert_eq!(progress.is_finished(), i == ALL_LESSONS.len() - 1);
        }
    }

    #[test]
    fn percent_is_monotonic_while_completing() {
        let mut progress = enrolled();
        let mut last = progress.progress_percent();
        for (module_id, lesson_id) in ALL_LESSONS {
            progress.toggle_lesson(module_id, lesson_id);
            let now = progress.progress_percent();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn percent_rounds_to_nearest() {
        let mut progress = enrolled();
        progress.toggle_lesson("m1", "l1");
        // 12.5 rounds up
        assert_eq!(progress.progress_percent(), 13);
        progress.toggle_lesson("m1", "l2");
        assert_eq!(progress.progress_percent(), 25);
        progress.toggle_lesson("m1", "l3");
        // 37.5 rounds up
        assert_eq!(progress.progress_percent(), 38);
    }

    #[test]
    fn double_toggle_restores_state() {
        let mut progress = enrolled();
        progress.toggle_lesson("m1", "l1");
        let before = progress.modules().to_vec();
        let percent = progress.progress_percent();

        progress.toggle_lesson("m3", "l8");
        progress.toggle_lesson("m3", "l8");
        assert_eq!(progress.modules(), before.as_slice());
        assert_eq!(progress.progress_percent(), percent);
        assert!(!progress.is_finished());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut progress = enrolled();
        progress.toggle_lesson("m1", "l1");
        let before = progress.modules().to_vec();

        progress.toggle_lesson("bogus-module", "l1");
        progress.toggle_lesson("m1", "l4");
        assert_eq!(progress.modules(), before.as_slice());
        assert_eq!(progress.progress_percent(), 13);
    }

    #[test]
    fn strict_toggle_reports_lookup_misses() {
        let mut progress = enrolled();
        assert_eq!(
            progress.try_toggle_lesson("bogus-module", "l1"),
            Err(LookupError::UnknownModule {
                module_id: "bogus-module".into()
            })
        );
        assert_eq!(
            progress.try_toggle_lesson("m3", "l1"),
            Err(LookupError::UnknownLesson {
                module_id: "m3".into(),
                lesson_id: "l1".into()
            })
        );
        assert_eq!(progress.completed_lessons(), 0);
        assert_eq!(progress.try_toggle_lesson("m3", "l7"), Ok(true));
        assert_eq!(progress.try_toggle_lesson("m3", "l7"), Ok(false));
    }

    #[test]
    fn toggle_before_enrolling_is_a_no_op() {
        let mut progress = CourseProgress::new();
        progress.toggle_lesson("m1", "l1");
        assert!(progress.modules().is_empty());
        assert!(!progress.is_finished());
    }

    #[test]
    fn re_enroll_resets_progress() {
        let mut progress = enrolled();
        complete_all(&mut progress);
        assert!(progress.is_finished());

        progress.enroll();
        assert!(progress.is_enrolled());
        assert!(!progress.is_finished());
        assert_eq!(progress.completed_lessons(), 0);
        assert!(
            progress
                .modules()
                .iter()
                .flat_map(Module::lessons)
                .all(|l| !l.is_done())
        );
    }

    #[test]
    fn sessions_do_not_share_lessons() {
        let mut first = enrolled();
        let second = enrolled();
        first.toggle_lesson("m1", "l1");
        assert!(first.lesson("m1", "l1").unwrap().is_done());
        assert!(!second.lesson("m1", "l1").unwrap().is_done());
        assert!(!first.template().modules()[0].lessons()[0].is_done());
    }

    #[test]
    fn status_labels() {
        assert_eq!(CourseStatus::NotEnrolled.label(), "Não inscrito");
        assert_eq!(CourseStatus::Complete.label(), "Concluído");
    }
}
