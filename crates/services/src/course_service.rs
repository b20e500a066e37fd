use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use course_core::model::Module;
use course_core::{CourseProgress, CourseStatus};
use tracing::{debug, info, warn};

use crate::error::CourseServiceError;

/// How `CourseService::toggle_lesson` treats ids that match nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupMode {
    /// Ignore the call and leave state untouched.
    #[default]
    Silent,
    /// Report the miss as an error.
    Strict,
}

/// Point-in-time copy of the progress state for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseSnapshot {
    pub status: CourseStatus,
    pub enrolled: bool,
    pub finished: bool,
    pub percent: u8,
    pub completed_lessons: usize,
    pub total_lessons: usize,
    pub modules: Vec<Module>,
}

impl CourseSnapshot {
    fn capture(progress: &CourseProgress) -> Self {
        Self {
            status: progress.status(),
            enrolled: progress.is_enrolled(),
            finished: progress.is_finished(),
            percent: progress.progress_percent(),
            completed_lessons: progress.completed_lessons(),
            total_lessons: progress.total_lessons(),
            modules: progress.modules().to_vec(),
        }
    }
}

/// Shared handle to the process-wide progress session.
///
/// Clones point at the same session; nothing is persisted.
#[derive(Clone, Default)]
pub struct CourseService {
    progress: Arc<Mutex<CourseProgress>>,
    mode: LookupMode,
}

impl CourseService {
    #[must_use]
    pub fn new(mode: LookupMode) -> Self {
        Self {
            progress: Arc::new(Mutex::new(CourseProgress::new())),
            mode,
        }
    }

    #[must_use]
    pub fn mode(&self) -> LookupMode {
        self.mode
    }

    /// Start (or restart) the course with every lesson incomplete.
    pub fn enroll(&self) -> CourseSnapshot {
        let mut progress = self.lock();
        let was_enrolled = progress.is_enrolled();
        progress.enroll();
        info!(
            reset = was_enrolled,
            lessons = progress.total_lessons(),
            "enrolled in course"
        );
        CourseSnapshot::capture(&progress)
    }

    /// Flip one lesson and return the updated state.
    ///
    /// # Errors
    ///
    /// In `LookupMode::Strict`, returns `CourseServiceError::Lookup` when the
    /// module or lesson does not exist. In `LookupMode::Silent` the miss is
    /// logged and the unchanged state is returned.
    pub fn toggle_lesson(
        &self,
        module_id: &str,
        lesson_id: &str,
    ) -> Result<CourseSnapshot, CourseServiceError> {
        let mut progress = self.lock();
        let before = progress.status();

        match progress.try_toggle_lesson(module_id, lesson_id) {
            Ok(done) => {
                debug!(module_id, lesson_id, done, "lesson toggled");
            }
            Err(err) if self.mode == LookupMode::Silent => {
                warn!(%err, "ignoring toggle for unknown lesson");
            }
            Err(err) => return Err(err.into()),
        }

        let after = progress.status();
        if before != after {
            info!(from = ?before, to = ?after, "course status changed");
        }
        Ok(CourseSnapshot::capture(&progress))
    }

    #[must_use]
    pub fn snapshot(&self) -> CourseSnapshot {
        CourseSnapshot::capture(&self.lock())
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.lock().progress_percent()
    }

    #[must_use]
    pub fn is_enrolled(&self) -> bool {
        self.lock().is_enrolled()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.lock().is_finished()
    }

    /// Run a read-only closure against the live state.
    pub fn with_progress<R>(&self, f: impl FnOnce(&CourseProgress) -> R) -> R {
        f(&*self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, CourseProgress> {
        // No mutation panics halfway, so a poisoned guard still holds a valid session.
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_core::LookupError;

    #[test]
    fn clones_share_session() {
        let svc = CourseService::new(LookupMode::Silent);
        let other = svc.clone();
        svc.enroll();
        other.toggle_lesson("m1", "l1").unwrap();

        assert_eq!(svc.snapshot().completed_lessons, 1);
        assert_eq!(svc.progress_percent(), 13);
    }

    #[test]
    fn silent_mode_ignores_unknown_ids() {
        let svc = CourseService::new(LookupMode::Silent);
        svc.enroll();
        let before = svc.snapshot();
        let after = svc.toggle_lesson("bogus-module", "l1").unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn strict_mode_reports_unknown_ids() {
        let svc = CourseService::new(LookupMode::Strict);
        svc.enroll();
        let err = svc.toggle_lesson("m1", "l8").unwrap_err();
        assert!(matches!(
            err,
            CourseServiceError::Lookup(LookupError::UnknownLesson { .. })
        ));
        assert_eq!(svc.snapshot().completed_lessons, 0);
    }

    #[test]
    fn snapshot_reports_status() {
        let svc = CourseService::default();
        assert_eq!(svc.snapshot().status, CourseStatus::NotEnrolled);
        let snap = svc.enroll();
        assert_eq!(snap.status, CourseStatus::InProgress);
        assert_eq!(snap.total_lessons, 8);
        assert!(svc.with_progress(|p| !p.certificate_available()));
    }
}
