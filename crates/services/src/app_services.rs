use std::sync::Arc;

use storage::repository::Storage;
use tracing::info;

use crate::course_service::{CourseService, LookupMode};
use crate::error::AppServicesError;
use crate::profile_service::ProfileService;

/// Assembles the app-facing services.
///
/// The profile service is backed by durable storage; the course session
/// always starts empty.
#[derive(Clone)]
pub struct AppServices {
    profiles: Arc<ProfileService>,
    course: CourseService,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, mode: LookupMode) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        info!(?mode, "services ready");
        Ok(Self::from_storage(&storage, mode))
    }

    /// Build services over volatile storage, for tests and previews.
    #[must_use]
    pub fn in_memory(mode: LookupMode) -> Self {
        Self::from_storage(&Storage::in_memory(), mode)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, mode: LookupMode) -> Self {
        Self {
            profiles: Arc::new(ProfileService::new(Arc::clone(&storage.profiles))),
            course: CourseService::new(mode),
        }
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn course(&self) -> CourseService {
        self.course.clone()
    }
}
