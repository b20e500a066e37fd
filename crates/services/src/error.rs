//! Shared error types for the services crate.

use thiserror::Error;

use course_core::LookupError;
use course_core::model::ValidationError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ProfileService::authenticate` and `ProfileService::login`.
///
/// `NoSuchUser` and `InvalidCredentials` stay distinct so callers can choose
/// their own messaging.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("no user found; create an account first")]
    NoSuchUser,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService` writes and reads.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CourseService` in strict lookup mode.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseServiceError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
