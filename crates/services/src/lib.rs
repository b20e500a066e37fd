#![forbid(unsafe_code)]

pub mod app_services;
pub mod course_service;
pub mod error;
pub mod profile_service;

pub use app_services::AppServices;
pub use course_service::{CourseService, CourseSnapshot, LookupMode};
pub use error::{AppServicesError, AuthError, CourseServiceError, ProfileServiceError};
pub use profile_service::ProfileService;
