#![forbid(unsafe_code)]

pub mod model;
pub mod progress;
pub mod template;

pub use progress::{CourseProgress, CourseStatus, LookupError};
pub use template::CourseTemplate;
