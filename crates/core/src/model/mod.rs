mod account;
mod ids;
mod lesson;
mod module;
mod profile;

pub use account::{LoginDraft, ProfileUpdateDraft, RegistrationDraft, ValidationError};
pub use ids::{LessonId, ModuleId};
pub use lesson::Lesson;
pub use module::Module;
pub use profile::{AreaOfInterest, ParseAreaError, ProfileRecord};
