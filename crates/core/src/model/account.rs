use thiserror::Error;

use crate::model::profile::{AreaOfInterest, ProfileRecord};

/// Input problems caught before anything reaches the profile store.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("all fields are required")]
    MissingFields,

    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Raw registration form input.
#[derive(Clone, Debug, Default)]
pub struct RegistrationDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub area: Option<AreaOfInterest>,
}

impl RegistrationDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the form and produce the record to persist.
    ///
    /// Name and email must be non-blank, both password fields non-empty and
    /// equal. The email is stored trimmed; the name and password as typed.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if a required field is missing or the
    /// confirmation does not match.
    pub fn validate(self) -> Result<ProfileRecord, ValidationError> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        Ok(ProfileRecord::new(
            self.name,
            self.email.trim(),
            self.password,
            self.area,
        ))
    }
}

/// Full replacement of the stored profile from the edit screen.
#[derive(Clone, Debug, Default)]
pub struct ProfileUpdateDraft {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub area: Option<AreaOfInterest>,
}

impl ProfileUpdateDraft {
    /// Prefills the edit form from the stored record.
    #[must_use]
    pub fn from_record(record: &ProfileRecord) -> Self {
        Self {
            name: record.name().to_owned(),
            email: record.email().to_owned(),
            password: record.password().to_owned(),
            confirm_password: record.password().to_owned(),
            area: record.area(),
        }
    }

    /// # Errors
    ///
    /// Returns `ValidationError::PasswordMismatch` if the confirmation differs.
    pub fn validate(self) -> Result<ProfileRecord, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(ProfileRecord::new(
            self.name,
            self.email,
            self.password,
            self.area,
        ))
    }
}

/// Login form input.
#[derive(Clone, Debug, Default)]
pub struct LoginDraft {
    pub email: String,
    pub password: String,
}

impl LoginDraft {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `ValidationError::MissingFields` if either field is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationDraft {
        RegistrationDraft {
            name: "Ana".into(),
            email: "  ana@example.com ".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
            area: Some(AreaOfInterest::Cloud),
        }
    }

    #[test]
    fn registration_trims_email() {
        let record = registration().validate().unwrap();
        assert_eq!(record.email(), "ana@example.com");
        assert_eq!(record.area(), Some(AreaOfInterest::Cloud));
    }

    #[test]
    fn registration_requires_fields() {
        let draft = RegistrationDraft {
            name: "   ".into(),
            ..registration()
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingFields));

        let draft = RegistrationDraft {
            confirm_password: String::new(),
            ..registration()
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn registration_rejects_mismatched_confirmation() {
        let draft = RegistrationDraft {
            confirm_password: "other".into(),
            ..registration()
        };
        assert_eq!(draft.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn registration_allows_missing_area() {
        let draft = RegistrationDraft {
            area: None,
            ..registration()
        };
        assert_eq!(draft.validate().unwrap().area(), None);
    }

    #[test]
    fn profile_update_round_trips_record() {
        let record = registration().validate().unwrap();
        let draft = ProfileUpdateDraft::from_record(&record);
        assert_eq!(draft.validate().unwrap(), record);
    }

    #[test]
    fn profile_update_checks_confirmation() {
        let record = registration().validate().unwrap();
        let mut draft = ProfileUpdateDraft::from_record(&record);
        draft.password = "changed".into();
        assert_eq!(draft.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn login_rejects_blank_input() {
        assert_eq!(
            LoginDraft::new(" ", "pw").validate(),
            Err(ValidationError::MissingFields)
        );
        assert_eq!(
            LoginDraft::new("a@x.com", "   ").validate(),
            Err(ValidationError::MissingFields)
        );
        assert!(LoginDraft::new("a@x.com", "pw").validate().is_ok());
    }
}
