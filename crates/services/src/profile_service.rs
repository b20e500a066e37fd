use std::sync::Arc;

use course_core::model::{LoginDraft, ProfileRecord, ProfileUpdateDraft, RegistrationDraft};
use storage::repository::ProfileRepository;
use tracing::{debug, info, warn};

use crate::error::{AuthError, ProfileServiceError};

/// Single-record profile store plus the account flows built on it.
#[derive(Clone)]
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    /// Persist the full record, replacing any previous one. No validation.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` if the write fails.
    pub async fn save(&self, record: &ProfileRecord) -> Result<(), ProfileServiceError> {
        self.repo.save_profile(record).await?;
        debug!("profile saved");
        Ok(())
    }

    /// Load the most recently saved record, if any.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError::Storage` if the read fails or the stored
    /// value is corrupt.
    pub async fn load(&self) -> Result<Option<ProfileRecord>, ProfileServiceError> {
        Ok(self.repo.load_profile().await?)
    }

    /// Check credentials against the stored record.
    ///
    /// The email matches case-insensitively, the password byte-for-byte.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NoSuchUser` if nothing was ever saved,
    /// `AuthError::InvalidCredentials` on mismatch, and `AuthError::Storage`
    /// if the record cannot be read.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProfileRecord, AuthError> {
        let Some(record) = self.repo.load_profile().await? else {
            warn!("authentication attempted with no stored profile");
            return Err(AuthError::NoSuchUser);
        };

        if record.email_matches(email) && record.password_matches(password) {
            info!("user authenticated");
            Ok(record)
        } else {
            warn!("authentication failed: credentials do not match");
            Err(AuthError::InvalidCredentials)
        }
    }

    /// Validate login form input, then authenticate.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` for blank fields, otherwise the same
    /// errors as [`authenticate`](Self::authenticate).
    pub async fn login(&self, draft: &LoginDraft) -> Result<ProfileRecord, AuthError> {
        draft.validate()?;
        self.authenticate(&draft.email, &draft.password).await
    }

    /// Validate a registration and store it as the profile, overwriting any
    /// existing account.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` if validation or persistence fails.
    pub async fn register(
        &self,
        draft: RegistrationDraft,
    ) -> Result<ProfileRecord, ProfileServiceError> {
        let record = draft.validate()?;
        self.repo.save_profile(&record).await?;
        info!(area = ?record.area(), "account registered");
        Ok(record)
    }

    /// Validate an edited profile and write it back as a whole record.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` if validation or persistence fails.
    pub async fn update_profile(
        &self,
        draft: ProfileUpdateDraft,
    ) -> Result<ProfileRecord, ProfileServiceError> {
        let record = draft.validate()?;
        self.repo.save_profile(&record).await?;
        info!("profile updated");
        Ok(record)
    }
}
