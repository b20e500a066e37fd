use async_trait::async_trait;
use course_core::model::ProfileRecord;
use sqlx::Row;

use crate::repository::{PROFILE_KEY, ProfileRepository, StorageError};

use super::SqliteRepository;
use super::mapping::{decode_profile, encode_profile};

#[async_trait]
impl ProfileRepository for SqliteRepository {
    async fn save_profile(&self, record: &ProfileRecord) -> Result<(), StorageError> {
        let value = encode_profile(record)?;

        sqlx::query(
            r"
            INSERT INTO kv_store (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value
            ",
        )
        .bind(PROFILE_KEY)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        tracing::debug!(key = PROFILE_KEY, "profile record written");
        Ok(())
    }

    async fn load_profile(&self) -> Result<Option<ProfileRecord>, StorageError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?1")
            .bind(PROFILE_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            tracing::debug!(key = PROFILE_KEY, "no profile record stored");
            return Ok(None);
        };

        let value: String = row
            .try_get("value")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        decode_profile(&value).map(Some)
    }
}
