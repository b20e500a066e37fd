use course_core::model::ProfileRecord;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Encodes the profile into the persisted JSON blob.
pub(crate) fn encode_profile(record: &ProfileRecord) -> Result<String, StorageError> {
    serde_json::to_string(record).map_err(ser)
}

/// Decodes a stored blob. Anything that does not match the record layout is
/// reported as a serialization error.
pub(crate) fn decode_profile(raw: &str) -> Result<ProfileRecord, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}
