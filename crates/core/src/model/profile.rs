use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of areas a user can pick at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaOfInterest {
    Ia,
    Cloud,
    Quantum,
}

impl AreaOfInterest {
    pub const ALL: [AreaOfInterest; 3] = [Self::Ia, Self::Cloud, Self::Quantum];

    /// Persisted value of the area.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ia => "ia",
            Self::Cloud => "cloud",
            Self::Quantum => "quantum",
        }
    }

    /// Human-readable label shown by pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Ia => "Inteligência Artificial",
            Self::Cloud => "Computação em Nuvem",
            Self::Quantum => "Computação Quântica",
        }
    }

    /// Parses a persisted value where the empty string means "not chosen".
    ///
    /// # Errors
    ///
    /// Returns `ParseAreaError` for values outside the fixed set.
    pub fn parse_optional(raw: &str) -> Result<Option<Self>, ParseAreaError> {
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some)
    }
}

impl fmt::Display for AreaOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing an area of interest from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAreaError {
    raw: String,
}

impl fmt::Display for ParseAreaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown area of interest: {:?}", self.raw)
    }
}

impl std::error::Error for ParseAreaError {}

impl FromStr for AreaOfInterest {
    type Err = ParseAreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|area| area.as_str() == s)
            .ok_or_else(|| ParseAreaError { raw: s.to_string() })
    }
}

/// The single persisted user profile / credential record.
///
/// Serialized as `{ "name", "email", "password", "area" }`. The store keeps
/// exactly one of these and every save writes the whole record.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    name: String,
    email: String,
    password: String,
    #[serde(default, with = "area_field")]
    area: Option<AreaOfInterest>,
}

impl ProfileRecord {
    /// Builds a record as-is. Field validation belongs to the caller.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        area: Option<AreaOfInterest>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            area,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    #[must_use]
    pub fn area(&self) -> Option<AreaOfInterest> {
        self.area
    }

    /// Case-insensitive email comparison; surrounding whitespace on the input is ignored.
    #[must_use]
    pub fn email_matches(&self, email: &str) -> bool {
        email.trim().to_lowercase() == self.email.to_lowercase()
    }

    /// Exact, case-sensitive password comparison.
    #[must_use]
    pub fn password_matches(&self, password: &str) -> bool {
        self.password.as_bytes() == password.as_bytes()
    }
}

impl fmt::Debug for ProfileRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileRecord")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("area", &self.area)
            .finish()
    }
}

mod area_field {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::AreaOfInterest;

    pub fn serialize<S: Serializer>(
        area: &Option<AreaOfInterest>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(area.map_or("", AreaOfInterest::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<AreaOfInterest>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        AreaOfInterest::parse_optional(&raw).map_err(serde::de::Error::custom)
    }
}
