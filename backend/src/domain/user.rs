//! Acting-user identity.
//!
//! Authentication itself lives outside this service; the session layer hands
//! handlers a validated [`UserId`] and nothing more. Listings record the id
//! of the user that created them, and the ownership policy compares ids.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned when parsing a [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// The raw value was empty.
    Empty,
    /// The raw value was not a canonical UUID.
    Invalid,
}

impl fmt::Display for UserIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "user id must not be empty"),
            Self::Invalid => write!(f, "user id must be a valid UUID"),
        }
    }
}

impl std::error::Error for UserIdError {}

/// Stable user identifier stored as a UUID.
///
/// Keeps the original string form alongside the parsed UUID so session
/// round-trips preserve the caller's exact representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserIdError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        let uuid = Uuid::new_v4();
        Self(uuid, uuid.to_string())
    }

    fn from_owned(id: String) -> Result<Self, UserIdError> {
        if id.is_empty() {
            return Err(UserIdError::Empty);
        }
        if id.trim() != id {
            return Err(UserIdError::Invalid);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserIdError::Invalid)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value, value.to_string())
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserIdError::Empty)]
    #[case("not-a-uuid", UserIdError::Invalid)]
    #[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6", UserIdError::Invalid)]
    fn invalid_ids_are_rejected(#[case] raw: &str, #[case] expected: UserIdError) {
        assert_eq!(UserId::new(raw).expect_err("must fail"), expected);
    }

    #[rstest]
    fn valid_id_preserves_the_raw_form() {
        let raw = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
        let id = UserId::new(raw).expect("valid id");
        assert_eq!(id.as_ref(), raw);
        assert_eq!(id.as_uuid().to_string(), raw);
    }

    #[rstest]
    fn random_ids_differ() {
        assert_ne!(UserId::random(), UserId::random());
    }

    #[rstest]
    fn serde_round_trips_as_string() {
        let id = UserId::random();
        let encoded = serde_json::to_string(&id).expect("serialise");
        let decoded: UserId = serde_json::from_str(&encoded).expect("deserialise");
        assert_eq!(decoded, id);
    }
}
