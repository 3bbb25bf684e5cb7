//! Listing aggregate and its validated construction types.
//!
//! A listing is a job/company posting owned by the user that created it.
//! Inbound payloads arrive as an unvalidated [`ListingFields`] set and must
//! pass through [`ListingDraft::try_new`] before the service will touch the
//! store; there is no runtime field allow-list anywhere. Validation collects
//! every failing field in one pass so callers can re-display per-field
//! messages.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::domain::UserId;

/// Stable listing identifier, assigned by the system at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(Uuid);

impl ListingId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ListingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Relative path of a stored logo inside the public file area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogoReference(String);

impl LogoReference {
    /// Wrap a relative path produced by a logo store adapter.
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// The relative path as stored on the record.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LogoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingValidationError {
    /// `title` was missing or blank.
    EmptyTitle,
    /// `company` was missing or blank.
    EmptyCompany,
    /// `location` was missing or blank.
    EmptyLocation,
    /// `website` was missing or blank.
    EmptyWebsite,
    /// `website` did not parse as an absolute http(s) URL.
    InvalidWebsite,
    /// `email` was missing or blank.
    EmptyEmail,
    /// `email` did not satisfy the address syntax check.
    InvalidEmail,
    /// `tags` was missing or blank.
    EmptyTags,
    /// `description` was missing or blank.
    EmptyDescription,
}

impl ListingValidationError {
    /// The payload field the failure refers to.
    pub fn field(self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyCompany => "company",
            Self::EmptyLocation => "location",
            Self::EmptyWebsite | Self::InvalidWebsite => "website",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyTags => "tags",
            Self::EmptyDescription => "description",
        }
    }

    /// Stable failure code for machine consumption.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyTitle
            | Self::EmptyCompany
            | Self::EmptyLocation
            | Self::EmptyWebsite
            | Self::EmptyEmail
            | Self::EmptyTags
            | Self::EmptyDescription => "required",
            Self::InvalidWebsite => "invalid_url",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

impl fmt::Display for ListingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWebsite => write!(f, "website must be an absolute http(s) URL"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            other => write!(f, "{} must not be empty", other.field()),
        }
    }
}

impl std::error::Error for ListingValidationError {}

/// Every field failure found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingValidationErrors(Vec<ListingValidationError>);

impl ListingValidationErrors {
    /// Iterate the collected failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = &ListingValidationError> {
        self.0.iter()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no failures were collected; never observable through
    /// [`ListingDraft::try_new`], which only errs with at least one entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ListingValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ListingValidationErrors {}

/// Raw, unvalidated listing fields as supplied by a caller.
///
/// Exactly the seven permitted text fields; anything else a payload carries
/// has nowhere to land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFields {
    /// Posting title.
    pub title: String,
    /// Company name; unique across listings at creation time.
    pub company: String,
    /// Freeform location text.
    pub location: String,
    /// Company website URL.
    pub website: String,
    /// Contact email address.
    pub email: String,
    /// Freeform comma-ish tag blob, searched by substring.
    pub tags: String,
    /// Posting body.
    pub description: String,
}

/// Validated listing field set.
///
/// ## Invariants
/// - every field is non-empty once trimmed;
/// - `website` parses as an absolute `http`/`https` URL;
/// - `email` satisfies the address syntax check.
///
/// Values are stored exactly as supplied; validation trims only for the
/// emptiness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDraft {
    fields: ListingFields,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Pragmatic syntax check: one @, no whitespace, dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn is_http_url(raw: &str) -> bool {
    Url::parse(raw)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

impl ListingDraft {
    /// Validate raw fields, collecting every failure.
    pub fn try_new(fields: ListingFields) -> Result<Self, ListingValidationErrors> {
        use ListingValidationError as E;

        fn present(value: &str) -> bool {
            !value.trim().is_empty()
        }

        let mut errors = Vec::new();
        if !present(&fields.title) {
            errors.push(E::EmptyTitle);
        }
        if !present(&fields.company) {
            errors.push(E::EmptyCompany);
        }
        if !present(&fields.location) {
            errors.push(E::EmptyLocation);
        }
        if present(&fields.website) {
            if !is_http_url(&fields.website) {
                errors.push(E::InvalidWebsite);
            }
        } else {
            errors.push(E::EmptyWebsite);
        }
        if present(&fields.email) {
            if !email_regex().is_match(&fields.email) {
                errors.push(E::InvalidEmail);
            }
        } else {
            errors.push(E::EmptyEmail);
        }
        if !present(&fields.tags) {
            errors.push(E::EmptyTags);
        }
        if !present(&fields.description) {
            errors.push(E::EmptyDescription);
        }

        if errors.is_empty() {
            Ok(Self { fields })
        } else {
            Err(ListingValidationErrors(errors))
        }
    }

    /// The validated field set.
    pub fn fields(&self) -> &ListingFields {
        &self.fields
    }

    /// Company name, the create-time uniqueness key.
    pub fn company(&self) -> &str {
        self.fields.company.as_str()
    }
}

/// Validation failures for an uploaded logo file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogoUploadError {
    /// The upload carried no file name.
    #[error("logo file name must not be empty")]
    EmptyFileName,
    /// The file name contained path separators or traversal segments.
    #[error("logo file name must not contain path segments")]
    UnsafeFileName,
    /// The upload carried no bytes.
    #[error("logo file must not be empty")]
    EmptyContent,
}

/// An uploaded logo file awaiting storage.
///
/// ## Invariants
/// - `file_name` is non-empty and free of path separators and `..`;
/// - `bytes` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl LogoUpload {
    /// Validate and wrap an uploaded file.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, LogoUploadError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(LogoUploadError::EmptyFileName);
        }
        if file_name.contains(['/', '\\']) || file_name.contains("..") {
            return Err(LogoUploadError::UnsafeFileName);
        }
        if bytes.is_empty() {
            return Err(LogoUploadError::EmptyContent);
        }
        Ok(Self { file_name, bytes })
    }

    /// Client-supplied file name, already checked for path segments.
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// File content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// A job/company posting owned by a user.
///
/// ## Invariants
/// - `owner` is set at creation and never changes;
/// - text fields satisfy [`ListingDraft`] validation;
/// - `created_at` is fixed at creation, `updated_at` moves on every update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    /// System-assigned identifier.
    pub id: ListingId,
    /// Posting title.
    pub title: String,
    /// Company name.
    pub company: String,
    /// Freeform location text.
    pub location: String,
    /// Company website URL.
    pub website: String,
    /// Contact email address.
    pub email: String,
    /// Freeform tag blob.
    pub tags: String,
    /// Posting body.
    pub description: String,
    /// Stored logo reference, if a file was uploaded.
    pub logo: Option<LogoReference>,
    /// The creating user; immutable for the record's lifetime.
    pub owner: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Assemble a new listing from a validated draft.
    pub fn create(
        id: ListingId,
        owner: UserId,
        draft: ListingDraft,
        logo: Option<LogoReference>,
        created_at: DateTime<Utc>,
    ) -> Self {
        let ListingFields {
            title,
            company,
            location,
            website,
            email,
            tags,
            description,
        } = draft.fields;
        Self {
            id,
            title,
            company,
            location,
            website,
            email,
            tags,
            description,
            logo,
            owner,
            created_at,
            updated_at: created_at,
        }
    }

    /// Produce the updated record: text fields from the draft, the stored
    /// logo reference replaced only when `logo` carries a new one. Identity,
    /// ownership, and creation time are preserved.
    pub fn apply_update(
        &self,
        draft: ListingDraft,
        logo: Option<LogoReference>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let ListingFields {
            title,
            company,
            location,
            website,
            email,
            tags,
            description,
        } = draft.fields;
        Self {
            id: self.id,
            title,
            company,
            location,
            website,
            email,
            tags,
            description,
            logo: logo.or_else(|| self.logo.clone()),
            owner: self.owner.clone(),
            created_at: self.created_at,
            updated_at,
        }
    }
}
