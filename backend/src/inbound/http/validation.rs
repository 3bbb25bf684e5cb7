//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation reports which fields failed; these helpers turn that
//! into the `invalid_request` details payload callers re-display forms
//! from, and cover the handful of transport-only checks (base64 content,
//! path identifiers) the domain never sees.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::json;

use crate::domain::{Error, ListingId, ListingValidationErrors, LogoUploadError};

/// Collapse collected field failures into one `invalid_request` error.
///
/// The details payload carries every failing field:
/// `{ "fields": [{ "field", "code", "message" }] }`.
pub(crate) fn listing_validation_error(errors: &ListingValidationErrors) -> Error {
    let fields: Vec<_> = errors
        .iter()
        .map(|error| {
            json!({
                "field": error.field(),
                "code": error.code(),
                "message": error.to_string(),
            })
        })
        .collect();
    Error::invalid_request("listing validation failed").with_details(json!({ "fields": fields }))
}

/// Map a rejected logo upload onto the `logo` field.
pub(crate) fn logo_upload_error(error: &LogoUploadError) -> Error {
    let code = match error {
        LogoUploadError::EmptyFileName | LogoUploadError::EmptyContent => "required",
        LogoUploadError::UnsafeFileName => "invalid_file_name",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "logo",
        "code": code,
    }))
}

/// Decode base64 logo content, reporting failures against the `logo` field.
pub(crate) fn decode_logo_content(raw: &str) -> Result<Vec<u8>, Error> {
    BASE64.decode(raw).map_err(|_| {
        Error::invalid_request("logo content must be valid base64").with_details(json!({
            "field": "logo",
            "code": "invalid_base64",
        }))
    })
}

/// Parse a listing id path parameter.
pub(crate) fn parse_listing_id(raw: &str) -> Result<ListingId, Error> {
    raw.parse().map_err(|_| {
        Error::invalid_request("listing id must be a valid UUID").with_details(json!({
            "field": "id",
            "value": raw,
            "code": "invalid_uuid",
        }))
    })
}
