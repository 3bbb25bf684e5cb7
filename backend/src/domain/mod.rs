//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed listing domain used by the HTTP and
//! persistence layers. Types are immutable value objects where practical;
//! each documents its invariants in Rustdoc. Nothing in this module knows
//! about transports or storage engines — adapters live under `inbound` and
//! `outbound` and talk to the domain through the ports.

pub mod authorization;
pub mod error;
pub mod listing;
pub mod listing_filter;
pub mod listing_service;
pub mod ports;
pub mod user;

pub use self::authorization::{OwnershipDecision, OwnershipPolicy};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::listing::{
    Listing, ListingDraft, ListingFields, ListingId, ListingValidationError,
    ListingValidationErrors, LogoReference, LogoUpload, LogoUploadError,
};
pub use self::listing_filter::ListingFilter;
pub use self::listing_service::{LISTINGS_PAGE_SIZE, ListingService};
pub use self::user::{UserId, UserIdError};
