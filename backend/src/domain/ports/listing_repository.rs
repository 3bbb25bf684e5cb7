//! Port abstraction for listing persistence adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Listing, ListingFilter, ListingId, UserId};

/// Persistence errors raised by listing repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListingRepositoryError {
    /// Repository connection could not be established.
    #[error("listing repository connection failed: {message}")]
    Connection {
        /// Adapter-level description of the failure.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("listing repository query failed: {message}")]
    Query {
        /// Adapter-level description of the failure.
        message: String,
    },
}

impl ListingRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Driven port for listing persistence.
///
/// Records are stored whole; `update` overwrites the row for the listing's
/// id. Absence is reported through `Option`/`bool` returns rather than
/// errors so the service decides what "not found" means per operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Persist a new listing.
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError>;

    /// Fetch a listing by identifier.
    async fn find_by_id(
        &self,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingRepositoryError>;

    /// Overwrite the stored record; `false` when no row carries the id.
    async fn update(&self, listing: &Listing) -> Result<bool, ListingRepositoryError>;

    /// Remove the record permanently; `false` when no row carries the id.
    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError>;

    /// True when any listing already uses the company name.
    async fn exists_by_company(&self, company: &str) -> Result<bool, ListingRepositoryError>;

    /// Fetch one page of listings matching the filter, newest first.
    async fn query(
        &self,
        filter: &ListingFilter,
        page: PageRequest,
    ) -> Result<Page<Listing>, ListingRepositoryError>;

    /// Fetch every listing owned by the user, unfiltered and unpaginated.
    async fn list_owned_by(&self, owner: &UserId)
    -> Result<Vec<Listing>, ListingRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn constructors_accept_str_for_messages() {
        let err = ListingRepositoryError::connection("refused");
        assert_eq!(
            err.to_string(),
            "listing repository connection failed: refused"
        );

        let err = ListingRepositoryError::query("syntax");
        assert_eq!(err.to_string(), "listing repository query failed: syntax");
    }
}
