//! Driving port for read access to listings.

use async_trait::async_trait;
use pagination::{Page, PageNumber};

use crate::domain::{Error, Listing, ListingFilter, ListingId, UserId};

/// Read operations the HTTP adapter drives.
#[async_trait]
pub trait ListingQuery: Send + Sync {
    /// One fixed-size page of listings matching the filter, newest first.
    /// Pages past the end are empty, not errors. No authorization.
    async fn list(&self, filter: ListingFilter, page: PageNumber)
    -> Result<Page<Listing>, Error>;

    /// A single listing, or `NotFound`. No authorization.
    async fn show(&self, id: &ListingId) -> Result<Listing, Error>;

    /// Every listing owned by the user, unfiltered and unpaginated.
    async fn list_owned_by(&self, owner: &UserId) -> Result<Vec<Listing>, Error>;
}
