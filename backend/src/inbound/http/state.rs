//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ListingCommand, ListingQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read side of the listing surface.
    pub listings_query: Arc<dyn ListingQuery>,
    /// Write side of the listing surface.
    pub listings: Arc<dyn ListingCommand>,
}

impl HttpState {
    /// Bundle the driving ports for handler injection.
    pub fn new(listings_query: Arc<dyn ListingQuery>, listings: Arc<dyn ListingCommand>) -> Self {
        Self {
            listings_query,
            listings,
        }
    }
}
