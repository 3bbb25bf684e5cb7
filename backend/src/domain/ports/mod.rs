//! Driven and driving ports for the listing domain.
//!
//! Adapters implement the driven ports ([`ListingRepository`], [`LogoStore`]);
//! HTTP handlers depend on the driving ports ([`ListingQuery`],
//! [`ListingCommand`]) implemented by the domain service. The in-memory
//! repository doubles as the fixture adapter for tests and database-less
//! runs.

mod in_memory;
mod listing_command;
mod listing_query;
mod listing_repository;
mod logo_store;

pub use in_memory::InMemoryListingRepository;
pub use listing_command::ListingCommand;
pub use listing_query::ListingQuery;
pub use listing_repository::{ListingRepository, ListingRepositoryError};
pub use logo_store::{LogoStore, LogoStoreError};

#[cfg(test)]
pub use listing_repository::MockListingRepository;
#[cfg(test)]
pub use logo_store::MockLogoStore;
