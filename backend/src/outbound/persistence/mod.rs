//! Persistence adapters backed by Diesel and PostgreSQL.

mod diesel_listing_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_listing_repository::DieselListingRepository;
pub use pool::{DbPool, PoolError};
