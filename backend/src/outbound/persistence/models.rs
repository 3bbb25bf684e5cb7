//! Diesel row types for the listings table.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::outbound::persistence::schema::listings;

/// Queryable row for listings.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = listings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ListingRow {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub location: String,
    pub website: String,
    pub email: String,
    pub tags: String,
    pub description: String,
    pub logo: Option<String>,
    pub owner_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for a new listing.
#[derive(Debug, Insertable)]
#[diesel(table_name = listings)]
pub(crate) struct NewListingRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
    pub website: &'a str,
    pub email: &'a str,
    pub tags: &'a str,
    pub description: &'a str,
    pub logo: Option<&'a str>,
    pub owner_user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied on update.
///
/// `logo` stays `Option` so an update without a fresh upload leaves the
/// stored reference untouched (Diesel skips `None` changeset fields).
#[derive(Debug, AsChangeset)]
#[diesel(table_name = listings)]
pub(crate) struct ListingChangeset<'a> {
    pub title: &'a str,
    pub company: &'a str,
    pub location: &'a str,
    pub website: &'a str,
    pub email: &'a str,
    pub tags: &'a str,
    pub description: &'a str,
    pub logo: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
