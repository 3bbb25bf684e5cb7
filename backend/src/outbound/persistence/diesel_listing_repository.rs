//! PostgreSQL-backed `ListingRepository` implementation using Diesel ORM.
//!
//! Search conditions are assembled on a boxed query so the tag and search
//! parameters compose with AND exactly as the domain filter specifies. The
//! `LIKE` patterns interpolate user input unescaped; `%` and `_` keep their
//! wildcard meaning, which mirrors the behaviour this service inherited.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{Listing, ListingFilter, ListingId, LogoReference, UserId};

use super::models::{ListingChangeset, ListingRow, NewListingRow};
use super::pool::{DbPool, PoolError};
use super::schema::listings;

/// Diesel-backed implementation of the `ListingRepository` port.
#[derive(Clone)]
pub struct DieselListingRepository {
    pool: DbPool,
}

impl DieselListingRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to listing repository errors.
fn map_pool_error(error: PoolError) -> ListingRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ListingRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to listing repository errors.
fn map_diesel_error(error: diesel::result::Error) -> ListingRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ListingRepositoryError::connection("database connection error")
        }
        DieselError::NotFound => ListingRepositoryError::query("record not found"),
        _ => ListingRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain listing.
fn row_to_listing(row: ListingRow) -> Listing {
    Listing {
        id: ListingId::from_uuid(row.id),
        title: row.title,
        company: row.company,
        location: row.location,
        website: row.website,
        email: row.email,
        tags: row.tags,
        description: row.description,
        logo: row.logo.map(LogoReference::new),
        owner: UserId::from(row.owner_user_id),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

fn new_row<'a>(listing: &'a Listing) -> NewListingRow<'a> {
    NewListingRow {
        id: *listing.id.as_uuid(),
        title: &listing.title,
        company: &listing.company,
        location: &listing.location,
        website: &listing.website,
        email: &listing.email,
        tags: &listing.tags,
        description: &listing.description,
        logo: listing.logo.as_ref().map(LogoReference::as_str),
        owner_user_id: *listing.owner.as_uuid(),
        created_at: listing.created_at,
        updated_at: listing.updated_at,
    }
}

/// Apply the domain filter to a boxed listings query.
///
/// A macro rather than a function so the same conditions attach to queries
/// with different select clauses (the page load and its count twin).
macro_rules! apply_filter {
    ($query:expr, $filter:expr) => {{
        let mut query = $query;
        if let Some(tag) = $filter.tag() {
            query = query.filter(listings::tags.like(format!("%{tag}%")));
        }
        if let Some(search) = $filter.search() {
            let pattern = format!("%{search}%");
            query = query.filter(
                listings::title
                    .like(pattern.clone())
                    .or(listings::description.like(pattern.clone()))
                    .or(listings::tags.like(pattern.clone()))
                    .or(listings::location.like(pattern)),
            );
        }
        query
    }};
}

#[async_trait]
impl ListingRepository for DieselListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(listings::table)
            .values(new_row(listing))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(
        &self,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ListingRow> = listings::table
            .filter(listings::id.eq(id.as_uuid()))
            .select(ListingRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(row_to_listing))
    }

    async fn update(&self, listing: &Listing) -> Result<bool, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = ListingChangeset {
            title: &listing.title,
            company: &listing.company,
            location: &listing.location,
            website: &listing.website,
            email: &listing.email,
            tags: &listing.tags,
            description: &listing.description,
            logo: listing.logo.as_ref().map(LogoReference::as_str),
            updated_at: listing.updated_at,
        };

        let updated_rows = diesel::update(
            listings::table.filter(listings::id.eq(listing.id.as_uuid())),
        )
        .set(&changeset)
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated_rows > 0)
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows =
            diesel::delete(listings::table.filter(listings::id.eq(id.as_uuid())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;

        Ok(deleted_rows > 0)
    }

    async fn exists_by_company(&self, company: &str) -> Result<bool, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            listings::table.filter(listings::company.eq(company)),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn query(
        &self,
        filter: &ListingFilter,
        page: PageRequest,
    ) -> Result<Page<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = apply_filter!(listings::table.count().into_boxed(), filter)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<ListingRow> = apply_filter!(
            listings::table
                .select(ListingRow::as_select())
                .into_boxed(),
            filter
        )
        .order(listings::created_at.desc())
        .offset(page.offset())
        .limit(page.limit())
        .load(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(row_to_listing).collect();
        Ok(Page::new(items, page, total.unsigned_abs()))
    }

    async fn list_owned_by(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ListingRow> = listings::table
            .filter(listings::owner_user_id.eq(owner.as_uuid()))
            .order(listings::created_at.desc())
            .select(ListingRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_listing).collect())
    }
}
