//! Listing HTTP handlers.
//!
//! ```text
//! GET    /api/v1/listings          browse with optional tag/search/page
//! GET    /api/v1/listings/mine     listings owned by the session user
//! GET    /api/v1/listings/{id}     one listing
//! POST   /api/v1/listings          create (session required)
//! PUT    /api/v1/listings/{id}     update (session + ownership)
//! DELETE /api/v1/listings/{id}     delete (session + ownership)
//! ```
//!
//! Register `manage_listings` before `show_listing` so `/listings/mine` is
//! not captured by the `{id}` segment.

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::{Page, PageNumber};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Listing, ListingDraft, ListingFields, ListingFilter, LogoUpload};
use crate::inbound::http::error::{ApiError, ApiResult};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    decode_logo_content, listing_validation_error, logo_upload_error, parse_listing_id,
};

/// Query parameters accepted by the browse endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListListingsQuery {
    /// Restrict to listings whose tags blob contains this substring.
    pub tag: Option<String>,
    /// Match listings where title, description, tags, or location contains
    /// this substring.
    pub search: Option<String>,
    /// 1-based page number; absent or zero browses the first page.
    pub page: Option<u32>,
}

/// Logo upload riding a JSON payload.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogoPayload {
    /// Client-side file name; path segments are rejected.
    pub file_name: String,
    /// File content, standard-alphabet base64.
    pub content_base64: String,
}

/// Request payload for creating or updating a listing.
///
/// Fields are optional at the transport so a missing field reports the same
/// per-field validation error as a blank one.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingPayload {
    /// Posting title.
    pub title: Option<String>,
    /// Company name; unique at creation time.
    pub company: Option<String>,
    /// Freeform location text.
    pub location: Option<String>,
    /// Company website URL.
    pub website: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Freeform tag blob.
    pub tags: Option<String>,
    /// Posting body.
    pub description: Option<String>,
    /// Optional logo upload; on update, absent means keep the stored one.
    pub logo: Option<LogoPayload>,
}

/// Response payload for a single listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    /// Listing identifier.
    pub id: String,
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
    /// Relative path of the stored logo, when present.
    pub logo: Option<String>,
    /// Id of the owning user.
    pub owner_user_id: String,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
    /// Last-modification timestamp, RFC 3339.
    pub updated_at: String,
}

impl From<Listing> for ListingResponse {
    fn from(value: Listing) -> Self {
        Self {
            id: value.id.to_string(),
            title: value.title,
            company: value.company,
            location: value.location,
            website: value.website,
            email: value.email,
            tags: value.tags,
            description: value.description,
            logo: value.logo.map(|reference| reference.as_str().to_owned()),
            owner_user_id: value.owner.to_string(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Response payload for one page of listings.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListingCollectionResponse {
    /// Listings on this page, newest first.
    pub items: Vec<ListingResponse>,
    /// 1-based page number.
    pub page: u32,
    /// Fixed page size.
    pub per_page: u32,
    /// Total matching listings across all pages.
    pub total: u64,
    /// Number of pages covering `total`.
    pub total_pages: u64,
}

impl From<Page<Listing>> for ListingCollectionResponse {
    fn from(page: Page<Listing>) -> Self {
        let (number, per_page, total, total_pages) =
            (page.page(), page.per_page(), page.total(), page.total_pages());
        Self {
            items: page.into_items().into_iter().map(Into::into).collect(),
            page: number,
            per_page,
            total,
            total_pages,
        }
    }
}

fn parse_listing_payload(
    payload: ListingPayload,
) -> Result<(ListingDraft, Option<LogoUpload>), ApiError> {
    let ListingPayload {
        title,
        company,
        location,
        website,
        email,
        tags,
        description,
        logo,
    } = payload;

    let draft = ListingDraft::try_new(ListingFields {
        title: title.unwrap_or_default(),
        company: company.unwrap_or_default(),
        location: location.unwrap_or_default(),
        website: website.unwrap_or_default(),
        email: email.unwrap_or_default(),
        tags: tags.unwrap_or_default(),
        description: description.unwrap_or_default(),
    })
    .map_err(|errors| listing_validation_error(&errors))?;

    let logo = match logo {
        Some(payload) => {
            let bytes = decode_logo_content(&payload.content_base64)?;
            let upload = LogoUpload::new(payload.file_name, bytes)
                .map_err(|error| logo_upload_error(&error))?;
            Some(upload)
        }
        None => None,
    };

    Ok((draft, logo))
}

/// Browse listings with optional tag and search filters.
#[utoipa::path(
    get,
    path = "/api/v1/listings",
    params(ListListingsQuery),
    security([]),
    responses(
        (status = 200, description = "One page of listings", body = ListingCollectionResponse),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["listings"],
    operation_id = "listListings"
)]
#[get("/listings")]
pub async fn list_listings(
    state: web::Data<HttpState>,
    query: web::Query<ListListingsQuery>,
) -> ApiResult<web::Json<ListingCollectionResponse>> {
    let ListListingsQuery { tag, search, page } = query.into_inner();
    let filter = ListingFilter::new(tag, search);
    let page = PageNumber::saturating_from(page.unwrap_or(1));

    let listings = state.listings_query.list(filter, page).await?;
    Ok(web::Json(listings.into()))
}

/// Listings owned by the session user.
#[utoipa::path(
    get,
    path = "/api/v1/listings/mine",
    responses(
        (status = 200, description = "Listings owned by the session user", body = [ListingResponse]),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tags = ["listings"],
    operation_id = "manageListings"
)]
#[get("/listings/mine")]
pub async fn manage_listings(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<ListingResponse>>> {
    let owner = session.require_user_id()?;
    let listings = state.listings_query.list_owned_by(&owner).await?;
    Ok(web::Json(listings.into_iter().map(Into::into).collect()))
}

/// Fetch one listing.
#[utoipa::path(
    get,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    security([]),
    responses(
        (status = 200, description = "The listing", body = ListingResponse),
        (status = 400, description = "Malformed identifier", body = ApiError),
        (status = 404, description = "No such listing", body = ApiError)
    ),
    tags = ["listings"],
    operation_id = "showListing"
)]
#[get("/listings/{id}")]
pub async fn show_listing(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ListingResponse>> {
    let id = parse_listing_id(&path.into_inner())?;
    let listing = state.listings_query.show(&id).await?;
    Ok(web::Json(listing.into()))
}

/// Create a listing owned by the session user.
#[utoipa::path(
    post,
    path = "/api/v1/listings",
    request_body = ListingPayload,
    responses(
        (status = 201, description = "Listing created", body = ListingResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 409, description = "Company already has a listing", body = ApiError)
    ),
    tags = ["listings"],
    operation_id = "createListing"
)]
#[post("/listings")]
pub async fn create_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ListingPayload>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let (draft, logo) = parse_listing_payload(payload.into_inner())?;

    let listing = state.listings.create(actor, draft, logo).await?;
    Ok(HttpResponse::Created().json(ListingResponse::from(listing)))
}

/// Update a listing; owner only.
#[utoipa::path(
    put,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    request_body = ListingPayload,
    responses(
        (status = 200, description = "Listing updated", body = ListingResponse),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Not the owner", body = ApiError),
        (status = 404, description = "No such listing", body = ApiError)
    ),
    tags = ["listings"],
    operation_id = "updateListing"
)]
#[put("/listings/{id}")]
pub async fn update_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ListingPayload>,
) -> ApiResult<web::Json<ListingResponse>> {
    let actor = session.require_user_id()?;
    let id = parse_listing_id(&path.into_inner())?;
    let (draft, logo) = parse_listing_payload(payload.into_inner())?;

    let listing = state.listings.update(&actor, &id, draft, logo).await?;
    Ok(web::Json(listing.into()))
}

/// Delete a listing; owner only.
#[utoipa::path(
    delete,
    path = "/api/v1/listings/{id}",
    params(("id" = String, Path, description = "Listing identifier")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Unauthorised", body = ApiError),
        (status = 403, description = "Not the owner", body = ApiError),
        (status = 404, description = "No such listing", body = ApiError)
    ),
    tags = ["listings"],
    operation_id = "deleteListing"
)]
#[delete("/listings/{id}")]
pub async fn delete_listing(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let id = parse_listing_id(&path.into_inner())?;

    state.listings.delete(&actor, &id).await?;
    Ok(HttpResponse::NoContent().finish())
}
