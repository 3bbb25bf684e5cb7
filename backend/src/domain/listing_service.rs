//! Listing domain service.
//!
//! Implements the driving ports over the persistence and logo-store ports.
//! The service owns request orchestration: create-time company uniqueness,
//! the ownership policy gate in front of every mutation, logo storage, and
//! the mapping from adapter errors to domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use pagination::{Page, PageNumber, PageRequest};
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    ListingCommand, ListingQuery, ListingRepository, ListingRepositoryError, LogoStore,
    LogoStoreError,
};
use crate::domain::{
    Error, Listing, ListingDraft, ListingFilter, ListingId, LogoReference, LogoUpload,
    OwnershipDecision, OwnershipPolicy, UserId,
};

/// Fixed page size for the public browse surface.
pub const LISTINGS_PAGE_SIZE: u32 = 6;

/// Listing service implementing the driving ports.
#[derive(Clone)]
pub struct ListingService<R, L> {
    listings: Arc<R>,
    logos: Arc<L>,
}

impl<R, L> ListingService<R, L> {
    /// Create a new service over the given adapters.
    pub fn new(listings: Arc<R>, logos: Arc<L>) -> Self {
        Self { listings, logos }
    }
}

impl<R, L> ListingService<R, L>
where
    R: ListingRepository,
    L: LogoStore,
{
    fn map_repository_error(error: ListingRepositoryError) -> Error {
        match error {
            ListingRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("listing repository unavailable: {message}"))
            }
            ListingRepositoryError::Query { message } => {
                Error::internal(format!("listing repository error: {message}"))
            }
        }
    }

    fn map_logo_error(error: LogoStoreError) -> Error {
        match error {
            LogoStoreError::Io { message } => {
                Error::internal(format!("logo storage error: {message}"))
            }
        }
    }

    fn not_found(id: &ListingId) -> Error {
        Error::not_found("listing not found").with_details(json!({ "id": id.to_string() }))
    }

    fn company_conflict(company: &str) -> Error {
        Error::conflict("company already has a listing").with_details(json!({
            "field": "company",
            "value": company,
            "code": "taken",
        }))
    }

    async fn store_logo(
        &self,
        logo: Option<LogoUpload>,
    ) -> Result<Option<LogoReference>, Error> {
        match logo {
            Some(upload) => {
                let reference = self
                    .logos
                    .store(&upload)
                    .await
                    .map_err(Self::map_logo_error)?;
                Ok(Some(reference))
            }
            None => Ok(None),
        }
    }

    async fn fetch_owned(&self, actor: &UserId, id: &ListingId) -> Result<Listing, Error> {
        let listing = self
            .listings
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))?;

        match OwnershipPolicy::evaluate(&listing.owner, actor) {
            OwnershipDecision::Allow => Ok(listing),
            OwnershipDecision::Deny => {
                Err(Error::forbidden("only the owner may modify a listing"))
            }
        }
    }
}

#[async_trait]
impl<R, L> ListingQuery for ListingService<R, L>
where
    R: ListingRepository,
    L: LogoStore,
{
    async fn list(
        &self,
        filter: ListingFilter,
        page: PageNumber,
    ) -> Result<Page<Listing>, Error> {
        let request = PageRequest::new(page, LISTINGS_PAGE_SIZE)
            .map_err(|error| Error::internal(format!("page request: {error}")))?;
        self.listings
            .query(&filter, request)
            .await
            .map_err(Self::map_repository_error)
    }

    async fn show(&self, id: &ListingId) -> Result<Listing, Error> {
        self.listings
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn list_owned_by(&self, owner: &UserId) -> Result<Vec<Listing>, Error> {
        self.listings
            .list_owned_by(owner)
            .await
            .map_err(Self::map_repository_error)
    }
}

#[async_trait]
impl<R, L> ListingCommand for ListingService<R, L>
where
    R: ListingRepository,
    L: LogoStore,
{
    async fn create(
        &self,
        actor: UserId,
        draft: ListingDraft,
        logo: Option<LogoUpload>,
    ) -> Result<Listing, Error> {
        let taken = self
            .listings
            .exists_by_company(draft.company())
            .await
            .map_err(Self::map_repository_error)?;
        if taken {
            return Err(Self::company_conflict(draft.company()));
        }

        // Store-then-persist: a failed insert after this point orphans the
        // file. Accepted; see the logo store port docs.
        let logo_reference = self.store_logo(logo).await?;
        let listing = Listing::create(
            ListingId::random(),
            actor,
            draft,
            logo_reference,
            Utc::now(),
        );

        self.listings
            .insert(&listing)
            .await
            .map_err(Self::map_repository_error)?;
        info!(listing_id = %listing.id, company = %listing.company, "listing created");
        Ok(listing)
    }

    async fn update(
        &self,
        actor: &UserId,
        id: &ListingId,
        draft: ListingDraft,
        logo: Option<LogoUpload>,
    ) -> Result<Listing, Error> {
        let current = self.fetch_owned(actor, id).await?;

        // Company uniqueness is enforced at creation only; an update may
        // move onto a name another listing holds.
        let logo_reference = self.store_logo(logo).await?;
        let updated = current.apply_update(draft, logo_reference, Utc::now());

        let written = self
            .listings
            .update(&updated)
            .await
            .map_err(Self::map_repository_error)?;
        if !written {
            return Err(Self::not_found(id));
        }
        info!(listing_id = %updated.id, "listing updated");
        Ok(updated)
    }

    async fn delete(&self, actor: &UserId, id: &ListingId) -> Result<(), Error> {
        let _ = self.fetch_owned(actor, id).await?;

        let removed = self
            .listings
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !removed {
            return Err(Self::not_found(id));
        }
        info!(listing_id = %id, "listing deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockListingRepository, MockLogoStore};
    use crate::domain::{ErrorCode, ListingFields};
    use rstest::rstest;

    fn make_service(
        listings: MockListingRepository,
        logos: MockLogoStore,
    ) -> ListingService<MockListingRepository, MockLogoStore> {
        ListingService::new(Arc::new(listings), Arc::new(logos))
    }

    fn draft(company: &str) -> ListingDraft {
        ListingDraft::try_new(ListingFields {
            title: "Rust Engineer".into(),
            company: company.into(),
            location: "Remote".into(),
            website: "https://example.com".into(),
            email: "jobs@example.com".into(),
            tags: "rust,remote".into(),
            description: "Ship software.".into(),
        })
        .expect("valid draft")
    }

    fn stored_listing(owner: &UserId) -> Listing {
        Listing::create(
            ListingId::random(),
            owner.clone(),
            draft("Acme"),
            None,
            Utc::now(),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn create_persists_with_the_actor_as_owner() {
        let actor = UserId::random();
        let mut listings = MockListingRepository::new();
        listings
            .expect_exists_by_company()
            .withf(|company| company == "Acme")
            .times(1)
            .return_once(|_| Ok(false));
        listings.expect_insert().times(1).return_once(|_| Ok(()));
        let mut logos = MockLogoStore::new();
        logos.expect_store().times(0);

        let service = make_service(listings, logos);
        let listing = service
            .create(actor.clone(), draft("Acme"), None)
            .await
            .expect("create succeeds");

        assert_eq!(listing.owner, actor);
        assert_eq!(listing.company, "Acme");
        assert_eq!(listing.created_at, listing.updated_at);
        assert!(listing.logo.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn create_conflicts_on_duplicate_company_without_touching_storage() {
        let mut listings = MockListingRepository::new();
        listings
            .expect_exists_by_company()
            .times(1)
            .return_once(|_| Ok(true));
        listings.expect_insert().times(0);
        let mut logos = MockLogoStore::new();
        logos.expect_store().times(0);

        let service = make_service(listings, logos);
        let error = service
            .create(
                UserId::random(),
                draft("Acme"),
                Some(LogoUpload::new("logo.png", vec![1, 2]).expect("upload")),
            )
            .await
            .expect_err("conflict");

        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(
            error
                .details()
                .and_then(|details| details.get("field"))
                .and_then(|field| field.as_str()),
            Some("company")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn create_records_the_stored_logo_reference() {
        let mut listings = MockListingRepository::new();
        listings
            .expect_exists_by_company()
            .times(1)
            .return_once(|_| Ok(false));
        listings.expect_insert().times(1).return_once(|_| Ok(()));
        let mut logos = MockLogoStore::new();
        logos
            .expect_store()
            .times(1)
            .return_once(|_| Ok(LogoReference::new("logos/abc-logo.png")));

        let service = make_service(listings, logos);
        let listing = service
            .create(
                UserId::random(),
                draft("Acme"),
                Some(LogoUpload::new("logo.png", vec![1, 2]).expect("upload")),
            )
            .await
            .expect("create succeeds");

        assert_eq!(listing.logo, Some(LogoReference::new("logos/abc-logo.png")));
    }

    #[rstest]
    #[tokio::test]
    async fn update_by_a_non_owner_is_forbidden_and_writes_nothing() {
        let owner = UserId::random();
        let existing = stored_listing(&owner);
        let mut listings = MockListingRepository::new();
        listings
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        listings.expect_update().times(0);
        let mut logos = MockLogoStore::new();
        logos.expect_store().times(0);

        let service = make_service(listings, logos);
        let error = service
            .update(
                &UserId::random(),
                &ListingId::random(),
                draft("Acme"),
                None,
            )
            .await
            .expect_err("forbidden");

        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_a_missing_listing_is_not_found() {
        let mut listings = MockListingRepository::new();
        listings
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Ok(None));
        listings.expect_update().times(0);

        let service = make_service(listings, MockLogoStore::new());
        let error = service
            .update(
                &UserId::random(),
                &ListingId::random(),
                draft("Acme"),
                None,
            )
            .await
            .expect_err("not found");

        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_ownership_and_creation_time() {
        let owner = UserId::random();
        let existing = stored_listing(&owner);
        let id = existing.id;
        let created_at = existing.created_at;
        let mut listings = MockListingRepository::new();
        listings
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        listings
            .expect_update()
            .withf(move |updated: &Listing| {
                updated.id == id && updated.company == "Initech" && updated.created_at == created_at
            })
            .times(1)
            .return_once(|_| Ok(true));

        let service = make_service(listings, MockLogoStore::new());
        let updated = service
            .update(&owner, &id, draft("Initech"), None)
            .await
            .expect("update succeeds");

        assert_eq!(updated.owner, owner);
        assert_eq!(updated.company, "Initech");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_by_a_non_owner_is_forbidden_and_removes_nothing() {
        let owner = UserId::random();
        let existing = stored_listing(&owner);
        let id = existing.id;
        let mut listings = MockListingRepository::new();
        listings
            .expect_find_by_id()
            .times(1)
            .return_once(move |_| Ok(Some(existing)));
        listings.expect_delete().times(0);

        let service = make_service(listings, MockLogoStore::new());
        let error = service
            .delete(&UserId::random(), &id)
            .await
            .expect_err("forbidden");

        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_a_missing_listing_is_not_found_on_every_attempt() {
        let mut listings = MockListingRepository::new();
        listings
            .expect_find_by_id()
            .times(2)
            .returning(|_| Ok(None));

        let service = make_service(listings, MockLogoStore::new());
        let id = ListingId::random();

        for _ in 0..2 {
            let error = service
                .delete(&UserId::random(), &id)
                .await
                .expect_err("not found");
            assert_eq!(error.code(), ErrorCode::NotFound);
        }
    }

    #[rstest]
    #[tokio::test]
    async fn list_requests_six_per_page() {
        let mut listings = MockListingRepository::new();
        listings
            .expect_query()
            .withf(|_, page: &PageRequest| page.size() == 6 && page.number().get() == 2)
            .times(1)
            .return_once(|_, page| Ok(Page::empty(page)));

        let service = make_service(listings, MockLogoStore::new());
        let page_two = PageNumber::new(2).expect("page number");
        let page = service
            .list(ListingFilter::unfiltered(), page_two)
            .await
            .expect("list succeeds");

        assert!(page.items().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_surface_as_service_unavailable() {
        let mut listings = MockListingRepository::new();
        listings
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Err(ListingRepositoryError::connection("refused")));

        let service = make_service(listings, MockLogoStore::new());
        let error = service
            .show(&ListingId::random())
            .await
            .expect_err("unavailable");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
