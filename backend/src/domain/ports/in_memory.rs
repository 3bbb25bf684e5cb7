//! In-memory listing repository.
//!
//! Backs the HTTP surface when no database is configured and gives tests a
//! real repository without I/O. Semantics mirror the Diesel adapter: whole-
//! record writes, newest-first ordering, page slicing with a total count.

use std::sync::Mutex;

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{ListingRepository, ListingRepositoryError};
use crate::domain::{Listing, ListingFilter, ListingId, UserId};

/// Listing repository holding records in process memory.
#[derive(Debug, Default)]
pub struct InMemoryListingRepository {
    records: Mutex<Vec<Listing>>,
}

impl InMemoryListingRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_records<T>(
        &self,
        operate: impl FnOnce(&mut Vec<Listing>) -> T,
    ) -> Result<T, ListingRepositoryError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| ListingRepositoryError::query("fixture lock poisoned"))?;
        Ok(operate(&mut records))
    }
}

#[async_trait]
impl ListingRepository for InMemoryListingRepository {
    async fn insert(&self, listing: &Listing) -> Result<(), ListingRepositoryError> {
        self.with_records(|records| records.push(listing.clone()))
    }

    async fn find_by_id(
        &self,
        id: &ListingId,
    ) -> Result<Option<Listing>, ListingRepositoryError> {
        self.with_records(|records| records.iter().find(|l| l.id == *id).cloned())
    }

    async fn update(&self, listing: &Listing) -> Result<bool, ListingRepositoryError> {
        self.with_records(|records| {
            match records.iter_mut().find(|l| l.id == listing.id) {
                Some(stored) => {
                    *stored = listing.clone();
                    true
                }
                None => false,
            }
        })
    }

    async fn delete(&self, id: &ListingId) -> Result<bool, ListingRepositoryError> {
        self.with_records(|records| {
            let before = records.len();
            records.retain(|l| l.id != *id);
            records.len() < before
        })
    }

    async fn exists_by_company(&self, company: &str) -> Result<bool, ListingRepositoryError> {
        self.with_records(|records| records.iter().any(|l| l.company == company))
    }

    async fn query(
        &self,
        filter: &ListingFilter,
        page: PageRequest,
    ) -> Result<Page<Listing>, ListingRepositoryError> {
        self.with_records(|records| {
            let mut matched: Vec<Listing> = records
                .iter()
                .filter(|l| filter.matches(l))
                .cloned()
                .collect();
            matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

            let total = matched.len() as u64;
            let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
            let limit = usize::try_from(page.limit()).unwrap_or(0);
            let items: Vec<Listing> = matched.into_iter().skip(offset).take(limit).collect();
            Page::new(items, page, total)
        })
    }

    async fn list_owned_by(
        &self,
        owner: &UserId,
    ) -> Result<Vec<Listing>, ListingRepositoryError> {
        self.with_records(|records| {
            records.iter().filter(|l| l.owner == *owner).cloned().collect()
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ListingDraft, ListingFields};
    use chrono::{Duration, Utc};
    use pagination::PageNumber;
    use rstest::rstest;

    fn page_request(number: u32) -> PageRequest {
        let number = PageNumber::new(number).expect("page number");
        PageRequest::new(number, 6).expect("page request")
    }

    fn listing_at(company: &str, tags: &str, seconds_ago: i64) -> Listing {
        let draft = ListingDraft::try_new(ListingFields {
            title: format!("{company} role"),
            company: company.into(),
            location: "Remote".into(),
            website: "https://example.com".into(),
            email: "jobs@example.com".into(),
            tags: tags.into(),
            description: "Do things.".into(),
        })
        .expect("valid draft");
        Listing::create(
            ListingId::random(),
            UserId::random(),
            draft,
            None,
            Utc::now() - Duration::seconds(seconds_ago),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn query_orders_newest_first_and_pages_by_six() {
        let repo = InMemoryListingRepository::new();
        for age in 0..8 {
            repo.insert(&listing_at(&format!("Company{age}"), "general", age))
                .await
                .expect("insert");
        }

        let first = repo
            .query(&ListingFilter::unfiltered(), page_request(1))
            .await
            .expect("query");
        assert_eq!(first.items().len(), 6);
        assert_eq!(first.total(), 8);
        assert_eq!(first.items()[0].company, "Company0");
        assert_eq!(first.items()[5].company, "Company5");

        let second = repo
            .query(&ListingFilter::unfiltered(), page_request(2))
            .await
            .expect("query");
        assert_eq!(second.items().len(), 2);
        assert_eq!(second.items()[0].company, "Company6");
    }

    #[rstest]
    #[tokio::test]
    async fn pages_past_the_end_are_empty_not_errors() {
        let repo = InMemoryListingRepository::new();
        repo.insert(&listing_at("Acme", "remote", 0))
            .await
            .expect("insert");

        let page = repo
            .query(&ListingFilter::unfiltered(), page_request(4))
            .await
            .expect("query");
        assert!(page.items().is_empty());
        assert_eq!(page.total(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn query_applies_the_filter_predicate() {
        let repo = InMemoryListingRepository::new();
        repo.insert(&listing_at("Acme", "remote,senior", 1))
            .await
            .expect("insert");
        repo.insert(&listing_at("Globex", "onsite", 0))
            .await
            .expect("insert");

        let remote = repo
            .query(
                &ListingFilter::new(Some("remote".into()), None),
                page_request(1),
            )
            .await
            .expect("query");
        assert_eq!(remote.total(), 1);
        assert_eq!(remote.items()[0].company, "Acme");

        let onsite = repo
            .query(
                &ListingFilter::new(None, Some("onsite".into())),
                page_request(1),
            )
            .await
            .expect("query");
        assert_eq!(onsite.total(), 1);
        assert_eq!(onsite.items()[0].company, "Globex");
    }

    #[rstest]
    #[tokio::test]
    async fn update_and_delete_report_absence() {
        let repo = InMemoryListingRepository::new();
        let stray = listing_at("Ghost", "gone", 0);

        assert!(!repo.update(&stray).await.expect("update"));
        assert!(!repo.delete(&stray.id).await.expect("delete"));

        repo.insert(&stray).await.expect("insert");
        assert!(repo.delete(&stray.id).await.expect("delete"));
        // Second delete of the same id reports absence again.
        assert!(!repo.delete(&stray.id).await.expect("delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn list_owned_by_returns_only_the_owners_records() {
        let repo = InMemoryListingRepository::new();
        let mine = listing_at("Acme", "remote", 0);
        let theirs = listing_at("Globex", "onsite", 1);
        repo.insert(&mine).await.expect("insert");
        repo.insert(&theirs).await.expect("insert");

        let owned = repo.list_owned_by(&mine.owner).await.expect("list");
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, mine.id);
    }

    #[rstest]
    #[tokio::test]
    async fn exists_by_company_is_exact() {
        let repo = InMemoryListingRepository::new();
        repo.insert(&listing_at("Acme", "remote", 0))
            .await
            .expect("insert");

        assert!(repo.exists_by_company("Acme").await.expect("exists"));
        assert!(!repo.exists_by_company("acme").await.expect("exists"));
        assert!(!repo.exists_by_company("Globex").await.expect("exists"));
    }
}
