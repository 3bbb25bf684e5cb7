//! Driving port for listing mutations.

use async_trait::async_trait;

use crate::domain::{Error, Listing, ListingDraft, ListingId, LogoUpload, UserId};

/// Mutations the HTTP adapter drives. Every operation takes the acting
/// user explicitly; ownership is enforced inside, never at the transport.
#[async_trait]
pub trait ListingCommand: Send + Sync {
    /// Create a listing owned by the actor. `Conflict` when the company
    /// name is already taken.
    async fn create(
        &self,
        actor: UserId,
        draft: ListingDraft,
        logo: Option<LogoUpload>,
    ) -> Result<Listing, Error>;

    /// Overwrite the listing's fields. `NotFound` when absent, `Forbidden`
    /// when the actor is not the owner. The stored logo reference changes
    /// only when a new file accompanies the update.
    async fn update(
        &self,
        actor: &UserId,
        id: &ListingId,
        draft: ListingDraft,
        logo: Option<LogoUpload>,
    ) -> Result<Listing, Error>;

    /// Remove the listing permanently. `NotFound` when absent — including
    /// on repeated attempts — and `Forbidden` when the actor is not the
    /// owner.
    async fn delete(&self, actor: &UserId, id: &ListingId) -> Result<(), Error>;
}
