//! Filter predicate for browsing listings.
//!
//! The two optional parameters arrive as explicit arguments; nothing in the
//! domain reaches into ambient request state. Blank input normalises to
//! "absent" so an empty search box behaves like no search box.

use crate::domain::Listing;

/// Query conditions derived from the optional `tag` and `search` parameters.
///
/// - `tag` restricts to listings whose `tags` blob contains it as a
///   case-sensitive substring.
/// - `search` matches when at least one of title, description, tags, or
///   location contains it as a substring.
/// - Both present combine with logical AND; neither present matches all.
///
/// Substring semantics follow the storage engine's native pattern operator;
/// `%` and `_` in user input are passed through unescaped. The in-memory
/// [`matches`](Self::matches) predicate uses plain containment and therefore
/// treats those characters literally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    tag: Option<String>,
    search: Option<String>,
}

fn normalise(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

impl ListingFilter {
    /// Build a filter from raw optional parameters.
    pub fn new(tag: Option<String>, search: Option<String>) -> Self {
        Self {
            tag: normalise(tag),
            search: normalise(search),
        }
    }

    /// A filter matching every listing.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    /// The tag restriction, if one applies.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// The search term, if one applies.
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// True when no condition applies.
    pub fn is_unfiltered(&self) -> bool {
        self.tag.is_none() && self.search.is_none()
    }

    /// Apply the predicate to one listing.
    pub fn matches(&self, listing: &Listing) -> bool {
        if let Some(tag) = self.tag() {
            if !listing.tags.contains(tag) {
                return false;
            }
        }
        if let Some(search) = self.search() {
            let hit = listing.title.contains(search)
                || listing.description.contains(search)
                || listing.tags.contains(search)
                || listing.location.contains(search);
            if !hit {
                return false;
            }
        }
        true
    }
}
