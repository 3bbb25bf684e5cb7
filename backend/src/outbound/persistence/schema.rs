//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation. When migrations change the schema, regenerate or update this
//! file to match (`diesel print-schema` against a migrated database).

diesel::table! {
    /// Job/company listings.
    ///
    /// `company` is deliberately not constrained unique at the database:
    /// uniqueness is an application rule applied at creation time only, and
    /// updates are allowed to land on an existing name.
    listings (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Posting title.
        title -> Varchar,
        /// Company name.
        company -> Varchar,
        /// Freeform location text.
        location -> Varchar,
        /// Company website URL.
        website -> Varchar,
        /// Contact email address.
        email -> Varchar,
        /// Freeform tag blob, searched by substring.
        tags -> Text,
        /// Posting body.
        description -> Text,
        /// Relative path of the stored logo, when one was uploaded.
        logo -> Nullable<Varchar>,
        /// Id of the creating user; immutable.
        owner_user_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
