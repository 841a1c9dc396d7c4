//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Job listings, unique on (title, company, location).
    jobs (id) {
        id -> Int4,
        #[max_length = 200]
        title -> Varchar,
        #[max_length = 100]
        company -> Varchar,
        #[max_length = 100]
        location -> Varchar,
        posting_date -> Timestamptz,
        #[max_length = 100]
        job_type -> Nullable<Varchar>,
        #[max_length = 150]
        sector -> Nullable<Varchar>,
        #[max_length = 255]
        tags -> Nullable<Varchar>,
    }
}
