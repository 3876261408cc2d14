//! Primitive aliases shared by the db and api crates.

/// Primary keys of `projects` and `technologies` (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// `created_at` / `updated_at` columns are TIMESTAMPTZ, read as UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
