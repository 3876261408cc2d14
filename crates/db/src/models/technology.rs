//! Technology reference data. Seeded by migration, read-only at runtime.

use portfolio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `technologies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Technology {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The `{id, name}` pair embedded in a project's `technologies` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TechnologySummary {
    pub id: DbId,
    pub name: String,
}
