//! Repository for the `technologies` table.

use sqlx::PgPool;

use crate::models::technology::Technology;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Read access to the technology catalogue.
pub struct TechnologyRepo;

impl TechnologyRepo {
    /// List all technologies ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Technology>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM technologies ORDER BY name");
        sqlx::query_as::<_, Technology>(&query).fetch_all(pool).await
    }
}
