//! Repository for the `projects` table and its `project_technologies` links.
//!
//! Writes that touch both tables run in one transaction: a reader never sees
//! a project whose technology set is partially written. Reads use a single
//! `LEFT JOIN` and fold the rows with [`group_rows`].

use portfolio_core::project::ProjectDraft;
use portfolio_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{WriteError, WriteStep};
use crate::models::project::{group_rows, Project, ProjectTechnologyRow, ProjectWithTechnologies};
use crate::transaction;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Projects joined with their technologies. Callers append WHERE/ORDER BY.
const JOINED_SELECT: &str = "\
    SELECT p.id, p.name, p.description, p.created_at, p.updated_at, \
           t.id AS technology_id, t.name AS technology_name \
    FROM projects p \
    LEFT JOIN project_technologies pt ON pt.project_id = p.id \
    LEFT JOIN technologies t ON t.id = pt.technology_id";

/// Provides transactional writes and grouped reads for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a project and link it to `draft.technology_ids`.
    ///
    /// Either the project row and every link are committed, or nothing is.
    /// An unknown technology id fails the link insert and rolls back the
    /// project row with it.
    pub async fn create(pool: &PgPool, draft: &ProjectDraft) -> Result<Project, WriteError> {
        let mut tx = pool.begin().await.map_err(WriteError::TransactionStart)?;
        let outcome = Self::create_inner(&mut tx, draft).await;
        transaction::finish(tx, outcome).await
    }

    /// Overwrite name and description and replace the whole technology set.
    ///
    /// Returns `None` if no project has the given `id`; nothing is written
    /// in that case. Applying the same draft twice yields the same state.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        draft: &ProjectDraft,
    ) -> Result<Option<Project>, WriteError> {
        let mut tx = pool.begin().await.map_err(WriteError::TransactionStart)?;
        let outcome = Self::update_inner(&mut tx, id, draft).await;
        transaction::finish(tx, outcome).await
    }

    /// Delete a project together with its technology links.
    ///
    /// Returns `true` if a project row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, WriteError> {
        let mut tx = pool.begin().await.map_err(WriteError::TransactionStart)?;
        let outcome = Self::delete_inner(&mut tx, id).await;
        transaction::finish(tx, outcome).await
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Find a project by ID, enriched with its technologies.
    pub async fn find_by_id_with_technologies(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithTechnologies>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} WHERE p.id = $1 ORDER BY t.name");
        let rows = sqlx::query_as::<_, ProjectTechnologyRow>(&query)
            .bind(id)
            .fetch_all(pool)
            .await?;
        Ok(group_rows(rows).into_iter().next())
    }

    /// List all projects with their technologies, oldest first.
    pub async fn list_with_technologies(
        pool: &PgPool,
    ) -> Result<Vec<ProjectWithTechnologies>, sqlx::Error> {
        let query = format!("{JOINED_SELECT} ORDER BY p.id, t.name");
        let rows = sqlx::query_as::<_, ProjectTechnologyRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(group_rows(rows))
    }

    // -----------------------------------------------------------------------
    // Transaction bodies
    // -----------------------------------------------------------------------

    async fn create_inner(
        tx: &mut Transaction<'static, Postgres>,
        draft: &ProjectDraft,
    ) -> Result<Project, WriteError> {
        let query = format!(
            "INSERT INTO projects (name, description) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&draft.name)
            .bind(&draft.description)
            .fetch_one(&mut **tx)
            .await
            .map_err(WriteError::at(WriteStep::InsertProject))?;

        Self::insert_links(tx, project.id, &draft.technology_ids).await?;
        Ok(project)
    }

    async fn update_inner(
        tx: &mut Transaction<'static, Postgres>,
        id: DbId,
        draft: &ProjectDraft,
    ) -> Result<Option<Project>, WriteError> {
        let query = format!(
            "UPDATE projects SET name = $2, description = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.description)
            .fetch_optional(&mut **tx)
            .await
            .map_err(WriteError::at(WriteStep::UpdateProject))?;

        let Some(project) = project else {
            return Ok(None);
        };

        Self::delete_links(tx, id).await?;
        Self::insert_links(tx, id, &draft.technology_ids).await?;
        Ok(Some(project))
    }

    async fn delete_inner(
        tx: &mut Transaction<'static, Postgres>,
        id: DbId,
    ) -> Result<bool, WriteError> {
        Self::delete_links(tx, id).await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await
            .map_err(WriteError::at(WriteStep::DeleteProject))?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Link helpers
    // -----------------------------------------------------------------------

    /// Insert one link per technology id in a single statement. No-op when
    /// `technology_ids` is empty.
    async fn insert_links(
        tx: &mut Transaction<'static, Postgres>,
        project_id: DbId,
        technology_ids: &[DbId],
    ) -> Result<(), WriteError> {
        if technology_ids.is_empty() {
            return Ok(());
        }

        sqlx::query(
            "INSERT INTO project_technologies (project_id, technology_id) \
             SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(project_id)
        .bind(technology_ids)
        .execute(&mut **tx)
        .await
        .map_err(WriteError::at(WriteStep::InsertLinks))?;
        Ok(())
    }

    async fn delete_links(
        tx: &mut Transaction<'static, Postgres>,
        project_id: DbId,
    ) -> Result<(), WriteError> {
        sqlx::query("DELETE FROM project_technologies WHERE project_id = $1")
            .bind(project_id)
            .execute(&mut **tx)
            .await
            .map_err(WriteError::at(WriteStep::DeleteLinks))?;
        Ok(())
    }
}
