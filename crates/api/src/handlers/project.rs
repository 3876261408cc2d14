//! Handlers for the `/projects` resource.
//!
//! Input is validated before the repository opens a transaction; the
//! repository guarantees the project row and its technology links are
//! written or rolled back together.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_core::error::CoreError;
use portfolio_core::types::DbId;
use portfolio_db::models::project::{CreatedProject, ProjectInput};
use portfolio_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

/// POST /api/v1/projects
///
/// Create a project and link the given technologies in one transaction.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let draft = input.to_draft()?;
    let project = ProjectRepo::create(&state.pool, &draft).await?;

    tracing::info!(
        project_id = project.id,
        technology_count = draft.technology_ids.len(),
        "Project created",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedProject {
                project,
                technology_ids: draft.technology_ids,
            },
        }),
    ))
}

/// GET /api/v1/projects
///
/// List all projects with their technologies.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let projects = ProjectRepo::list_with_technologies(&state.pool).await?;
    Ok(Json(DataResponse { data: projects }))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let project = ProjectRepo::find_by_id_with_technologies(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// PUT /api/v1/projects/{id}
///
/// Replace name, description and the full technology set. An unknown `id`
/// is a 404 and writes nothing.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<ProjectInput>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let draft = input.to_draft()?;
    ProjectRepo::update(&state.pool, id, &draft)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        project_id = id,
        technology_count = draft.technology_ids.len(),
        "Project updated",
    );

    // A concurrent delete between commit and this read surfaces as 404.
    let project = ProjectRepo::find_by_id_with_technologies(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: project }))
}

/// DELETE /api/v1/projects/{id}
///
/// Remove the project and its technology links. Idempotent: deleting an
/// id that is already gone still answers 204.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, id).await?;
    if deleted {
        tracing::info!(project_id = id, "Project deleted");
    } else {
        tracing::debug!(project_id = id, "Delete of absent project ignored");
    }
    Ok(StatusCode::NO_CONTENT)
}
