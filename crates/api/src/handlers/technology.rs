//! Handlers for the `/technologies` resource.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use portfolio_db::repositories::TechnologyRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/technologies
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let technologies = TechnologyRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: technologies }))
}
