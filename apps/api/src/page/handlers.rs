use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::page::{compose_public_page, dashboard_summary, DashboardSummary, PublicPage};
use crate::state::AppState;

/// GET /api/v1/page
pub async fn handle_public_page(
    State(state): State<AppState>,
) -> Result<Json<PublicPage>, AppError> {
    Ok(Json(compose_public_page(&state.store).await?))
}

/// GET /api/v1/admin/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    Ok(Json(dashboard_summary(&state.store).await?))
}
