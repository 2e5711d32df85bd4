use axum::{extract::State, Json};
use serde::Deserialize;

use crate::actions::ActionResult;
use crate::errors::AppError;
use crate::layout::ordering::Direction;
use crate::layout::service::{
    get_layout, move_layout_item, submit_layout, toggle_layout_section, LayoutForm, LayoutList,
};
use crate::models::layout::Layout;
use crate::state::AppState;

/// GET /api/v1/layout
pub async fn handle_get_layout(State(state): State<AppState>) -> Json<Layout> {
    Json(get_layout(&state.store).await)
}

/// PUT /api/v1/admin/layout
pub async fn handle_save_layout(
    State(state): State<AppState>,
    Json(form): Json<LayoutForm>,
) -> Json<ActionResult> {
    Json(submit_layout(&state.store, form).await)
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub list: LayoutList,
    pub index: usize,
    pub direction: Direction,
}

/// POST /api/v1/admin/layout/move
pub async fn handle_move_item(
    State(state): State<AppState>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<Layout>, AppError> {
    let layout = move_layout_item(&state.store, req.list, req.index, req.direction).await?;
    Ok(Json(layout))
}

#[derive(Debug, Deserialize)]
pub struct ToggleSectionRequest {
    pub name: String,
}

/// POST /api/v1/admin/layout/sections/toggle
pub async fn handle_toggle_section(
    State(state): State<AppState>,
    Json(req): Json<ToggleSectionRequest>,
) -> Result<Json<Layout>, AppError> {
    let name = req.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Section name is required".to_string()));
    }
    let layout = toggle_layout_section(&state.store, name).await?;
    Ok(Json(layout))
}
