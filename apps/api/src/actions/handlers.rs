use axum::{
    extract::{Path, State},
    Json,
};

use crate::actions::forms::Form;
use crate::actions::submit::{submit_create, submit_delete, submit_upsert};
use crate::actions::ActionResult;
use crate::state::AppState;
use crate::store::Entity;

/// POST /api/v1/admin/{collection}
pub async fn handle_create<F: Form>(
    State(state): State<AppState>,
    Json(form): Json<F>,
) -> Json<ActionResult> {
    Json(submit_create(&state.store, state.media.as_ref(), form).await)
}

/// PUT /api/v1/admin/about
pub async fn handle_upsert<F: Form>(
    State(state): State<AppState>,
    Json(form): Json<F>,
) -> Json<ActionResult> {
    Json(submit_upsert(&state.store, state.media.as_ref(), form).await)
}

/// DELETE /api/v1/admin/{collection}/:id
pub async fn handle_delete<T: Entity>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<ActionResult> {
    Json(submit_delete::<T>(&state.store, &id).await)
}
