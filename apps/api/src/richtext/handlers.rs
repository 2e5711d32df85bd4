use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::richtext::{
    content_html, load_for_editing, serialize, set_align, set_block_kind, toggle_mark, Align,
    BlockKind, Mark, Range,
};

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    /// `None` only for absent or blank content. An empty document still
    /// renders as an empty paragraph.
    pub html: Option<String>,
}

/// POST /api/v1/richtext/render
pub async fn handle_render(Json(req): Json<RenderRequest>) -> Json<RenderResponse> {
    Json(RenderResponse {
        html: content_html(req.content.as_deref()),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum EditCommand {
    ToggleMark { mark: Mark },
    SetBlockKind { kind: BlockKind },
    SetAlign {
        #[serde(default)]
        align: Option<Align>,
    },
}

#[derive(Debug, Deserialize)]
pub struct TransformRequest {
    #[serde(default)]
    pub content: Option<String>,
    pub selection: Range,
    #[serde(flatten)]
    pub command: EditCommand,
}

#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub content: String,
    pub html: Option<String>,
}

/// POST /api/v1/admin/richtext/transform
///
/// Loads the stored value for editing (literal text becomes paragraphs),
/// applies one command and returns the re-encoded document with its preview.
pub async fn handle_transform(
    Json(req): Json<TransformRequest>,
) -> Result<Json<TransformResponse>, AppError> {
    let doc = load_for_editing(req.content.as_deref());
    debug!("Applying {:?} to {} blocks", req.command, doc.blocks.len());

    let edited = match req.command {
        EditCommand::ToggleMark { mark } => toggle_mark(&doc, &req.selection, mark),
        EditCommand::SetBlockKind { kind } => set_block_kind(&doc, &req.selection, kind),
        EditCommand::SetAlign { align } => set_align(&doc, &req.selection, align),
    }
    .map_err(|e| AppError::Validation(e.to_string()))?;

    let content = serialize(&edited);
    let html = content_html(Some(&content));
    Ok(Json(TransformResponse { content, html }))
}
