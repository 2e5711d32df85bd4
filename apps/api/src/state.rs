use std::sync::Arc;

use crate::auth::SessionVerifier;
use crate::media::MediaUploader;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Document store holding every collection. Postgres in production.
    pub store: Arc<dyn DocumentStore>,
    /// Image uploads for avatar, project and certification images.
    pub media: Arc<dyn MediaUploader>,
    pub sessions: SessionVerifier,
}
