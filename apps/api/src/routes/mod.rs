pub mod health;

use axum::{
    http::Uri,
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::actions::forms::{
    AboutForm, AchievementForm, CertificationForm, EducationForm, ProfileLinkForm, ProjectForm,
    SkillForm, WorkExperienceForm,
};
use crate::actions::handlers::{handle_create, handle_delete, handle_upsert};
use crate::auth::require_session;
use crate::errors::AppError;
use crate::layout::handlers as layout;
use crate::models::content::{
    Achievement, Certification, Education, ProfileLink, Project, Skill, WorkExperience,
};
use crate::page::handlers as page;
use crate::richtext::handlers as richtext;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Dashboard routes. Every one of them sits behind the session guard.
fn admin_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(page::handle_dashboard))
        .route("/about", put(handle_upsert::<AboutForm>))
        .route("/skills", post(handle_create::<SkillForm>))
        .route("/skills/:id", delete(handle_delete::<Skill>))
        .route("/projects", post(handle_create::<ProjectForm>))
        .route("/projects/:id", delete(handle_delete::<Project>))
        .route("/achievements", post(handle_create::<AchievementForm>))
        .route("/achievements/:id", delete(handle_delete::<Achievement>))
        .route("/certifications", post(handle_create::<CertificationForm>))
        .route("/certifications/:id", delete(handle_delete::<Certification>))
        .route("/education", post(handle_create::<EducationForm>))
        .route("/education/:id", delete(handle_delete::<Education>))
        .route("/work-experience", post(handle_create::<WorkExperienceForm>))
        .route("/work-experience/:id", delete(handle_delete::<WorkExperience>))
        .route("/profile-links", post(handle_create::<ProfileLinkForm>))
        .route("/profile-links/:id", delete(handle_delete::<ProfileLink>))
        .route("/layout", put(layout::handle_save_layout))
        .route("/layout/move", post(layout::handle_move_item))
        .route("/layout/sections/toggle", post(layout::handle_toggle_section))
        .route("/richtext/transform", post(richtext::handle_transform))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Public site
        .route("/api/v1/page", get(page::handle_public_page))
        .route("/api/v1/layout", get(layout::handle_get_layout))
        .route("/api/v1/richtext/render", post(richtext::handle_render))
        // Dashboard
        .nest("/api/v1/admin", admin_router(state.clone()))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
    };
    use chrono::Duration;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::auth::test_support::{token_for, TEST_SECRET};
    use crate::auth::SessionVerifier;
    use crate::media::stub::StubUploader;
    use crate::store::memory::MemoryDocumentStore;

    fn app() -> Router {
        build_router(AppState {
            store: Arc::new(MemoryDocumentStore::default()),
            media: Arc::new(StubUploader::default()),
            sessions: SessionVerifier::new(TEST_SECRET),
        })
    }

    fn request(method: Method, uri: &str, body: Option<Value>, authed: bool) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if authed {
            builder = builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", token_for(TEST_SECRET, Duration::hours(1))),
            );
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), request(Method::GET, "/health", None, false)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "portfolio-api");
    }

    #[tokio::test]
    async fn test_layout_defaults_are_public() {
        let (status, body) =
            send(&app(), request(Method::GET, "/api/v1/layout", None, false)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sections"][0], "About");
        assert_eq!(body["navLinks"][0]["href"], "#home");
    }

    #[tokio::test]
    async fn test_admin_requires_session() {
        let app = app();
        let skill = json!({ "name": "Rust", "icon": "rust" });
        let (status, body) = send(
            &app,
            request(Method::POST, "/api/v1/admin/skills", Some(skill), false),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_create_skill_then_see_it_on_page() {
        let app = app();
        let skill = json!({ "name": "Rust", "icon": "rust", "category": "Languages" });
        let (status, body) = send(
            &app,
            request(Method::POST, "/api/v1/admin/skills", Some(skill), true),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, page) = send(&app, request(Method::GET, "/api/v1/page", None, false)).await;
        let skills = page["sections"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["section"] == "Skills")
            .unwrap();
        assert_eq!(skills["skills"][0]["name"], "Rust");
        assert_eq!(skills["skills"][0]["icon"], "rust");
    }

    #[tokio::test]
    async fn test_invalid_form_reports_field_errors() {
        let (status, body) = send(
            &app(),
            request(
                Method::POST,
                "/api/v1/admin/skills",
                Some(json!({ "name": "" })),
                true,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert!(body["errors"]["name"].is_array());
        assert!(body["errors"]["icon"].is_array());
    }

    #[tokio::test]
    async fn test_toggle_section_round_trip() {
        let app = app();
        let (status, body) = send(
            &app,
            request(
                Method::POST,
                "/api/v1/admin/layout/sections/toggle",
                Some(json!({ "name": "Skills" })),
                true,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body["sections"]
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s == "Skills"));

        let (status, _) = send(
            &app,
            request(
                Method::POST,
                "/api/v1/admin/layout/sections/toggle",
                Some(json!({ "name": "  " })),
                true,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_with_malformed_id() {
        let (status, body) = send(
            &app(),
            request(Method::DELETE, "/api/v1/admin/projects/not-a-uuid", None, true),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], false);
        assert!(body["errors"]["id"].is_array());
    }

    #[tokio::test]
    async fn test_render_endpoint() {
        let (status, body) = send(
            &app(),
            request(
                Method::POST,
                "/api/v1/richtext/render",
                Some(json!({ "content": "line one\nline two" })),
                false,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["html"], "<p>line one<br>line two</p>");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = send(&app(), request(Method::GET, "/nope", None, false)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
