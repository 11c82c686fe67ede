//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`                         - Health check: storage, entry types
//! - `GET  /{year}/{month}/{day}/{slug}`    - Published entry at its canonical URL
//! - `GET  /tag/{tag}`                      - Live entries carrying a tag
//! - `/api/*`                               - JSON API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slashes are trimmed, so the URLs produced
//!   by the entry resolver (`/2024/jan/05/hello/`) route as-is

use crate::api;
use crate::api::handlers::{entry_detail_handler, health_handler, tag_entries_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All routes with tracing, without path normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/tag/{tag}", get(tag_entries_handler))
        .route("/{year}/{month}/{day}/{slug}", get(entry_detail_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::EntryService;
    use crate::domain::entities::Entry;
    use crate::domain::kinds::EntryTypeRegistry;
    use crate::domain::repositories::EntryRepository;
    use crate::infrastructure::persistence::MemoryEntryRepository;
    use crate::utils::url_resolver::UrlResolver;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_absolute_url_routes_with_trailing_slash() {
        let repository: Arc<dyn EntryRepository> = Arc::new(MemoryEntryRepository::new());
        let service = Arc::new(EntryService::new(
            repository,
            Arc::new(EntryTypeRegistry::with_builtin_kinds()),
            Arc::new(UrlResolver::default()),
        ));

        let mut entry = Entry::new("html", "Hello", "hello");
        entry
            .fields
            .insert("content".to_string(), "<b>hi</b>".to_string());
        let saved = service.save(entry).await.unwrap();
        let url = service.absolute_url(&saved).unwrap();
        assert!(url.ends_with('/'));

        let app = app_router(AppState::new(service, 10));
        let response = app
            .oneshot(Request::builder().uri(url).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
