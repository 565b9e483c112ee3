pub mod health;
pub mod paginate;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/paginate", post(paginate::handle_paginate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::layout::default_pagination_config;

    fn app() -> Router {
        build_router(AppState {
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                pagination: default_pagination_config(),
            },
        })
    }

    async fn post_json(body: Value) -> (StatusCode, Value) {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/paginate")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn block(height: f64) -> Value {
        json!({ "classes": ["header-block"], "height": height })
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "pagefit-api");
    }

    #[tokio::test]
    async fn test_paginate_two_pages() {
        let (status, body) = post_json(json!({
            "document": { "classes": ["resume-root"], "children": [block(600.0), block(600.0)] }
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["pages"].as_array().unwrap().len(), 2);
        assert_eq!(body["pages"][1]["leftover"], 430.0);
        assert_eq!(body["pages"][1]["nodes"].as_array().unwrap().len(), 1);
        assert_eq!(body["band"]["strategy"], "extreme");
        assert_eq!(body["compression"][0]["index"], 1);
        assert_eq!(body["compression"][0]["outcome"], "insufficient_savings");
    }

    #[tokio::test]
    async fn test_paginate_section_with_text() {
        let (status, body) = post_json(json!({
            "document": {
                "children": [{
                    "classes": ["resume-section"],
                    "children": [
                        { "classes": ["section-title"], "text": "Experience" },
                        { "classes": ["section-divider"], "height": 1.0 },
                        {
                            "classes": ["experience-item"],
                            "children": [
                                { "classes": ["item-header"], "text": "Engineer, Acme" },
                                { "classes": ["text-line"], "text": "Built the ingestion pipeline" }
                            ]
                        }
                    ]
                }]
            },
            "lineHeight": 1.5
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalPages"], 1);
        let section = &body["pages"][0]["nodes"][0];
        assert_eq!(section["classes"][0], "resume-section");
        assert_eq!(section["children"].as_array().unwrap().len(), 3);
        // Three text lines at 14 px × 1.5 plus the 1 px divider.
        let height = body["pages"][0]["height"].as_f64().unwrap();
        assert!((height - 64.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_null_document_returns_no_pages() {
        let (status, body) = post_json(json!({ "document": null })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalPages"], 0);
        assert!(body["pages"].as_array().unwrap().is_empty());
        assert!(body["buffer"].is_null());
    }

    #[tokio::test]
    async fn test_non_positive_line_height_is_rejected() {
        let (status, body) = post_json(json!({
            "document": { "children": [block(10.0)] },
            "lineHeight": 0.0
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
