// Dashboard server integration tests
//
// Drive the router with oneshot requests against the built-in dataset.
// Run with: cargo test --test api_integration_tests

#[cfg(feature = "server")]
mod api_tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use lifecycle_dashboard::{create_router, AppConfig, AppState, LifecycleData};
    use serde_json::Value;
    use tower::ServiceExt; // for oneshot

    // Helper: Router over the built-in dataset
    fn create_test_app() -> axum::Router {
        let state = AppState::from_data(LifecycleData::default_dataset(), AppConfig::default());
        create_router(state)
    }

    async fn get(uri: &str) -> axum::response::Response {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        String::from_utf8(body.to_vec()).expect("Body is not UTF-8")
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = get("/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Lifecycle JSON API
    // =========================================================================

    #[tokio::test]
    async fn test_lifecycle_document() {
        let body = json_response(get("/api/lifecycle").await).await;

        assert_eq!(body["stages"].as_array().unwrap().len(), 12);
        assert_eq!(body["connections"].as_array().unwrap().len(), 15);
        assert_eq!(body["stages"][0]["name"], "Conceptualise");
        // Connection type keeps its JSON key
        assert!(body["connections"][0]["type"].is_string());
    }

    #[tokio::test]
    async fn test_stage_summaries() {
        let body = json_response(get("/api/stages").await).await;
        assert_eq!(body["rows"], 12);

        let store = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["name"] == "Store")
            .unwrap();
        assert!(store["tools_count"].as_u64().unwrap() >= 3);
        assert!(store["categories"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c == "Data Repository"));
    }

    #[tokio::test]
    async fn test_stage_detail() {
        let body = json_response(get("/api/stages/Collect").await).await;
        assert_eq!(body["stage"]["name"], "Collect");
        assert!(!body["categories"].as_array().unwrap().is_empty());
        assert!(body["outgoing"]
            .as_array()
            .unwrap()
            .iter()
            .any(|c| c["to"] == "Process"));
    }

    #[tokio::test]
    async fn test_unknown_stage_is_404() {
        let response = get("/api/stages/Nowhere").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("Nowhere"));
    }

    #[tokio::test]
    async fn test_statistics() {
        let body = json_response(get("/api/statistics").await).await;
        assert_eq!(body["statistics"]["total_stages"], 12);
        assert_eq!(body["statistics"]["total_connections"], 15);
        assert_eq!(body["statistics"]["total_tools"], 50);
    }

    #[tokio::test]
    async fn test_layout_respects_compare_filter() {
        let body = json_response(get("/api/layout?mode=compare_tools&category=Database").await).await;

        assert_eq!(body["view"]["mode"], "compare_tools");
        let stages = body["layout"]["stages"].as_array().unwrap();
        assert_eq!(stages.len(), 12);
        for stage in stages {
            for category in stage["categories"].as_array().unwrap() {
                assert_eq!(category["name"], "Database");
            }
        }
    }

    // =========================================================================
    // Section 3: Diagram
    // =========================================================================

    #[tokio::test]
    async fn test_diagram_svg() {
        let response = get("/diagram.svg").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("image/svg+xml"));

        let svg = body_string(response).await;
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("class=\"connector ").count(), 15);
    }

    #[tokio::test]
    async fn test_diagram_hides_connections() {
        let svg = body_string(get("/diagram.svg?show_connections=0").await).await;
        assert_eq!(svg.matches("class=\"connector ").count(), 0);
    }

    #[tokio::test]
    async fn test_diagram_cache_is_reused() {
        let state = AppState::from_data(LifecycleData::default_dataset(), AppConfig::default());
        let view = state.view_from_query(Some("focus=Store"));

        let first = state.diagram_svg(&view).await;
        let second = state.diagram_svg(&view).await;
        assert!(std::sync::Arc::ptr_eq(&first, &second));
    }

    // =========================================================================
    // Section 4: Dashboard page
    // =========================================================================

    #[tokio::test]
    async fn test_dashboard_full_page() {
        let response = get("/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("MaLDReTH Research Data Lifecycle"));
        assert!(html.contains("How to Read This Visualization"));
        assert!(html.contains("Lifecycle Stages Overview"));
        assert!(html.contains("<svg"));
    }

    #[tokio::test]
    async fn test_dashboard_focus_details() {
        let html = body_string(get("/?focus=Plan").await).await;
        assert!(html.contains("Plan Stage Details"));
        assert!(html.contains("DMPTool"));
    }

    #[tokio::test]
    async fn test_dashboard_compare_tables() {
        let html = body_string(get("/?mode=compare_tools&category=Data+Repository").await).await;
        assert!(html.contains("Tool Category Comparison"));
        assert!(html.contains("Zenodo"));
        assert!(html.contains("Stages Covered"));
    }

    #[tokio::test]
    async fn test_dashboard_compare_with_cleared_selection() {
        let html = body_string(get("/?mode=compare_tools&category=").await).await;
        assert!(html.contains("Select Tool Categories to Compare"));
        assert!(html.contains("Lifecycle Stages Overview"));
        assert!(!html.contains("Tool Category Comparison"));
    }

    #[tokio::test]
    async fn test_htmx_request_returns_workspace_partial() {
        let response = create_test_app()
            .oneshot(
                Request::builder()
                    .uri("/?preset=show_all_levels")
                    .header("HX-Request", "true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(!html.contains("<!DOCTYPE html>"));
        assert!(html.trim_start().starts_with("<form id=\"workspace\""));
        assert!(html.contains("sector-exemplars"));
    }

    // =========================================================================
    // Section 5: Startup
    // =========================================================================

    #[tokio::test]
    async fn test_state_from_missing_file_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifecycle_data.json");

        let config = AppConfig {
            data_path: path.clone(),
            ..AppConfig::default()
        };
        let state = AppState::new(config).unwrap();

        assert_eq!(state.data.stages.len(), 12);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_state_from_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lifecycle_data.json");
        std::fs::write(&path, "{ not json").unwrap();

        let config = AppConfig {
            data_path: path,
            ..AppConfig::default()
        };
        assert!(AppState::new(config).is_err());
    }
}
