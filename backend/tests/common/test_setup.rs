use std::sync::Arc;

use axum::{body::Body, http::Request, response::Response, Router};
use case_tracker::{server, types::Environment};
use case_tracker_storage::{
    inmate::InmateStorage, item_store::InMemoryItemStore, metrics::RecordingMetrics,
};
use metrics_exporter_prometheus::PrometheusBuilder;
use tower::ServiceExt;

/// Setup test environment variables with all the required configuration
pub fn setup_test_env() {
    // Load test environment variables
    dotenvy::from_path(".env.example").ok();

    // Initialize tracing for tests
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Router wired to an in-memory table and a recording metrics sink
pub struct TestSetup {
    pub router: Router,
    pub item_store: Arc<InMemoryItemStore>,
    pub metrics: Arc<RecordingMetrics>,
}

impl TestSetup {
    pub fn new(environment: Environment) -> Self {
        setup_test_env();

        let item_store = Arc::new(InMemoryItemStore::new());
        let metrics = Arc::new(RecordingMetrics::new());
        let inmate_storage = Arc::new(InmateStorage::new(item_store.clone(), metrics.clone()));

        // Not installed globally, so tests do not share a registry
        let metrics_handle = PrometheusBuilder::new().build_recorder().handle();

        let router = server::router(environment, inmate_storage, metrics_handle);

        Self {
            router,
            item_store,
            metrics,
        }
    }

    pub async fn send_post_request(
        &self,
        route: &str,
        payload: serde_json::Value,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        self.send_raw_post_request(route, &payload.to_string(), Some("application/json"))
            .await
    }

    pub async fn send_raw_post_request(
        &self,
        route: &str,
        body: &str,
        content_type: Option<&str>,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let mut builder = Request::builder().uri(route).method("POST");
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let request = builder.body(Body::from(body.to_string()))?;

        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn send_get_request(
        &self,
        route: &str,
    ) -> Result<Response, Box<dyn std::error::Error>> {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())?;
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }
}

impl Default for TestSetup {
    fn default() -> Self {
        Self::new(Environment::Development)
    }
}
