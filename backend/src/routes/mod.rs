mod docs;
mod health;
pub mod inmates;
mod metrics;

use aide::axum::{
    routing::{get, post},
    ApiRouter,
};

use crate::types::Environment;

/// Creates the router with all handler routes
///
/// API docs are only mounted where [`Environment::show_api_docs`] allows them.
pub fn handler(environment: Environment) -> ApiRouter {
    let router = ApiRouter::new()
        .api_route("/health", get(health::handler))
        .api_route("/inmates", get(inmates::list_inmates))
        .api_route("/inmate", post(inmates::create_inmate))
        .api_route("/inmate/attempt", post(inmates::record_attempt))
        .api_route(
            "/inmate/attempts/{inmate_id}",
            get(inmates::list_attempts),
        )
        .route("/metrics", axum::routing::get(metrics::handler));

    if environment.show_api_docs() {
        router.merge(docs::handler())
    } else {
        router
    }
}
