use aide::{axum::ApiRouter, openapi::OpenApi, scalar::Scalar};
use axum::{response::IntoResponse, routing::get, Extension, Json};

/// Scalar API reference and the `OpenAPI` document
pub fn handler() -> ApiRouter {
    let scalar = Scalar::new("/openapi.json").with_title("Case Tracker Docs");

    ApiRouter::new()
        .route("/docs", scalar.axum_route())
        .route("/openapi.json", get(openapi_schema))
}

#[allow(clippy::unused_async)]
async fn openapi_schema(Extension(openapi): Extension<OpenApi>) -> impl IntoResponse {
    Json(openapi)
}
