use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    Extension,
};
use metrics_exporter_prometheus::PrometheusHandle;

/// Prometheus text exposition of every metric recorded by the process
#[allow(clippy::unused_async)]
pub async fn handler(Extension(handle): Extension<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        handle.render(),
    )
}
