use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use case_tracker::{server, types::Environment};
use case_tracker_storage::{
    inmate::InmateStorage,
    item_store::DynamoItemStore,
    metrics::{MetricsFacade, WRITE_CAPACITY},
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Histogram buckets for consumed write capacity units
const WRITE_CAPACITY_BUCKETS: &[f64] = &[0.5, 1.0, 2.0, 4.0, 8.0, 16.0, 32.0];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // Use JSON format for staging/production, regular format for development
    match environment {
        Environment::Production | Environment::Staging => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
        }
        Environment::Development => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    info!("Starting Case Tracker in {:?} environment", environment);

    let metrics_handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(WRITE_CAPACITY.to_string()),
            WRITE_CAPACITY_BUCKETS,
        )?
        .install_recorder()?;

    info!("✅ Initialized Prometheus metrics recorder");

    let dynamodb_client = Arc::new(DynamoDbClient::new(&environment.aws_config().await));
    let item_store = Arc::new(DynamoItemStore::new(
        dynamodb_client,
        environment.table_name(),
    ));
    let inmate_storage = Arc::new(InmateStorage::new(item_store, Arc::new(MetricsFacade)));

    info!("✅ Initialized inmate storage");

    server::start(environment, inmate_storage, metrics_handle).await
}
