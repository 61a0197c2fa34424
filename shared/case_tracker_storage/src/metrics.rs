//! Operational metrics emitted by the storage service
//!
//! The service only talks to [`InmateMetrics`]. [`MetricsFacade`] forwards to
//! whichever `metrics` recorder the process installed.

use metrics::{counter, histogram};

use crate::key::RecordKind;

/// Requests handled, labelled by `operation`
pub const REQUESTS_TOTAL: &str = "inmate_requests_total";
/// Write capacity consumed per put, labelled by `record_kind`
pub const WRITE_CAPACITY: &str = "put_item_write_capacity";
/// Failed puts, labelled by `record_kind`
pub const WRITE_ERRORS_TOTAL: &str = "put_item_error_total";

/// Sink for the service's counters and observations
pub trait InmateMetrics: Send + Sync {
    /// Counts one service operation
    fn record_request(&self, operation: &'static str);

    /// Observes the write capacity consumed by a successful put
    fn record_write_capacity(&self, kind: RecordKind, units: f64);

    /// Counts one failed put
    fn record_write_error(&self, kind: RecordKind);
}

/// Metrics sink backed by the `metrics` crate macros
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsFacade;

impl InmateMetrics for MetricsFacade {
    fn record_request(&self, operation: &'static str) {
        counter!(REQUESTS_TOTAL, "operation" => operation).increment(1);
    }

    fn record_write_capacity(&self, kind: RecordKind, units: f64) {
        histogram!(WRITE_CAPACITY, "record_kind" => kind.to_string()).record(units);
    }

    fn record_write_error(&self, kind: RecordKind) {
        counter!(WRITE_ERRORS_TOTAL, "record_kind" => kind.to_string()).increment(1);
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use recording::RecordingMetrics;

#[cfg(any(test, feature = "test-utils"))]
mod recording {
    use std::sync::{Mutex, PoisonError};

    use super::InmateMetrics;
    use crate::key::RecordKind;

    /// Metrics sink that keeps everything it receives, for assertions in tests
    #[derive(Debug, Default)]
    pub struct RecordingMetrics {
        requests: Mutex<Vec<&'static str>>,
        write_capacity: Mutex<Vec<(RecordKind, f64)>>,
        write_errors: Mutex<Vec<RecordKind>>,
    }

    impl RecordingMetrics {
        /// Creates an empty sink
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Operations counted so far, in order
        #[must_use]
        pub fn requests(&self) -> Vec<&'static str> {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Write capacity observations so far, in order
        #[must_use]
        pub fn write_capacity(&self) -> Vec<(RecordKind, f64)> {
            self.write_capacity
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Failed puts counted so far, in order
        #[must_use]
        pub fn write_errors(&self) -> Vec<RecordKind> {
            self.write_errors
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }
    }

    impl InmateMetrics for RecordingMetrics {
        fn record_request(&self, operation: &'static str) {
            self.requests
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(operation);
        }

        fn record_write_capacity(&self, kind: RecordKind, units: f64) {
            self.write_capacity
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((kind, units));
        }

        fn record_write_error(&self, kind: RecordKind) {
            self.write_errors
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(kind);
        }
    }
}
