//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{meta::region::RegionProviderChain, retry::RetryConfig, BehaviorVersion, Region};

/// Table used when `CASE_TRACKER_TABLE_NAME` is not set
const DEFAULT_TABLE_NAME: &str = "case_tracker";

/// Region used when the default provider chain finds none
const DEFAULT_AWS_REGION: &str = "ap-southeast-1";

/// Application environment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Name of the shared case tracker table
    #[must_use]
    pub fn table_name(&self) -> String {
        env::var("CASE_TRACKER_TABLE_NAME").unwrap_or_else(|_| DEFAULT_TABLE_NAME.to_string())
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Production | Self::Staging => None,
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry settings
    ///
    /// Credentials and region come from the default provider chain, so a
    /// profile with `role_arn` assumes that role.
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        let region = RegionProviderChain::default_provider().or_else(Region::new(DEFAULT_AWS_REGION));

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .retry_config(retry_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            loader = loader.endpoint_url(endpoint_url);
        }

        loader.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_environment_from_env() {
        // Test development (default)
        env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Environment::Development);

        env::set_var("APP_ENV", "development");
        assert_eq!(Environment::from_env(), Environment::Development);

        env::set_var("APP_ENV", " Staging ");
        assert_eq!(Environment::from_env(), Environment::Staging);

        env::set_var("APP_ENV", "production");
        assert_eq!(Environment::from_env(), Environment::Production);

        env::remove_var("APP_ENV");
    }

    #[test]
    #[serial]
    #[should_panic(expected = "Invalid environment: invalid")]
    fn test_invalid_environment() {
        env::set_var("APP_ENV", "invalid");
        let _ = Environment::from_env();
    }

    #[test]
    #[serial]
    fn test_table_name() {
        env::remove_var("CASE_TRACKER_TABLE_NAME");
        assert_eq!(Environment::Production.table_name(), "case_tracker");

        env::set_var("CASE_TRACKER_TABLE_NAME", "case_tracker_test");
        assert_eq!(Environment::Development.table_name(), "case_tracker_test");

        env::remove_var("CASE_TRACKER_TABLE_NAME");
    }

    #[test]
    fn test_show_api_docs() {
        assert!(Environment::Development.show_api_docs());
        assert!(Environment::Staging.show_api_docs());
        assert!(!Environment::Production.show_api_docs());
    }

    #[test]
    fn test_override_aws_endpoint_url() {
        assert_eq!(
            Environment::Development.override_aws_endpoint_url(),
            Some("http://localhost:4566")
        );
        assert_eq!(Environment::Production.override_aws_endpoint_url(), None);
    }
}
