//! AWS client configuration
//!
//! Endpoint overrides let the clients talk to a local emulator such as
//! `LocalStack` instead of AWS.

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion, SdkConfig};
use aws_sdk_s3::Client as S3Client;
use aws_sdk_sqs::Client as SqsClient;
use tracing::info;

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(50);
const OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings used to build the S3 and SQS clients
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsSettings {
    /// Endpoint override for S3
    pub s3_endpoint_url: Option<String>,
    /// Endpoint override for SQS
    pub sqs_endpoint_url: Option<String>,
}

impl AwsSettings {
    /// Reads endpoint overrides from `S3_ENDPOINT_URL` and `SQS_ENDPOINT_URL`.
    /// Unset or empty variables mean the regular AWS endpoints.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            s3_endpoint_url: read("S3_ENDPOINT_URL"),
            sqs_endpoint_url: read("SQS_ENDPOINT_URL"),
        }
    }

    /// Loads the default AWS configuration with retry and timeout settings
    pub async fn sdk_config(&self) -> SdkConfig {
        let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
        with_client_settings(config)
    }

    /// Builds an S3 client, using path-style addressing when the endpoint is overridden
    #[must_use]
    pub fn s3_client(&self, sdk_config: &SdkConfig) -> S3Client {
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);

        // Emulators serve buckets under the path, not as subdomains
        if let Some(endpoint_url) = &self.s3_endpoint_url {
            info!("Using S3 endpoint override: {}", endpoint_url);
            builder = builder.endpoint_url(endpoint_url).force_path_style(true);
        }

        S3Client::from_conf(builder.build())
    }

    /// Builds an SQS client
    #[must_use]
    pub fn sqs_client(&self, sdk_config: &SdkConfig) -> SqsClient {
        let mut builder = aws_sdk_sqs::config::Builder::from(sdk_config);

        if let Some(endpoint_url) = &self.sqs_endpoint_url {
            info!("Using SQS endpoint override: {}", endpoint_url);
            builder = builder.endpoint_url(endpoint_url);
        }

        SqsClient::from_conf(builder.build())
    }
}

/// Applies the retry and timeout settings shared by every client
fn with_client_settings(config: SdkConfig) -> SdkConfig {
    let retry_config = RetryConfig::standard()
        .with_max_attempts(MAX_RETRIES)
        .with_initial_backoff(INITIAL_BACKOFF);

    let timeout_config = TimeoutConfig::builder()
        .operation_timeout(OPERATION_TIMEOUT)
        .build();

    config
        .to_builder()
        .retry_config(retry_config)
        .timeout_config(timeout_config)
        .build()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use aws_config::SdkConfig;

    use super::{with_client_settings, AwsSettings};

    fn settings_from(vars: &[(&str, &str)]) -> AwsSettings {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        AwsSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_no_overrides_by_default() {
        assert_eq!(settings_from(&[]), AwsSettings::default());
    }

    #[test]
    fn test_reads_endpoint_overrides() {
        let settings = settings_from(&[
            ("S3_ENDPOINT_URL", "http://localhost:4566"),
            ("SQS_ENDPOINT_URL", " http://localhost:9324 "),
        ]);

        assert_eq!(
            settings.s3_endpoint_url.as_deref(),
            Some("http://localhost:4566")
        );
        assert_eq!(
            settings.sqs_endpoint_url.as_deref(),
            Some("http://localhost:9324")
        );
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let settings = settings_from(&[("S3_ENDPOINT_URL", ""), ("SQS_ENDPOINT_URL", "  ")]);
        assert_eq!(settings, AwsSettings::default());
    }

    #[test]
    fn test_client_settings_apply_retry_and_timeout() {
        let config = with_client_settings(SdkConfig::builder().build());

        let retry_config = config.retry_config().expect("Retry config should be set");
        assert_eq!(retry_config.max_attempts(), 3);
        assert_eq!(retry_config.initial_backoff(), Duration::from_millis(50));

        let timeout_config = config
            .timeout_config()
            .expect("Timeout config should be set");
        assert_eq!(
            timeout_config.operation_timeout(),
            Some(Duration::from_secs(30))
        );
    }
}
