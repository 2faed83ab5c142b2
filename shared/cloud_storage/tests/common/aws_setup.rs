use aws_config::{Region, SdkConfig};
use aws_credential_types::{provider::SharedCredentialsProvider, Credentials};
use cloud_storage::AwsSettings;

const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";

/// Loads test environment variables and initializes tracing
pub fn setup_test_env() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .ok();
}

/// Endpoint settings for tests, falling back to `LocalStack` for unset endpoints
pub fn test_settings() -> AwsSettings {
    let settings = AwsSettings::from_env();

    AwsSettings {
        s3_endpoint_url: settings
            .s3_endpoint_url
            .or_else(|| Some(LOCALSTACK_ENDPOINT.to_string())),
        sqs_endpoint_url: settings
            .sqs_endpoint_url
            .or_else(|| Some(LOCALSTACK_ENDPOINT.to_string())),
    }
}

/// SDK configuration from `settings` with hardcoded `LocalStack` credentials
pub async fn test_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let credentials = Credentials::from_keys(
        "test", // AWS_ACCESS_KEY_ID
        "test", // AWS_SECRET_ACCESS_KEY
        None,   // no session token
    );

    settings
        .sdk_config()
        .await
        .to_builder()
        .region(Region::new("us-east-1"))
        .credentials_provider(SharedCredentialsProvider::new(credentials))
        .build()
}
