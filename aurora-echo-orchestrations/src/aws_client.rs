//! Shared AWS SDK configuration

use aws_config::{BehaviorVersion, Region, SdkConfig};
use tracing::info;

/// Where and as whom the AWS clients connect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsSettings {
    pub region: String,
    /// Named profile from the shared AWS config files
    pub profile: Option<String>,
    /// Endpoint override for every service (LocalStack and similar)
    pub endpoint_url: Option<String>,
}

impl AwsSettings {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            profile: None,
            endpoint_url: None,
        }
    }
}

/// Load an SDK config through the default credential chain
pub async fn load_sdk_config(settings: &AwsSettings) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(settings.region.clone()));

    if let Some(profile) = &settings.profile {
        info!("Using AWS profile: {}", profile);
        loader = loader.profile_name(profile);
    }
    if let Some(endpoint_url) = &settings.endpoint_url {
        info!("Using AWS endpoint override: {}", endpoint_url);
        loader = loader.endpoint_url(endpoint_url);
    }

    loader.load().await
}
