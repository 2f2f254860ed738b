pub mod promote;
pub mod status;

use aurora_echo_orchestrations::aws_client::AwsSettings;

use crate::config::Config;

fn aws_settings(config: &Config, region: String) -> AwsSettings {
    AwsSettings {
        region,
        profile: config.aws_profile.clone(),
        endpoint_url: config.endpoint_url.clone(),
    }
}
