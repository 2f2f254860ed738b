use anyhow::Result;
use aurora_echo_models::ManagedName;
use aurora_echo_orchestrations::aws_client::load_sdk_config;
use aurora_echo_orchestrations::context::EchoContext;
use aurora_echo_orchestrations::names::commands;
use aurora_echo_orchestrations::providers::{Collaborators, RdsInventory, Route53Dns};
use aurora_echo_orchestrations::{promote_instance_orchestration, PromoteInstanceInput};

use super::aws_settings;
use crate::config::Config;
use crate::prompt::StdinConfirmer;

pub struct PromoteArgs {
    pub aws_account_number: String,
    pub region: String,
    pub managed_name: ManagedName,
    pub hosted_zone_ids: Vec<String>,
    pub record_set: String,
    pub ttl: i64,
    pub interactive: bool,
}

pub async fn run_promote(config: &Config, args: PromoteArgs) -> Result<()> {
    tracing::info!(
        managed_name = %args.managed_name,
        region = %args.region,
        zones = ?args.hosted_zone_ids,
        "Running promote"
    );

    let sdk_config = load_sdk_config(&aws_settings(config, args.region)).await;
    let inventory = RdsInventory::new(&sdk_config, &args.aws_account_number)?;
    let dns = Route53Dns::new(&sdk_config);
    let confirmer = StdinConfirmer;

    let ctx = EchoContext::new(commands::PROMOTE);
    let collaborators = Collaborators {
        inventory: &inventory,
        dns: &dns,
        confirmer: &confirmer,
    };

    let input = PromoteInstanceInput {
        managed_name: args.managed_name,
        hosted_zone_ids: args.hosted_zone_ids,
        record_name: args.record_set,
        ttl: args.ttl,
        interactive: args.interactive,
    };

    let output = promote_instance_orchestration(&ctx, &collaborators, input).await?;
    tracing::info!(
        promoted = %output.promoted_instance,
        retired = ?output.retired_instance,
        endpoint = %output.endpoint,
        "Promotion complete"
    );

    Ok(())
}
