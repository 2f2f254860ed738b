use anyhow::Result;
use aurora_echo_models::ManagedName;
use aurora_echo_orchestrations::activities::list_managed_instances;
use aurora_echo_orchestrations::aws_client::load_sdk_config;
use aurora_echo_orchestrations::context::EchoContext;
use aurora_echo_orchestrations::names::commands;
use aurora_echo_orchestrations::providers::RdsInventory;
use aurora_echo_orchestrations::{ListManagedInstancesInput, ManagedInstance};

use super::aws_settings;
use crate::cli::OutputFormat;
use crate::config::Config;

pub async fn run_status(
    config: &Config,
    aws_account_number: String,
    region: String,
    managed_name: ManagedName,
    output: OutputFormat,
) -> Result<()> {
    let sdk_config = load_sdk_config(&aws_settings(config, region)).await;
    let inventory = RdsInventory::new(&sdk_config, &aws_account_number)?;

    let ctx = EchoContext::new(commands::STATUS);
    let listing =
        list_managed_instances::activity(&ctx, &inventory, ListManagedInstancesInput { managed_name }).await?;

    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listing.instances)?),
        OutputFormat::Table => print!("{}", render_table(&listing.instances)),
    }

    Ok(())
}

fn render_table(instances: &[ManagedInstance]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<32} {:<10} {:<14} {}\n", "IDENTIFIER", "STAGE", "STATUS", "ENDPOINT"));
    out.push_str(&format!("{}\n", "-".repeat(90)));

    for instance in instances {
        let stage = instance.stage.map_or("?", |stage| stage.as_str());
        out.push_str(&format!(
            "{:<32} {:<10} {:<14} {}\n",
            instance.identifier,
            stage,
            instance.status,
            instance.endpoint_address.as_deref().unwrap_or("-")
        ));
    }

    out
}
