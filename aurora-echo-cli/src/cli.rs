use aurora_echo_models::ManagedName;
use aurora_echo_orchestrations::DEFAULT_TTL_SECONDS;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Aurora Echo - tag-driven promotion of Aurora clusters behind a stable DNS name
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Point DNS at the instance in stage `modify`, retire the promoted one, promote the new one
    Promote {
        /// AWS account number owning the instances (used to build their ARNs)
        #[arg(short = 'a', long, value_parser = non_blank)]
        aws_account_number: String,

        /// AWS region of the instances (e.g., "us-east-1")
        #[arg(short, long, value_parser = non_blank)]
        region: String,

        /// Managed name the instances are tagged with
        #[arg(short = 'n', long)]
        managed_name: ManagedName,

        /// Route 53 hosted zone to update (repeat for several zones)
        #[arg(short = 'z', long = "hosted-zone-id", required = true, value_parser = non_blank)]
        hosted_zone_ids: Vec<String>,

        /// Record set to point at the promoted instance (e.g., "orders.example.com")
        #[arg(short = 's', long = "record-set", value_parser = non_blank)]
        record_set: String,

        /// TTL of the record set, in seconds
        #[arg(long, default_value_t = DEFAULT_TTL_SECONDS, value_parser = clap::value_parser!(i64).range(0..))]
        ttl: i64,

        /// Ask for confirmation before changing each hosted zone
        #[arg(short, long, action = ArgAction::Set, default_value_t = true)]
        interactive: bool,
    },

    /// Show every instance tagged for a managed name and its stage
    Status {
        /// AWS account number owning the instances
        #[arg(short = 'a', long, value_parser = non_blank)]
        aws_account_number: String,

        /// AWS region of the instances
        #[arg(short, long, value_parser = non_blank)]
        region: String,

        /// Managed name the instances are tagged with
        #[arg(short = 'n', long)]
        managed_name: ManagedName,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

fn non_blank(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("value must not be empty".to_string());
    }
    Ok(value.to_string())
}
