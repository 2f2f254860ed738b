//! Aurora Echo Orchestrations - stage transitions and DNS cutover for managed databases
//!
//! This crate holds the promotion flow (orchestrations), the atomic steps it is
//! composed of (activities), and the provider seams those steps talk through.
//! Instances are located and advanced through lifecycle stages purely via tags
//! on the inventory provider; DNS is moved with idempotent upserts.
//!
//! # Usage
//!
//! ```rust,no_run
//! use aurora_echo_models::ManagedName;
//! use aurora_echo_orchestrations::aws_client::{load_sdk_config, AwsSettings};
//! use aurora_echo_orchestrations::context::EchoContext;
//! use aurora_echo_orchestrations::names::commands;
//! use aurora_echo_orchestrations::providers::{Collaborators, Confirmer, RdsInventory, Route53Dns};
//! use aurora_echo_orchestrations::{promote_instance_orchestration, PromoteInstanceInput};
//!
//! # async fn example(confirmer: &dyn Confirmer) -> anyhow::Result<()> {
//! let settings = AwsSettings::new("us-east-1");
//! let sdk_config = load_sdk_config(&settings).await;
//! let inventory = RdsInventory::new(&sdk_config, "123456789012")?;
//! let dns = Route53Dns::new(&sdk_config);
//!
//! let ctx = EchoContext::new(commands::PROMOTE);
//! let collaborators = Collaborators { inventory: &inventory, dns: &dns, confirmer };
//! let input = PromoteInstanceInput {
//!     managed_name: ManagedName::new("orders-db")?,
//!     hosted_zone_ids: vec!["Z1".to_string()],
//!     record_name: "orders.example.com".to_string(),
//!     ttl: 60,
//!     interactive: false,
//! };
//! promote_instance_orchestration(&ctx, &collaborators, input).await?;
//! # Ok(())
//! # }
//! ```

pub mod names;
pub mod types;
pub mod error;
pub mod context;

pub mod activity_types;
pub mod aws_client;
pub mod providers;

pub mod activities;
pub mod orchestrations;

#[cfg(test)]
pub(crate) mod fakes;

// Re-export key types for convenience
pub use types::*;
pub use activity_types::*;
pub use error::PromotionError;
pub use orchestrations::promote_instance::promote_instance_orchestration;
