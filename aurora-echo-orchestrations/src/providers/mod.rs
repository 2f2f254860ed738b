//! Seams to the external collaborators
//!
//! The promotion flow only ever talks to an inventory provider (instances and
//! their tags), a DNS provider (record sets) and, when interactive, the
//! operator. Swapping the backing store means implementing these traits.

use anyhow::Result;
use async_trait::async_trait;
use aurora_echo_models::{DnsRecord, Instance, RecordSetUpsert};

mod rds;
mod route53;

pub use rds::{instance_arn, RdsInventory};
pub use route53::Route53Dns;

#[async_trait]
pub trait InventoryProvider: Send + Sync {
    /// Every instance carrying `tag_key`, whatever its value
    async fn list_instances_by_tag(&self, tag_key: &str) -> Result<Vec<Instance>>;

    /// Set (or overwrite) one tag on one instance
    async fn set_instance_tag(&self, instance_id: &str, key: &str, value: &str) -> Result<()>;
}

/// Where the next page of a record set listing starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSetCursor {
    pub name: String,
    pub record_type: String,
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSetPage {
    pub records: Vec<DnsRecord>,
    /// `None` on the last page
    pub next: Option<RecordSetCursor>,
}

#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// One page of the zone's record sets, starting at `start` (first page when `None`)
    async fn list_record_sets(
        &self,
        hosted_zone_id: &str,
        start: Option<&RecordSetCursor>,
    ) -> Result<RecordSetPage>;

    async fn upsert_record_set(&self, upsert: &RecordSetUpsert) -> Result<()>;
}

#[async_trait]
pub trait Confirmer: Send + Sync {
    /// Ask the operator; `false` aborts the whole command
    async fn confirm(&self, message: &str) -> Result<bool>;
}

/// The collaborators one promotion runs against
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub inventory: &'a dyn InventoryProvider,
    pub dns: &'a dyn DnsProvider,
    pub confirmer: &'a dyn Confirmer,
}
