//! RDS-backed inventory

use anyhow::{Context, Result};
use async_trait::async_trait;
use aurora_echo_models::Instance;
use aws_config::SdkConfig;
use aws_sdk_rds::types::{DbInstance, Tag};
use aws_sdk_rds::Client as RdsClient;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::debug;

use super::InventoryProvider;

pub struct RdsInventory {
    client: RdsClient,
    region: String,
    account_number: String,
    /// ARNs reported by `DescribeDBInstances`, keyed by identifier
    known_arns: Mutex<HashMap<String, String>>,
}

impl std::fmt::Debug for RdsInventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdsInventory")
            .field("region", &self.region)
            .field("account_number", &self.account_number)
            .finish_non_exhaustive()
    }
}

impl RdsInventory {
    /// The SDK config must carry a region; tags are written by ARN, which is
    /// built from that region and `account_number`.
    pub fn new(sdk_config: &SdkConfig, account_number: &str) -> Result<Self> {
        let region = sdk_config
            .region()
            .map(|r| r.as_ref().to_string())
            .context("AWS region must be configured for RDS")?;

        Ok(Self {
            client: RdsClient::new(sdk_config),
            region,
            account_number: account_number.to_string(),
            known_arns: Mutex::new(HashMap::new()),
        })
    }

    fn remember_arn(&self, db: &DbInstance) {
        if let (Some(id), Some(arn), Ok(mut known)) =
            (db.db_instance_identifier(), db.db_instance_arn(), self.known_arns.lock())
        {
            known.insert(id.to_string(), arn.to_string());
        }
    }

    fn resource_arn(&self, instance_id: &str) -> String {
        let known = self
            .known_arns
            .lock()
            .ok()
            .and_then(|known| known.get(instance_id).cloned());
        tagging_arn(known, &self.region, &self.account_number, instance_id)
    }
}

/// The ARN reported by RDS when there is one (it carries the right partition),
/// otherwise the one built for the `aws` partition
fn tagging_arn(known: Option<String>, region: &str, account_number: &str, instance_id: &str) -> String {
    known.unwrap_or_else(|| instance_arn(region, account_number, instance_id))
}

/// `arn:aws:rds:<region>:<account>:db:<identifier>`
pub fn instance_arn(region: &str, account_number: &str, instance_id: &str) -> String {
    format!("arn:aws:rds:{}:{}:db:{}", region, account_number, instance_id)
}

fn to_instance(db: &DbInstance) -> Option<Instance> {
    let identifier = db.db_instance_identifier()?.to_string();

    Some(Instance {
        identifier,
        status: db.db_instance_status().unwrap_or("unknown").to_string(),
        endpoint_address: db
            .endpoint()
            .and_then(|endpoint| endpoint.address())
            .map(str::to_string),
        tags: db
            .tag_list()
            .iter()
            .filter_map(|tag| {
                Some((tag.key()?.to_string(), tag.value().unwrap_or_default().to_string()))
            })
            .collect(),
    })
}

#[async_trait]
impl InventoryProvider for RdsInventory {
    async fn list_instances_by_tag(&self, tag_key: &str) -> Result<Vec<Instance>> {
        let mut pages = self.client.describe_db_instances().into_paginator().send();
        let mut found = Vec::new();

        while let Some(page) = pages.next().await {
            let page = page.context("DescribeDBInstances failed")?;
            for db in page.db_instances() {
                self.remember_arn(db);
                match to_instance(db) {
                    Some(instance) if instance.tags.contains_key(tag_key) => found.push(instance),
                    _ => {}
                }
            }
        }

        debug!(tag_key, count = found.len(), region = %self.region, "Listed RDS instances by tag");
        Ok(found)
    }

    async fn set_instance_tag(&self, instance_id: &str, key: &str, value: &str) -> Result<()> {
        let arn = self.resource_arn(instance_id);
        let tag = Tag::builder().key(key).value(value).build();

        self.client
            .add_tags_to_resource()
            .resource_name(&arn)
            .tags(tag)
            .send()
            .await
            .with_context(|| format!("AddTagsToResource failed for {}", arn))?;

        debug!(%arn, key, value, "Tagged RDS instance");
        Ok(())
    }
}
