//! Route 53-backed DNS

use anyhow::{Context, Result};
use async_trait::async_trait;
use aurora_echo_models::{self as models, DnsRecord, RecordSetUpsert};
use aws_config::SdkConfig;
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet, RrType,
};
use aws_sdk_route53::Client as Route53Client;
use tracing::debug;

use super::{DnsProvider, RecordSetCursor, RecordSetPage};

#[derive(Debug, Clone)]
pub struct Route53Dns {
    client: Route53Client,
}

impl Route53Dns {
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Route53Client::new(sdk_config),
        }
    }
}

fn to_dns_record(record_set: &ResourceRecordSet) -> DnsRecord {
    DnsRecord {
        name: record_set.name().to_string(),
        record_type: record_set.r#type().as_str().to_string(),
        ttl: record_set.ttl(),
        values: record_set
            .resource_records()
            .iter()
            .map(|record| record.value().to_string())
            .collect(),
    }
}

fn to_sdk_record_set(set: &models::ResourceRecordSet) -> Result<ResourceRecordSet> {
    let mut records = Vec::with_capacity(set.resource_records.len());
    for record in &set.resource_records {
        records.push(ResourceRecord::builder().value(&record.value).build()?);
    }

    Ok(ResourceRecordSet::builder()
        .name(&set.name)
        .r#type(RrType::from(set.record_type.as_str()))
        .ttl(set.ttl)
        .set_resource_records(Some(records))
        .build()?)
}

fn to_change_batch(upsert: &RecordSetUpsert) -> Result<ChangeBatch> {
    let mut changes = Vec::with_capacity(upsert.change_batch.changes.len());

    for change in &upsert.change_batch.changes {
        let action = match change.action {
            models::ChangeAction::Upsert => ChangeAction::Upsert,
        };

        changes.push(
            Change::builder()
                .action(action)
                .resource_record_set(to_sdk_record_set(&change.resource_record_set)?)
                .build()?,
        );
    }

    Ok(ChangeBatch::builder()
        .comment(&upsert.change_batch.comment)
        .set_changes(Some(changes))
        .build()?)
}

#[async_trait]
impl DnsProvider for Route53Dns {
    async fn list_record_sets(
        &self,
        hosted_zone_id: &str,
        start: Option<&RecordSetCursor>,
    ) -> Result<RecordSetPage> {
        let output = self
            .client
            .list_resource_record_sets()
            .hosted_zone_id(hosted_zone_id)
            .set_start_record_name(start.map(|cursor| cursor.name.clone()))
            .set_start_record_type(start.map(|cursor| RrType::from(cursor.record_type.as_str())))
            .set_start_record_identifier(start.and_then(|cursor| cursor.identifier.clone()))
            .send()
            .await
            .with_context(|| format!("ListResourceRecordSets failed for {}", hosted_zone_id))?;

        let records = output
            .resource_record_sets()
            .iter()
            .map(to_dns_record)
            .collect();

        let next = if output.is_truncated() {
            output.next_record_name().map(|name| RecordSetCursor {
                name: name.to_string(),
                record_type: output
                    .next_record_type()
                    .map(|t| t.as_str().to_string())
                    .unwrap_or_default(),
                identifier: output.next_record_identifier().map(str::to_string),
            })
        } else {
            None
        };

        Ok(RecordSetPage { records, next })
    }

    async fn upsert_record_set(&self, upsert: &RecordSetUpsert) -> Result<()> {
        let batch = to_change_batch(upsert).context("Invalid change batch")?;

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(&upsert.hosted_zone_id)
            .change_batch(batch)
            .send()
            .await
            .with_context(|| {
                format!("ChangeResourceRecordSets failed for {}", upsert.hosted_zone_id)
            })?;

        debug!(hosted_zone_id = %upsert.hosted_zone_id, change_info = ?output.change_info(), "Submitted change batch");
        Ok(())
    }
}
