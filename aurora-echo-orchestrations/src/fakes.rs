//! In-memory collaborators for tests

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use aurora_echo_models::{DnsRecord, Instance, LifecycleStage, ManagedName, RecordSetUpsert, StageTag};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Mutex;

use crate::providers::{Confirmer, DnsProvider, InventoryProvider, RecordSetCursor, RecordSetPage};

pub(crate) fn managed(name: &str) -> ManagedName {
    ManagedName::new(name).unwrap()
}

// ============================================================================
// Inventory
// ============================================================================

#[derive(Default)]
pub(crate) struct FakeInventory {
    instances: Mutex<Vec<Instance>>,
    listing_fails: Mutex<bool>,
    failing_tag_writes: Mutex<HashSet<String>>,
    tag_writes: Mutex<Vec<(String, String, String)>>,
}

impl FakeInventory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add an instance, optionally already tagged for one managed name
    pub(crate) fn with_instance(
        self,
        identifier: &str,
        status: &str,
        endpoint: Option<&str>,
        stage: Option<(&str, LifecycleStage)>,
    ) -> Self {
        let mut instance = Instance {
            identifier: identifier.to_string(),
            status: status.to_string(),
            endpoint_address: endpoint.map(str::to_string),
            tags: BTreeMap::new(),
        };
        if let Some((name, stage)) = stage {
            let tag = StageTag::new(managed(name), stage);
            instance.tags.insert(tag.key(), tag.value());
        }
        self.instances.lock().unwrap().push(instance);
        self
    }

    pub(crate) fn with_raw_tag(self, identifier: &str, key: &str, value: &str) -> Self {
        for instance in self.instances.lock().unwrap().iter_mut() {
            if instance.identifier == identifier {
                instance.tags.insert(key.to_string(), value.to_string());
            }
        }
        self
    }

    pub(crate) fn fail_listing(&self) {
        *self.listing_fails.lock().unwrap() = true;
    }

    pub(crate) fn fail_tagging(&self, identifier: &str) {
        self.failing_tag_writes.lock().unwrap().insert(identifier.to_string());
    }

    pub(crate) fn stage_of(&self, identifier: &str, name: &str) -> Option<LifecycleStage> {
        self.instance(identifier)?.stage_for(&managed(name))
    }

    pub(crate) fn instance(&self, identifier: &str) -> Option<Instance> {
        self.instances
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.identifier == identifier)
            .cloned()
    }

    pub(crate) fn tag_writes(&self) -> Vec<(String, String, String)> {
        self.tag_writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl InventoryProvider for FakeInventory {
    async fn list_instances_by_tag(&self, tag_key: &str) -> Result<Vec<Instance>> {
        if *self.listing_fails.lock().unwrap() {
            bail!("Throttling: rate exceeded for DescribeDBInstances");
        }
        Ok(self
            .instances
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.tags.contains_key(tag_key))
            .cloned()
            .collect())
    }

    async fn set_instance_tag(&self, instance_id: &str, key: &str, value: &str) -> Result<()> {
        if self.failing_tag_writes.lock().unwrap().contains(instance_id) {
            bail!("AccessDenied: not authorized to tag {}", instance_id);
        }
        let mut instances = self.instances.lock().unwrap();
        let instance = instances
            .iter_mut()
            .find(|i| i.identifier == instance_id)
            .ok_or_else(|| anyhow!("DBInstanceNotFound: {}", instance_id))?;
        instance.tags.insert(key.to_string(), value.to_string());
        self.tag_writes.lock().unwrap().push((
            instance_id.to_string(),
            key.to_string(),
            value.to_string(),
        ));
        Ok(())
    }
}

// ============================================================================
// DNS
// ============================================================================

pub(crate) struct FakeDns {
    zones: Mutex<BTreeMap<String, Vec<DnsRecord>>>,
    page_size: usize,
    failing_zones: Mutex<HashSet<String>>,
    stalled_zones: Mutex<HashSet<String>>,
    upserts: Mutex<Vec<RecordSetUpsert>>,
    list_calls: Mutex<usize>,
}

impl FakeDns {
    pub(crate) fn new(page_size: usize) -> Self {
        Self {
            zones: Mutex::new(BTreeMap::new()),
            page_size,
            failing_zones: Mutex::new(HashSet::new()),
            stalled_zones: Mutex::new(HashSet::new()),
            upserts: Mutex::new(Vec::new()),
            list_calls: Mutex::new(0),
        }
    }

    pub(crate) fn with_zone(self, zone: &str) -> Self {
        self.zones.lock().unwrap().entry(zone.to_string()).or_default();
        self
    }

    pub(crate) fn with_record(self, zone: &str, name: &str, record_type: &str, values: &[&str]) -> Self {
        {
            let mut zones = self.zones.lock().unwrap();
            let records = zones.entry(zone.to_string()).or_default();
            records.push(DnsRecord {
                name: name.to_string(),
                record_type: record_type.to_string(),
                ttl: Some(300),
                values: values.iter().map(|v| v.to_string()).collect(),
            });
            records.sort_by(|a, b| (&a.name, &a.record_type).cmp(&(&b.name, &b.record_type)));
        }
        self
    }

    pub(crate) fn fail_upserts_in(&self, zone: &str) {
        self.failing_zones.lock().unwrap().insert(zone.to_string());
    }

    /// Listing this zone keeps returning its first record as the next cursor
    pub(crate) fn stall_listing_in(&self, zone: &str) {
        self.stalled_zones.lock().unwrap().insert(zone.to_string());
    }

    pub(crate) fn record(&self, zone: &str, name: &str) -> Option<DnsRecord> {
        self.zones
            .lock()
            .unwrap()
            .get(zone)?
            .iter()
            .find(|r| r.matches_name(name))
            .cloned()
    }

    pub(crate) fn upserts(&self) -> Vec<RecordSetUpsert> {
        self.upserts.lock().unwrap().clone()
    }

    pub(crate) fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

#[async_trait]
impl DnsProvider for FakeDns {
    async fn list_record_sets(
        &self,
        hosted_zone_id: &str,
        start: Option<&RecordSetCursor>,
    ) -> Result<RecordSetPage> {
        *self.list_calls.lock().unwrap() += 1;

        let zones = self.zones.lock().unwrap();
        let records = zones
            .get(hosted_zone_id)
            .ok_or_else(|| anyhow!("NoSuchHostedZone: {}", hosted_zone_id))?;

        if self.stalled_zones.lock().unwrap().contains(hosted_zone_id) {
            return Ok(RecordSetPage {
                records: Vec::new(),
                next: records.first().map(|r| RecordSetCursor {
                    name: r.name.clone(),
                    record_type: r.record_type.clone(),
                    identifier: None,
                }),
            });
        }

        let offset = match start {
            None => 0,
            Some(cursor) => records
                .iter()
                .position(|r| r.name == cursor.name && r.record_type == cursor.record_type)
                .ok_or_else(|| anyhow!("InvalidInput: unknown start record {}", cursor.name))?,
        };

        let end = (offset + self.page_size).min(records.len());
        let next = records.get(end).map(|r| RecordSetCursor {
            name: r.name.clone(),
            record_type: r.record_type.clone(),
            identifier: None,
        });

        Ok(RecordSetPage {
            records: records[offset..end].to_vec(),
            next,
        })
    }

    async fn upsert_record_set(&self, upsert: &RecordSetUpsert) -> Result<()> {
        if self.failing_zones.lock().unwrap().contains(&upsert.hosted_zone_id) {
            bail!("InvalidChangeBatch: rejected by {}", upsert.hosted_zone_id);
        }

        let mut zones = self.zones.lock().unwrap();
        let records = zones
            .get_mut(&upsert.hosted_zone_id)
            .ok_or_else(|| anyhow!("NoSuchHostedZone: {}", upsert.hosted_zone_id))?;

        for change in &upsert.change_batch.changes {
            let set = &change.resource_record_set;
            let values = set.resource_records.iter().map(|r| r.value.clone()).collect();
            match records
                .iter_mut()
                .find(|r| r.matches_name(&set.name) && r.record_type == set.record_type)
            {
                Some(existing) => {
                    existing.ttl = Some(set.ttl);
                    existing.values = values;
                }
                None => records.push(DnsRecord {
                    name: set.name.clone(),
                    record_type: set.record_type.clone(),
                    ttl: Some(set.ttl),
                    values,
                }),
            }
        }
        records.sort_by(|a, b| (&a.name, &a.record_type).cmp(&(&b.name, &b.record_type)));

        self.upserts.lock().unwrap().push(upsert.clone());
        Ok(())
    }
}

// ============================================================================
// Confirmation
// ============================================================================

/// Answers prompts from a script; an unscripted prompt is an error
#[derive(Default)]
pub(crate) struct ScriptedConfirmer {
    answers: Mutex<VecDeque<bool>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedConfirmer {
    pub(crate) fn answering(answers: &[bool]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for ScriptedConfirmer {
    async fn confirm(&self, message: &str) -> Result<bool> {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("unexpected prompt: {}", message))
    }
}
