//! Input and output types for Aurora Echo activities

use aurora_echo_models::{DnsRecord, Instance, LifecycleStage, ManagedName};
use serde::{Deserialize, Serialize};

// ============================================================================
// Find Instance In Stage Activity
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FindInstanceInStageInput {
    pub managed_name: ManagedName,
    pub stage: LifecycleStage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FindInstanceInStageOutput {
    /// The single instance in the stage, if any
    pub instance: Option<Instance>,
}

// ============================================================================
// List Managed Instances Activity
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListManagedInstancesInput {
    pub managed_name: ManagedName,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ManagedInstance {
    pub identifier: String,
    /// `None` when the tag value does not decode
    pub stage: Option<LifecycleStage>,
    pub status: String,
    pub endpoint_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListManagedInstancesOutput {
    /// Ordered by stage (modify, promote, retire, undecodable), then identifier
    pub instances: Vec<ManagedInstance>,
}

// ============================================================================
// Set Stage Activity
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetStageInput {
    pub managed_name: ManagedName,
    pub instance_id: String,
    pub stage: LifecycleStage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetStageOutput {
    pub instance_id: String,
    /// Tag key written
    pub tag_key: String,
    /// Tag value written
    pub tag_value: String,
}

// ============================================================================
// Find Record Set Activity
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FindRecordSetInput {
    pub hosted_zone_id: String,
    pub record_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FindRecordSetOutput {
    pub record: Option<DnsRecord>,
    /// Listing pages fetched before the search ended
    pub pages_read: usize,
}

// ============================================================================
// Cutover DNS Activity
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CutoverDnsInput {
    /// Processed in order, one at a time
    pub hosted_zone_ids: Vec<String>,
    pub record_name: String,
    /// New CNAME target
    pub target: String,
    pub ttl: i64,
    pub interactive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ZoneCutover {
    pub hosted_zone_id: String,
    /// Target the record pointed at before the upsert
    pub previous_target: Option<String>,
    /// Whether no record with a target existed before the upsert
    pub inserted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CutoverDnsOutput {
    pub zones: Vec<ZoneCutover>,
}
