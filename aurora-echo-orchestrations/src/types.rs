//! Input and output types for Aurora Echo orchestrations

use aurora_echo_models::ManagedName;
use serde::{Deserialize, Serialize};

use crate::activity_types::ZoneCutover;

/// Default TTL of the upserted record, in seconds
pub const DEFAULT_TTL_SECONDS: i64 = 60;

// ============================================================================
// Promote Instance Orchestration
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoteInstanceInput {
    /// Managed name whose `modify` instance is promoted
    pub managed_name: ManagedName,
    /// Hosted zones to cut over, processed in this order
    pub hosted_zone_ids: Vec<String>,
    /// Record set pointed at the promoted endpoint
    pub record_name: String,
    /// Record TTL in seconds
    pub ttl: i64,
    /// Confirm each zone's change with the operator before applying it
    pub interactive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromoteInstanceOutput {
    /// Instance now tagged `promote`
    pub promoted_instance: String,
    /// Endpoint the record now points at
    pub endpoint: String,
    /// Previously promoted instance, now tagged `retire`
    pub retired_instance: Option<String>,
    /// Per-zone results, in processing order
    pub zones: Vec<ZoneCutover>,
}
