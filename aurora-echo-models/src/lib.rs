//! Data model shared by the Aurora Echo orchestrations and CLI
//!
//! Instances are tracked purely through tags on the inventory provider, so the
//! types here are plain values: nothing in this crate performs I/O.

use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Prefix of every stage tag key. The managed name follows it.
pub const TAG_KEY_PREFIX: &str = "aurora-echo::";

/// Separator between the managed name and the stage inside a tag value
pub const TAG_VALUE_SEPARATOR: &str = "::";

/// The only instance status the promotion flow cares about
pub const AVAILABLE_STATUS: &str = "available";

/// DNS record type written by a cutover
pub const CNAME_RECORD_TYPE: &str = "CNAME";

/// Comment attached to every change batch
pub const CHANGE_BATCH_COMMENT: &str = "Modified by Aurora Echo";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("managed name must not be empty")]
    EmptyManagedName,

    #[error("managed name '{0}' must not contain '::' or whitespace")]
    InvalidManagedName(String),

    #[error("unknown lifecycle stage '{0}' (expected modify, promote or retire)")]
    UnknownStage(String),
}

// ============================================================================
// Managed name
// ============================================================================

/// Logical identifier for one database deployment spanning several physical
/// instance generations
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManagedName(String);

impl ManagedName {
    pub fn new(name: impl Into<String>) -> Result<Self, ModelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ModelError::EmptyManagedName);
        }
        if name.contains(TAG_VALUE_SEPARATOR) || name.chars().any(char::is_whitespace) {
            return Err(ModelError::InvalidManagedName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tag key holding this managed name's stage on an instance
    pub fn tag_key(&self) -> String {
        format!("{}{}", TAG_KEY_PREFIX, self.0)
    }
}

impl fmt::Display for ManagedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ManagedName {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

// ============================================================================
// Lifecycle stage
// ============================================================================

/// Where a physical instance sits in the promotion pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStage {
    /// Candidate being prepared
    Modify,
    /// Currently serving traffic
    Promote,
    /// Superseded by a later promotion
    Retire,
}

impl LifecycleStage {
    pub const ALL: [LifecycleStage; 3] = [Self::Modify, Self::Promote, Self::Retire];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Modify => "modify",
            Self::Promote => "promote",
            Self::Retire => "retire",
        }
    }
}

impl fmt::Display for LifecycleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleStage {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| ModelError::UnknownStage(s.to_string()))
    }
}

// ============================================================================
// Stage tag
// ============================================================================

/// A managed name's stage as stored in an instance tag.
///
/// Key: `aurora-echo::<managed-name>`, value: `<managed-name>::<stage>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTag {
    pub managed_name: ManagedName,
    pub stage: LifecycleStage,
}

impl StageTag {
    pub fn new(managed_name: ManagedName, stage: LifecycleStage) -> Self {
        Self { managed_name, stage }
    }

    pub fn key(&self) -> String {
        self.managed_name.tag_key()
    }

    pub fn value(&self) -> String {
        format!("{}{}{}", self.managed_name, TAG_VALUE_SEPARATOR, self.stage)
    }

    /// Decode a raw tag. Returns `None` for foreign keys, malformed values, or
    /// values whose embedded name disagrees with the key.
    pub fn decode(key: &str, value: &str) -> Option<Self> {
        let key_name = key.strip_prefix(TAG_KEY_PREFIX)?;
        let (value_name, stage) = value.rsplit_once(TAG_VALUE_SEPARATOR)?;
        if key_name != value_name {
            return None;
        }
        let managed_name = ManagedName::new(value_name).ok()?;
        let stage = stage.parse().ok()?;
        Some(Self { managed_name, stage })
    }
}

// ============================================================================
// Instance
// ============================================================================

/// A physical database instance as reported by the inventory provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub identifier: String,
    pub status: String,
    /// Absent while the provider is still creating the instance
    pub endpoint_address: Option<String>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl Instance {
    pub fn is_available(&self) -> bool {
        self.status == AVAILABLE_STATUS
    }

    /// Decoded stage of this instance for `managed_name`, if tagged
    pub fn stage_for(&self, managed_name: &ManagedName) -> Option<LifecycleStage> {
        let key = managed_name.tag_key();
        let value = self.tags.get(&key)?;
        StageTag::decode(&key, value).map(|tag| tag.stage)
    }
}

// ============================================================================
// DNS records
// ============================================================================

/// A record set as listed by the DNS provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub name: String,
    pub record_type: String,
    pub ttl: Option<i64>,
    #[serde(default)]
    pub values: Vec<String>,
}

impl DnsRecord {
    /// First target value, if the record has any
    pub fn current_target(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    pub fn matches_name(&self, record_name: &str) -> bool {
        normalize_record_name(&self.name) == normalize_record_name(record_name)
    }
}

/// Compare form of a record name: one trailing dot dropped, ASCII lowercase.
/// Route 53 lists names fully qualified while operators usually omit the dot.
pub fn normalize_record_name(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}

/// A full upsert request, shaped like the Route 53 `ChangeResourceRecordSets`
/// call so the operator sees exactly what will be sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordSetUpsert {
    pub hosted_zone_id: String,
    pub change_batch: ChangeBatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChangeBatch {
    pub comment: String,
    pub changes: Vec<Change>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Change {
    pub action: ChangeAction,
    pub resource_record_set: ResourceRecordSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeAction {
    #[serde(rename = "UPSERT")]
    Upsert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecordSet {
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
    #[serde(rename = "TTL")]
    pub ttl: i64,
    pub resource_records: Vec<ResourceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRecord {
    pub value: String,
}

impl RecordSetUpsert {
    /// Single-change CNAME upsert pointing `record_name` at `target`
    pub fn cname(hosted_zone_id: &str, record_name: &str, target: &str, ttl: i64) -> Self {
        Self {
            hosted_zone_id: hosted_zone_id.to_string(),
            change_batch: ChangeBatch {
                comment: CHANGE_BATCH_COMMENT.to_string(),
                changes: vec![Change {
                    action: ChangeAction::Upsert,
                    resource_record_set: ResourceRecordSet {
                        name: record_name.to_string(),
                        record_type: CNAME_RECORD_TYPE.to_string(),
                        ttl,
                        resource_records: vec![ResourceRecord {
                            value: target.to_string(),
                        }],
                    },
                }],
            },
        }
    }

    /// Pretty JSON with keys in sorted order, indented by four spaces
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        let value = serde_json::to_value(self)?;
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        value.serialize(&mut serializer)?;
        String::from_utf8(out).map_err(serde_json::Error::custom)
    }
}
