//! Error taxonomy for the promotion flow
//!
//! Every variant carries the managed name, stage, instance or zone it concerns so
//! the operator can tell from the final line alone what was being attempted.
//! Nothing here is retried: the recovery path for any failure is re-running the
//! whole command.

use aurora_echo_models::{LifecycleStage, ManagedName};

#[derive(Debug, thiserror::Error)]
pub enum PromotionError {
    #[error("no instance of {managed_name} found in stage {stage} with status 'available'")]
    NotFound {
        managed_name: ManagedName,
        stage: LifecycleStage,
    },

    #[error(
        "{managed_name} has {} instances in stage {stage} ({}), expected at most one",
        .identifiers.len(),
        .identifiers.join(", ")
    )]
    AmbiguousState {
        managed_name: ManagedName,
        stage: LifecycleStage,
        identifiers: Vec<String>,
    },

    #[error("failed to tag instance {instance_id} as {stage} for {managed_name}: {source:#}")]
    Tagging {
        managed_name: ManagedName,
        stage: LifecycleStage,
        instance_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to upsert {record_name} in hosted zone {hosted_zone_id}: {source:#}")]
    DnsUpsert {
        hosted_zone_id: String,
        record_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("no hosted zones given for {record_name}; nothing would route to the promoted instance")]
    NoHostedZones { record_name: String },

    #[error("operator declined the update of {record_name} in hosted zone {hosted_zone_id}")]
    UserAbort {
        hosted_zone_id: String,
        record_name: String,
    },

    #[error("failed to list instances tagged for {managed_name}: {source:#}")]
    InventoryLookup {
        managed_name: ManagedName,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to list record sets in hosted zone {hosted_zone_id}: {source:#}")]
    DnsLookup {
        hosted_zone_id: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to read confirmation for hosted zone {hosted_zone_id}: {source:#}")]
    Prompt {
        hosted_zone_id: String,
        #[source]
        source: anyhow::Error,
    },
}

impl PromotionError {
    /// Short name of the error kind, used when reporting to the operator
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFoundError",
            Self::AmbiguousState { .. } => "AmbiguousStateError",
            Self::Tagging { .. } => "TaggingError",
            Self::DnsUpsert { .. } => "DNSUpsertError",
            Self::UserAbort { .. } => "UserAbortError",
            Self::NoHostedZones { .. } => "NoHostedZonesError",
            Self::InventoryLookup { .. } => "InventoryLookupError",
            Self::DnsLookup { .. } => "DNSLookupError",
            Self::Prompt { .. } => "PromptError",
        }
    }

    /// Process exit code: 1 when nothing was promotable, 3 when the operator
    /// declined, 2 for everything else
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound { .. } => 1,
            Self::UserAbort { .. } => 3,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders() -> ManagedName {
        ManagedName::new("orders-db").unwrap()
    }

    #[test]
    fn test_exit_codes_distinguish_not_found_and_abort() {
        let not_found = PromotionError::NotFound {
            managed_name: orders(),
            stage: LifecycleStage::Modify,
        };
        let abort = PromotionError::UserAbort {
            hosted_zone_id: "Z1".to_string(),
            record_name: "orders.example.com".to_string(),
        };
        let upsert = PromotionError::DnsUpsert {
            hosted_zone_id: "Z2".to_string(),
            record_name: "orders.example.com".to_string(),
            source: anyhow::anyhow!("InvalidChangeBatch"),
        };

        assert_eq!(not_found.exit_code(), 1);
        assert_eq!(abort.exit_code(), 3);
        assert_eq!(upsert.exit_code(), 2);
        assert_eq!(upsert.kind(), "DNSUpsertError");
    }

    #[test]
    fn test_messages_carry_context() {
        let ambiguous = PromotionError::AmbiguousState {
            managed_name: orders(),
            stage: LifecycleStage::Promote,
            identifiers: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            ambiguous.to_string(),
            "orders-db has 2 instances in stage promote (a, b), expected at most one"
        );

        let tagging = PromotionError::Tagging {
            managed_name: orders(),
            stage: LifecycleStage::Retire,
            instance_id: "orders-db-candidate-1".to_string(),
            source: anyhow::anyhow!("AccessDenied"),
        };
        let message = tagging.to_string();
        assert!(message.contains("orders-db-candidate-1"));
        assert!(message.contains("retire"));
        assert!(message.ends_with("AccessDenied"));
    }
}
