//! Name constants for Aurora Echo commands, orchestrations and activities
//!
//! Activity and orchestration names follow `{crate}::{type}::{name}` and are
//! attached to every tracing event a step emits.

/// Operator-facing command names, used in the echo prefix
pub mod commands {
    pub const PROMOTE: &str = "promote";
    pub const STATUS: &str = "status";
}

/// Orchestration names
pub mod orchestrations {
    /// Promote the `modify` instance of a managed name
    ///
    /// **Input:** [`crate::types::PromoteInstanceInput`]
    /// **Output:** [`crate::types::PromoteInstanceOutput`]
    /// **Activities used:**
    /// - [`super::activities::FIND_INSTANCE_IN_STAGE`]
    /// - [`super::activities::CUTOVER_DNS`]
    /// - [`super::activities::SET_STAGE`]
    /// **Retry:** re-run the whole command; every step is idempotent
    pub const PROMOTE_INSTANCE: &str = "aurora-echo::orchestration::promote-instance";
}

/// Activity names
pub mod activities {
    /// Find the single instance of a managed name in a lifecycle stage
    ///
    /// **Input:** [`crate::activity_types::FindInstanceInStageInput`]
    /// **Output:** [`crate::activity_types::FindInstanceInStageOutput`]
    /// **Fails:** when more than one instance holds the stage
    pub const FIND_INSTANCE_IN_STAGE: &str = "aurora-echo::activity::find-instance-in-stage";

    /// List every instance carrying a managed name's tag
    ///
    /// **Input:** [`crate::activity_types::ListManagedInstancesInput`]
    /// **Output:** [`crate::activity_types::ListManagedInstancesOutput`]
    pub const LIST_MANAGED_INSTANCES: &str = "aurora-echo::activity::list-managed-instances";

    /// Overwrite a managed name's stage tag on one instance
    ///
    /// **Input:** [`crate::activity_types::SetStageInput`]
    /// **Output:** [`crate::activity_types::SetStageOutput`]
    /// **Idempotent:** Yes
    pub const SET_STAGE: &str = "aurora-echo::activity::set-stage";

    /// Find a record set by name, walking every page of the zone listing
    ///
    /// **Input:** [`crate::activity_types::FindRecordSetInput`]
    /// **Output:** [`crate::activity_types::FindRecordSetOutput`]
    pub const FIND_RECORD_SET: &str = "aurora-echo::activity::find-record-set";

    /// Upsert the CNAME in each hosted zone, in order, confirming first when interactive
    ///
    /// **Input:** [`crate::activity_types::CutoverDnsInput`]
    /// **Output:** [`crate::activity_types::CutoverDnsOutput`]
    /// **Idempotent:** Yes (upsert)
    pub const CUTOVER_DNS: &str = "aurora-echo::activity::cutover-dns";
}
