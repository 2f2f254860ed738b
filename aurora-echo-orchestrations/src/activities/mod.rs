//! Atomic steps of the promotion flow. Each one performs at most one kind of
//! provider call and reports failures as [`crate::PromotionError`].

pub mod find_instance_in_stage;
pub mod list_managed_instances;
pub mod set_stage;
pub mod find_record_set;
pub mod cutover_dns;
