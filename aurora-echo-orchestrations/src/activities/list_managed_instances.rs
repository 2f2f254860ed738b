//! List managed instances activity

use crate::activity_types::{ListManagedInstancesInput, ListManagedInstancesOutput, ManagedInstance};
use crate::context::EchoContext;
use crate::error::PromotionError;
use crate::names::activities;
use crate::providers::InventoryProvider;

/// Activity name for tracing
pub const NAME: &str = activities::LIST_MANAGED_INSTANCES;

pub async fn activity(
    ctx: &EchoContext,
    inventory: &dyn InventoryProvider,
    input: ListManagedInstancesInput,
) -> Result<ListManagedInstancesOutput, PromotionError> {
    ctx.trace_info(format!("Listing instances tagged for {}", input.managed_name));

    let tagged = inventory
        .list_instances_by_tag(&input.managed_name.tag_key())
        .await
        .map_err(|source| PromotionError::InventoryLookup {
            managed_name: input.managed_name.clone(),
            source,
        })?;

    let mut instances: Vec<ManagedInstance> = tagged
        .into_iter()
        .map(|instance| ManagedInstance {
            stage: instance.stage_for(&input.managed_name),
            identifier: instance.identifier,
            status: instance.status,
            endpoint_address: instance.endpoint_address,
        })
        .collect();

    // Undecodable stages sort last
    instances.sort_by(|a, b| {
        (a.stage.is_none(), a.stage, &a.identifier).cmp(&(b.stage.is_none(), b.stage, &b.identifier))
    });

    tracing::debug!(activity = NAME, count = instances.len(), "Listed managed instances");
    ctx.trace_info(format!("Found {} instance(s) for {}", instances.len(), input.managed_name));

    Ok(ListManagedInstancesOutput { instances })
}
