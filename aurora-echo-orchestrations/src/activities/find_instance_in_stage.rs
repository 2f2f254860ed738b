//! Find instance in stage activity

use aurora_echo_models::Instance;

use crate::activity_types::{FindInstanceInStageInput, FindInstanceInStageOutput};
use crate::context::EchoContext;
use crate::error::PromotionError;
use crate::names::activities;
use crate::providers::InventoryProvider;

/// Activity name for tracing
pub const NAME: &str = activities::FIND_INSTANCE_IN_STAGE;

/// Zero matches is not an error here; the caller decides whether it is fatal.
/// More than one match means the lifecycle invariant is already broken, so the
/// lookup refuses to pick one.
pub async fn activity(
    ctx: &EchoContext,
    inventory: &dyn InventoryProvider,
    input: FindInstanceInStageInput,
) -> Result<FindInstanceInStageOutput, PromotionError> {
    ctx.trace_info(format!(
        "Looking for {} instance in stage {}",
        input.managed_name, input.stage
    ));

    let tagged = inventory
        .list_instances_by_tag(&input.managed_name.tag_key())
        .await
        .map_err(|source| PromotionError::InventoryLookup {
            managed_name: input.managed_name.clone(),
            source,
        })?;

    let mut matches: Vec<Instance> = tagged
        .into_iter()
        .filter(|instance| instance.stage_for(&input.managed_name) == Some(input.stage))
        .collect();

    tracing::debug!(
        activity = NAME,
        managed_name = %input.managed_name,
        stage = %input.stage,
        matches = matches.len(),
        "Instance lookup complete"
    );

    if matches.len() > 1 {
        let identifiers = matches.into_iter().map(|i| i.identifier).collect();
        return Err(PromotionError::AmbiguousState {
            managed_name: input.managed_name,
            stage: input.stage,
            identifiers,
        });
    }

    let instance = matches.pop();
    match &instance {
        Some(found) => ctx.trace_info(format!(
            "Instance {} is in stage {} (status: {})",
            found.identifier, input.stage, found.status
        )),
        None => ctx.trace_info(format!(
            "No {} instance in stage {}",
            input.managed_name, input.stage
        )),
    }

    Ok(FindInstanceInStageOutput { instance })
}
