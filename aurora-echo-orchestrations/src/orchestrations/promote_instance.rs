//! Promote instance orchestration
//!
//! `modify` instance found and available → DNS cut over in every zone →
//! previous `promote` instance tagged `retire` → new instance tagged `promote`.
//! The first failure ends the run. Nothing is rolled back: once DNS has moved,
//! a failed tag write leaves the tags behind the DNS until the command is run
//! again, which every step tolerates.

use aurora_echo_models::{Instance, LifecycleStage};

use crate::activities::{cutover_dns, find_instance_in_stage, set_stage};
use crate::activity_types::{CutoverDnsInput, FindInstanceInStageInput, SetStageInput, ZoneCutover};
use crate::context::EchoContext;
use crate::error::PromotionError;
use crate::names::orchestrations;
use crate::providers::Collaborators;
use crate::types::{PromoteInstanceInput, PromoteInstanceOutput};

#[tracing::instrument(
    name = "promote_instance",
    skip_all,
    fields(orchestration = orchestrations::PROMOTE_INSTANCE, managed_name = %input.managed_name)
)]
pub async fn promote_instance_orchestration(
    ctx: &EchoContext,
    collaborators: &Collaborators<'_>,
    input: PromoteInstanceInput,
) -> Result<PromoteInstanceOutput, PromotionError> {
    ctx.trace_info(format!("Starting aurora-echo for {}", input.managed_name));

    // Tags must never move without DNS moving with them
    if input.hosted_zone_ids.is_empty() {
        ctx.trace_error(format!(
            "No hosted zones given for {}. Not proceeding.",
            input.record_name
        ));
        return Err(PromotionError::NoHostedZones {
            record_name: input.record_name,
        });
    }

    // Step 1: Locate the promotable instance
    let candidate = find_instance_in_stage::activity(
        ctx,
        collaborators.inventory,
        FindInstanceInStageInput {
            managed_name: input.managed_name.clone(),
            stage: LifecycleStage::Modify,
        },
    )
    .await?
    .instance;

    let Some((candidate, endpoint)) = promotable(candidate) else {
        ctx.trace_error(format!(
            "No instance found in stage {} with status 'available'. Not proceeding.",
            LifecycleStage::Modify
        ));
        return Err(PromotionError::NotFound {
            managed_name: input.managed_name,
            stage: LifecycleStage::Modify,
        });
    };

    ctx.trace_info(format!("Found promotable instance: {}", candidate.identifier));

    // Step 2: Point DNS at the candidate in every zone
    let cutover = cutover_dns::activity(
        ctx,
        collaborators.dns,
        collaborators.confirmer,
        CutoverDnsInput {
            hosted_zone_ids: input.hosted_zone_ids.clone(),
            record_name: input.record_name.clone(),
            target: endpoint.clone(),
            ttl: input.ttl,
            interactive: input.interactive,
        },
    )
    .await?;

    // Steps 3-4: Bring the tags in line with DNS
    match advance_stages(ctx, collaborators, &input, &candidate).await {
        Ok(retired_instance) => {
            ctx.trace_info("Done!");
            Ok(PromoteInstanceOutput {
                promoted_instance: candidate.identifier,
                endpoint,
                retired_instance,
                zones: cutover.zones,
            })
        }
        Err(err) => {
            report_tag_lag(ctx, &input, &endpoint, &cutover.zones);
            Err(err)
        }
    }
}

/// The candidate and its endpoint, if it can take traffic right now
fn promotable(candidate: Option<Instance>) -> Option<(Instance, String)> {
    let candidate = candidate.filter(Instance::is_available)?;
    let endpoint = candidate.endpoint_address.clone()?;
    Some((candidate, endpoint))
}

/// Retire the current `promote` instance (if any), then promote the candidate.
/// Returns the retired instance's identifier.
async fn advance_stages(
    ctx: &EchoContext,
    collaborators: &Collaborators<'_>,
    input: &PromoteInstanceInput,
    candidate: &Instance,
) -> Result<Option<String>, PromotionError> {
    let previous = find_instance_in_stage::activity(
        ctx,
        collaborators.inventory,
        FindInstanceInStageInput {
            managed_name: input.managed_name.clone(),
            stage: LifecycleStage::Promote,
        },
    )
    .await?
    .instance;

    let retired = match previous {
        Some(old) => {
            ctx.trace_info(format!("Retiring old instance: {}", old.identifier));
            set_stage::activity(
                ctx,
                collaborators.inventory,
                SetStageInput {
                    managed_name: input.managed_name.clone(),
                    instance_id: old.identifier.clone(),
                    stage: LifecycleStage::Retire,
                },
            )
            .await?;
            Some(old.identifier)
        }
        None => None,
    };

    ctx.trace_info(format!("Updating tag for promoted instance: {}", candidate.identifier));
    set_stage::activity(
        ctx,
        collaborators.inventory,
        SetStageInput {
            managed_name: input.managed_name.clone(),
            instance_id: candidate.identifier.clone(),
            stage: LifecycleStage::Promote,
        },
    )
    .await?;

    Ok(retired)
}

fn report_tag_lag(ctx: &EchoContext, input: &PromoteInstanceInput, endpoint: &str, zones: &[ZoneCutover]) {
    let zone_ids: Vec<&str> = zones.iter().map(|z| z.hosted_zone_id.as_str()).collect();
    ctx.trace_warn(format!(
        "{} already points at {} in hosted zone(s) {}, but the stage tags of {} were not fully updated. \
         Re-run promote for {} to finish.",
        input.record_name,
        endpoint,
        zone_ids.join(", "),
        input.managed_name,
        input.managed_name
    ));
}
