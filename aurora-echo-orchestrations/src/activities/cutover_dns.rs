//! Cutover DNS activity
//!
//! Zones are handled one at a time in the order given. Each zone is looked up,
//! reported, shown to the operator and upserted before the next one starts.
//! There is no cross-zone atomicity: a failure or a declined confirmation stops
//! the loop and leaves earlier zones pointing at the new target.

use aurora_echo_models::RecordSetUpsert;

use crate::activities::find_record_set;
use crate::activity_types::{CutoverDnsInput, CutoverDnsOutput, FindRecordSetInput, ZoneCutover};
use crate::context::EchoContext;
use crate::error::PromotionError;
use crate::names::activities;
use crate::providers::{Confirmer, DnsProvider};

/// Activity name for tracing
pub const NAME: &str = activities::CUTOVER_DNS;

pub async fn activity(
    ctx: &EchoContext,
    dns: &dyn DnsProvider,
    confirmer: &dyn Confirmer,
    input: CutoverDnsInput,
) -> Result<CutoverDnsOutput, PromotionError> {
    if input.hosted_zone_ids.is_empty() {
        return Err(PromotionError::NoHostedZones {
            record_name: input.record_name,
        });
    }

    let mut zones = Vec::with_capacity(input.hosted_zone_ids.len());

    for hosted_zone_id in &input.hosted_zone_ids {
        let zone = cutover_zone(ctx, dns, confirmer, &input, hosted_zone_id).await?;
        zones.push(zone);
    }

    Ok(CutoverDnsOutput { zones })
}

async fn cutover_zone(
    ctx: &EchoContext,
    dns: &dyn DnsProvider,
    confirmer: &dyn Confirmer,
    input: &CutoverDnsInput,
    hosted_zone_id: &str,
) -> Result<ZoneCutover, PromotionError> {
    let upsert_error = |source: anyhow::Error| PromotionError::DnsUpsert {
        hosted_zone_id: hosted_zone_id.to_string(),
        record_name: input.record_name.clone(),
        source,
    };

    // 1. Locate the current record
    ctx.trace_info(format!(
        "Looking up record set {} in hosted zone {}",
        input.record_name, hosted_zone_id
    ));
    let found = find_record_set::activity(
        dns,
        FindRecordSetInput {
            hosted_zone_id: hosted_zone_id.to_string(),
            record_name: input.record_name.clone(),
        },
    )
    .await?;

    // 2. Report what it points at today
    let previous_target = found
        .record
        .as_ref()
        .and_then(|record| record.current_target())
        .map(str::to_string);

    match (&found.record, &previous_target) {
        (Some(record), Some(target)) => ctx.trace_info(format!(
            "Found record set {} currently pointed at {}",
            record.name, target
        )),
        _ => ctx.trace_info(format!(
            "Inserting new record set {} in hosted zone {}",
            input.record_name, hosted_zone_id
        )),
    }

    // 3. Build and show the change
    let upsert = RecordSetUpsert::cname(hosted_zone_id, &input.record_name, &input.target, input.ttl);
    let payload = upsert
        .to_pretty_json()
        .map_err(|e| upsert_error(e.into()))?;

    ctx.trace_info("Parameters:");
    ctx.echo_block(&payload);

    // 4. Confirm; a decline cancels the whole cutover
    if input.interactive {
        let approved = confirmer
            .confirm(&ctx.prefixed("Ready to update DNS record with these settings?"))
            .await
            .map_err(|source| PromotionError::Prompt {
                hosted_zone_id: hosted_zone_id.to_string(),
                source,
            })?;

        if !approved {
            ctx.trace_warn(format!(
                "Aborted: DNS in hosted zone {} was not changed",
                hosted_zone_id
            ));
            return Err(PromotionError::UserAbort {
                hosted_zone_id: hosted_zone_id.to_string(),
                record_name: input.record_name.clone(),
            });
        }
    }

    // 5. Apply
    dns.upsert_record_set(&upsert).await.map_err(upsert_error)?;

    tracing::debug!(activity = NAME, zone = hosted_zone_id, target = %input.target, "Record set upserted");
    ctx.trace_info(format!("Success! DNS updated in hosted zone {}", hosted_zone_id));

    Ok(ZoneCutover {
        hosted_zone_id: hosted_zone_id.to_string(),
        inserted: previous_target.is_none(),
        previous_target,
    })
}
