//! Find record set activity

use crate::activity_types::{FindRecordSetInput, FindRecordSetOutput};
use crate::error::PromotionError;
use crate::names::activities;
use crate::providers::{DnsProvider, RecordSetCursor};

/// Activity name for tracing
pub const NAME: &str = activities::FIND_RECORD_SET;

/// Walks the zone listing page by page until a record with the requested name
/// turns up or the listing ends. Names compare without a trailing dot and
/// case-insensitively.
pub async fn activity(
    dns: &dyn DnsProvider,
    input: FindRecordSetInput,
) -> Result<FindRecordSetOutput, PromotionError> {
    let mut cursor: Option<RecordSetCursor> = None;
    let mut pages_read = 0;

    loop {
        let page = dns
            .list_record_sets(&input.hosted_zone_id, cursor.as_ref())
            .await
            .map_err(|source| PromotionError::DnsLookup {
                hosted_zone_id: input.hosted_zone_id.clone(),
                source,
            })?;
        pages_read += 1;

        if let Some(record) = page
            .records
            .into_iter()
            .find(|record| record.matches_name(&input.record_name))
        {
            tracing::debug!(activity = NAME, zone = %input.hosted_zone_id, pages_read, "Record set found");
            return Ok(FindRecordSetOutput {
                record: Some(record),
                pages_read,
            });
        }

        match page.next {
            Some(next) if cursor.as_ref() == Some(&next) => {
                return Err(PromotionError::DnsLookup {
                    hosted_zone_id: input.hosted_zone_id,
                    source: anyhow::anyhow!("listing did not advance past {}", next.name),
                });
            }
            Some(next) => cursor = Some(next),
            None => {
                tracing::debug!(activity = NAME, zone = %input.hosted_zone_id, pages_read, "Record set absent");
                return Ok(FindRecordSetOutput {
                    record: None,
                    pages_read,
                });
            }
        }
    }
}
