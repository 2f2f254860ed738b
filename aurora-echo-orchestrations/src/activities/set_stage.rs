//! Set stage activity

use aurora_echo_models::StageTag;

use crate::activity_types::{SetStageInput, SetStageOutput};
use crate::context::EchoContext;
use crate::error::PromotionError;
use crate::names::activities;
use crate::providers::InventoryProvider;

/// Activity name for tracing
pub const NAME: &str = activities::SET_STAGE;

/// Overwrites the managed name's stage tag. Tags of other managed names on the
/// same instance are left alone; the previous value is not read. Failures are
/// returned, never retried.
pub async fn activity(
    ctx: &EchoContext,
    inventory: &dyn InventoryProvider,
    input: SetStageInput,
) -> Result<SetStageOutput, PromotionError> {
    let tag = StageTag::new(input.managed_name.clone(), input.stage);
    let (tag_key, tag_value) = (tag.key(), tag.value());

    ctx.trace_info(format!(
        "Setting tag {}={} on instance {}",
        tag_key, tag_value, input.instance_id
    ));

    inventory
        .set_instance_tag(&input.instance_id, &tag_key, &tag_value)
        .await
        .map_err(|source| PromotionError::Tagging {
            managed_name: input.managed_name,
            stage: input.stage,
            instance_id: input.instance_id.clone(),
            source,
        })?;

    tracing::debug!(activity = NAME, instance_id = %input.instance_id, %tag_value, "Stage tag written");
    ctx.trace_info(format!("Instance {} is now in stage {}", input.instance_id, input.stage));

    Ok(SetStageOutput {
        instance_id: input.instance_id,
        tag_key,
        tag_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{managed, FakeInventory};
    use aurora_echo_models::LifecycleStage;

    fn input(instance_id: &str, name: &str, stage: LifecycleStage) -> SetStageInput {
        SetStageInput {
            managed_name: managed(name),
            instance_id: instance_id.to_string(),
            stage,
        }
    }

    #[tokio::test]
    async fn test_second_stage_overwrites_first() {
        let inventory = FakeInventory::new().with_instance("orders-1", "available", Some("one.internal"), None);
        let ctx = EchoContext::capturing("promote");

        activity(&ctx, &inventory, input("orders-1", "orders-db", LifecycleStage::Modify)).await.unwrap();
        let output = activity(&ctx, &inventory, input("orders-1", "orders-db", LifecycleStage::Promote))
            .await
            .unwrap();

        assert_eq!(output.tag_key, "aurora-echo::orders-db");
        assert_eq!(output.tag_value, "orders-db::promote");

        let instance = inventory.instance("orders-1").unwrap();
        let stage_tags: Vec<_> = instance
            .tags
            .iter()
            .filter(|(key, _)| key.starts_with("aurora-echo::orders-db"))
            .collect();
        assert_eq!(stage_tags.len(), 1);
        assert_eq!(inventory.stage_of("orders-1", "orders-db"), Some(LifecycleStage::Promote));
    }

    #[tokio::test]
    async fn test_other_managed_names_untouched() {
        let inventory = FakeInventory::new().with_instance(
            "shared-1",
            "available",
            Some("shared.internal"),
            Some(("billing-db", LifecycleStage::Promote)),
        );
        let ctx = EchoContext::capturing("promote");

        activity(&ctx, &inventory, input("shared-1", "orders-db", LifecycleStage::Retire)).await.unwrap();

        assert_eq!(inventory.stage_of("shared-1", "billing-db"), Some(LifecycleStage::Promote));
        assert_eq!(inventory.stage_of("shared-1", "orders-db"), Some(LifecycleStage::Retire));
    }

    #[tokio::test]
    async fn test_reapplying_same_stage_is_noop_in_effect() {
        let inventory = FakeInventory::new().with_instance(
            "orders-1",
            "available",
            Some("one.internal"),
            Some(("orders-db", LifecycleStage::Promote)),
        );
        let ctx = EchoContext::capturing("promote");
        let before = inventory.instance("orders-1").unwrap();

        activity(&ctx, &inventory, input("orders-1", "orders-db", LifecycleStage::Promote)).await.unwrap();

        assert_eq!(inventory.instance("orders-1").unwrap(), before);
    }

    #[tokio::test]
    async fn test_rejected_write_is_tagging_error() {
        let inventory = FakeInventory::new().with_instance("orders-1", "available", Some("one.internal"), None);
        inventory.fail_tagging("orders-1");
        let ctx = EchoContext::capturing("promote");

        let err = activity(&ctx, &inventory, input("orders-1", "orders-db", LifecycleStage::Retire))
            .await
            .unwrap_err();
        assert!(matches!(
            &err,
            PromotionError::Tagging { instance_id, stage: LifecycleStage::Retire, .. } if instance_id == "orders-1"
        ));
        assert!(err.to_string().contains("AccessDenied"));

        let missing = activity(&ctx, &inventory, input("orders-9", "orders-db", LifecycleStage::Retire))
            .await
            .unwrap_err();
        assert!(missing.to_string().contains("DBInstanceNotFound"));
    }
}
