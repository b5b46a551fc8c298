use std::sync::Arc;

use audit_core::{Device, DeviceId, DeviceRecord, ProcessorLookup, ReferenceSet};
use audit_logging::{audit_debug, audit_error};
use futures_util::{stream, StreamExt};

use crate::{fetch_processor, EnrichSettings, FailureList, InventoryApi};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    /// One record per input device, in completion order.
    pub records: Vec<DeviceRecord>,
    pub failed: Vec<DeviceId>,
}

/// Fetches every device's processor with at most `settings.workers` lookups
/// in flight and turns each result into a report record.
///
/// Each lookup runs as its own task; a task that dies still yields a record
/// with no processor, so no device is dropped.
pub async fn enrich_devices(
    api: Arc<dyn InventoryApi>,
    devices: Vec<Device>,
    reference: &ReferenceSet,
    settings: &EnrichSettings,
) -> Enrichment {
    let failures = FailureList::new();
    let mut records = Vec::with_capacity(devices.len());

    let mut completions = stream::iter(devices)
        .map(|device| {
            let api = Arc::clone(&api);
            let failures = failures.clone();
            let retry = settings.retry.clone();
            async move {
                let task_device = device.clone();
                let handle = tokio::spawn(async move {
                    fetch_processor(api.as_ref(), &task_device, &retry, &failures).await
                });
                (device, handle.await)
            }
        })
        .buffer_unordered(settings.workers.max(1));

    while let Some((device, joined)) = completions.next().await {
        let lookup = match joined {
            Ok(lookup) => lookup,
            Err(err) => {
                audit_error!(
                    "ID: {} Name: {} - Error getting processor: {}",
                    device.id,
                    device.computer_name,
                    err
                );
                ProcessorLookup::Failed
            }
        };
        audit_debug!(
            "Computer ID: {} Name: {} - processor {:?}",
            device.id,
            device.computer_name,
            lookup.processor_name()
        );
        records.push(DeviceRecord::from_lookup(&device, lookup, reference));
    }

    Enrichment {
        records,
        failed: failures.snapshot(),
    }
}
