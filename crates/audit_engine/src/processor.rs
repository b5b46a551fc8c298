use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use audit_core::{Device, DeviceId, ProcessorLookup};
use audit_logging::{audit_error, audit_warn};

use crate::{InventoryApi, ProcessorReply, RetryPolicy};

/// Devices whose processor lookup ran out of retries.
///
/// Clones share the same list. Ids are only ever appended, and each id is
/// kept once.
#[derive(Debug, Clone, Default)]
pub struct FailureList {
    ids: Arc<Mutex<Vec<DeviceId>>>,
}

impl FailureList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, id: DeviceId) {
        let mut ids = self.lock();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    pub fn snapshot(&self) -> Vec<DeviceId> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DeviceId>> {
        // Appends cannot leave the list half-written, so a poisoned lock is still usable.
        self.ids.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Looks up the processor name of `device`.
///
/// Replies without a usable name end the lookup at once. Request errors are
/// retried up to `policy.max_retries` attempts in total; when they run out the
/// device id is added to `failures`.
pub async fn fetch_processor(
    api: &dyn InventoryApi,
    device: &Device,
    policy: &RetryPolicy,
    failures: &FailureList,
) -> ProcessorLookup {
    let mut attempt = 0;
    while attempt < policy.max_retries {
        match api.processor(device.id).await {
            Ok(ProcessorReply::Name(name)) => return ProcessorLookup::Found(name),
            Ok(ProcessorReply::Missing(reason)) => {
                audit_warn!(
                    "Computer ID: {} Name: {} - {}",
                    device.id,
                    device.computer_name,
                    reason
                );
                return ProcessorLookup::NotFound;
            }
            Err(err) => {
                attempt += 1;
                audit_warn!(
                    "Computer ID: {} Name: {} Attempt: {} - Error getting processor: {}",
                    device.id,
                    device.computer_name,
                    attempt,
                    err
                );
                if attempt < policy.max_retries {
                    tokio::time::sleep(policy.delay_for(attempt)).await;
                }
            }
        }
    }

    audit_error!(
        "Computer ID: {} Name: {} - Out of retries",
        device.id,
        device.computer_name
    );
    failures.record(device.id);
    ProcessorLookup::Failed
}
