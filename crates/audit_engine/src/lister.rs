use audit_core::Device;
use audit_logging::audit_info;

use crate::{InventoryApi, ListingError};

/// Pages through the inventory until a page comes back empty.
///
/// Listing is all-or-nothing: the first failing page aborts it and nothing
/// accumulated so far is returned.
pub async fn list_devices(
    api: &dyn InventoryApi,
    page_size: u32,
) -> Result<Vec<Device>, ListingError> {
    let mut devices = Vec::new();
    let mut page = 1;
    loop {
        audit_info!("Getting page {} of computers...", page);
        let batch = api
            .list_page(page, page_size)
            .await
            .map_err(|source| ListingError { page, source })?;
        if batch.is_empty() {
            break;
        }
        devices.extend(batch);
        page += 1;
    }
    Ok(devices)
}
