mod common;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use audit_core::{DeviceRecord, ReferenceSet};
use audit_engine::{
    enrich_devices, list_devices, ApiError, EnrichSettings, InventoryApi, ListingError,
};
use common::{device, fast_retry, Script, ScriptedApi};
use pretty_assertions::assert_eq;

fn reference() -> ReferenceSet {
    let mut set = ReferenceSet::default();
    set.insert("i7-9700", "Intel", "Intel Core");
    set
}

fn settings(workers: usize) -> EnrichSettings {
    EnrichSettings {
        workers,
        retry: fast_retry(2),
    }
}

fn by_name(records: &[DeviceRecord]) -> HashMap<String, DeviceRecord> {
    records
        .iter()
        .map(|record| (record.name.clone(), record.clone()))
        .collect()
}

#[tokio::test]
async fn every_device_yields_one_record() {
    audit_logging::initialize_for_tests();
    let api = ScriptedApi::new()
        .with_script(1, Script::Name("Intel Core i7-9700K"))
        .with_script(2, Script::Name("AMD Ryzen 5"))
        .with_script(3, Script::Missing)
        .with_script(4, Script::AlwaysFail)
        .with_script(5, Script::Panic);
    let api: Arc<dyn InventoryApi> = Arc::new(api);
    let devices: Vec<_> = (1..=5).map(device).collect();

    let enrichment = enrich_devices(api, devices, &reference(), &settings(5)).await;

    assert_eq!(enrichment.records.len(), 5);
    assert_eq!(enrichment.failed, vec![4]);

    let records = by_name(&enrichment.records);
    assert_eq!(records["WS-001"].compatible, Some(true));
    assert_eq!(records["WS-002"].compatible, Some(false));
    assert_eq!(records["WS-002"].processor.as_deref(), Some("AMD Ryzen 5"));
    for name in ["WS-003", "WS-004", "WS-005"] {
        assert_eq!(records[name].processor, None);
        assert_eq!(records[name].compatible, None);
        assert_eq!(records[name].client, "Acme");
    }
}

#[tokio::test]
async fn lookups_are_bounded_by_worker_count() {
    let mut api = ScriptedApi::new().with_delay(Duration::from_millis(20));
    for id in 1..=12 {
        api = api.with_script(id, Script::Name("Intel Core i7-9700K"));
    }
    let api = Arc::new(api);
    let devices: Vec<_> = (1..=12).map(device).collect();

    let enrichment = enrich_devices(api.clone(), devices, &reference(), &settings(3)).await;

    assert_eq!(enrichment.records.len(), 12);
    assert!(api.peak_in_flight() <= 3);
    assert!(enrichment.failed.is_empty());
}

#[tokio::test]
async fn empty_device_list_yields_no_records() {
    let api: Arc<dyn InventoryApi> = Arc::new(ScriptedApi::new());
    let enrichment = enrich_devices(api, Vec::new(), &reference(), &settings(5)).await;
    assert!(enrichment.records.is_empty());
    assert!(enrichment.failed.is_empty());
}

#[tokio::test]
async fn listing_accumulates_until_empty_page() {
    let first: Vec<_> = (1..=200).map(device).collect();
    let second: Vec<_> = (201..=230).map(device).collect();
    let api = ScriptedApi::new().with_pages(vec![first, second]);

    let devices = list_devices(&api, 200).await.unwrap();

    assert_eq!(devices.len(), 230);
    assert_eq!(devices[0].id, 1);
    assert_eq!(devices[229].id, 230);
}

#[tokio::test]
async fn listing_failure_discards_earlier_pages() {
    let api = ScriptedApi::new()
        .with_pages(vec![(1..=200).map(device).collect()])
        .with_failing_page(2);

    let err = list_devices(&api, 200).await.unwrap_err();

    assert_eq!(
        err,
        ListingError {
            page: 2,
            source: ApiError::HttpStatus(500),
        }
    );
}
