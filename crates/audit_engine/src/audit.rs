use std::path::PathBuf;
use std::sync::Arc;

use audit_core::{DeviceId, DeviceRecord, ReportSummary};
use audit_logging::{audit_error, audit_info, audit_warn};

use crate::{
    enrich_devices, list_devices, load_reference_or_empty, write_report, ApiSettings,
    EnrichSettings, InventoryApi,
};

#[derive(Debug, Clone)]
pub struct AuditConfig {
    pub reference_path: PathBuf,
    pub output_path: PathBuf,
    pub api: ApiSettings,
    pub enrich: EnrichSettings,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from("cpu_support.csv"),
            output_path: PathBuf::from("windows_11_compatibility.csv"),
            api: ApiSettings::default(),
            enrich: EnrichSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditOutcome {
    pub records: Vec<DeviceRecord>,
    pub failed: Vec<DeviceId>,
    pub summary: ReportSummary,
    /// `None` when the report could not be written.
    pub report_path: Option<PathBuf>,
}

/// Runs the whole audit: reference + listing, enrichment, report.
///
/// Failures along the way are logged and degrade the result; they never
/// abort the run.
pub async fn run_audit(api: Arc<dyn InventoryApi>, config: &AuditConfig) -> AuditOutcome {
    let reference = load_reference_or_empty(&config.reference_path);

    let devices = match list_devices(api.as_ref(), config.api.page_size).await {
        Ok(devices) => {
            audit_info!("Listed {} computers", devices.len());
            devices
        }
        Err(err) => {
            audit_error!("Error getting computers: {}", err);
            Vec::new()
        }
    };

    let enrichment = enrich_devices(api, devices, &reference, &config.enrich).await;
    for device_id in &enrichment.failed {
        audit_warn!("Failed Computer ID: {}", device_id);
    }

    let summary = ReportSummary::from_records(&enrichment.records);
    audit_info!(
        "{} devices: {} compatible, {} incompatible, {} unknown",
        summary.devices,
        summary.compatible,
        summary.incompatible,
        summary.unknown
    );

    let report_path = match write_report(&config.output_path, &enrichment.records) {
        Ok(()) => {
            audit_info!("Wrote report to {:?}", config.output_path);
            Some(config.output_path.clone())
        }
        Err(err) => {
            audit_error!(
                "Error writing devices to {:?}: {}",
                config.output_path,
                err
            );
            None
        }
    };

    AuditOutcome {
        records: enrichment.records,
        failed: enrichment.failed,
        summary,
        report_path,
    }
}
