//! Audit engine: inventory API access, enrichment and report output.
mod api;
mod audit;
mod enrich;
mod lister;
mod processor;
mod reference;
mod report;
mod settings;
mod types;

pub use api::{InventoryApi, MissingReason, ProcessorReply, ReqwestInventoryApi};
pub use audit::{run_audit, AuditConfig, AuditOutcome};
pub use enrich::{enrich_devices, Enrichment};
pub use lister::list_devices;
pub use processor::{fetch_processor, FailureList};
pub use reference::{load_reference, load_reference_or_empty};
pub use report::{write_report, ReportError};
pub use settings::{
    ApiSettings, Credentials, EnrichSettings, RetryPolicy, ACCESS_TOKEN_VAR, CLIENT_ID_VAR,
};
pub use types::{ApiError, ConfigError, ListingError};
