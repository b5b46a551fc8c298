//! Audit core: device and reference types plus the pure compatibility logic.
mod device;
mod matcher;
mod record;
mod reference;
mod summary;

pub use device::{Device, DeviceId, ProcessorLookup};
pub use matcher::{find_match, is_compatible};
pub use record::{DeviceRecord, REPORT_COLUMNS};
pub use reference::{ReferenceEntry, ReferenceError, ReferenceSet};
pub use summary::ReportSummary;
