use std::path::Path;

use audit_core::DeviceRecord;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no device records to write")]
    Empty,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write `records` as CSV with a header row, in the order given.
///
/// The file is written in place; a failure part-way leaves whatever was
/// already written.
pub fn write_report(path: &Path, records: &[DeviceRecord]) -> Result<(), ReportError> {
    if records.is_empty() {
        return Err(ReportError::Empty);
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
