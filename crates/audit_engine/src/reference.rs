use std::fs;
use std::path::Path;

use audit_core::{ReferenceError, ReferenceSet};
use audit_logging::{audit_error, audit_info};

pub fn load_reference(path: &Path) -> Result<ReferenceSet, ReferenceError> {
    let text = fs::read_to_string(path)?;
    ReferenceSet::parse(&text)
}

/// Like [`load_reference`], but logs a failure and falls back to an empty
/// set, which makes every compatibility check come out false.
pub fn load_reference_or_empty(path: &Path) -> ReferenceSet {
    match load_reference(path) {
        Ok(set) => {
            audit_info!("Loaded {} CPU models from {:?}", set.len(), path);
            set
        }
        Err(err) => {
            audit_error!("Error loading CPU model data from {:?}: {}", path, err);
            ReferenceSet::default()
        }
    }
}
