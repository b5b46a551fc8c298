use crate::{ReferenceEntry, ReferenceSet};

/// True if any known model occurs as a substring of `processor_name`.
pub fn is_compatible(processor_name: &str, reference: &ReferenceSet) -> bool {
    find_match(processor_name, reference).is_some()
}

/// Returns some model contained in `processor_name`.
///
/// When several models match, which one is returned is unspecified.
pub fn find_match<'a>(
    processor_name: &str,
    reference: &'a ReferenceSet,
) -> Option<(&'a str, &'a ReferenceEntry)> {
    if processor_name.is_empty() {
        return None;
    }
    reference
        .iter()
        .find(|(model, _)| processor_name.contains(model))
}
