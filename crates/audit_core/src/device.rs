pub type DeviceId = u64;

/// An endpoint as returned by the inventory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: DeviceId,
    pub computer_name: String,
    pub client: String,
    pub location: String,
}

/// Outcome of looking up the processor of a single device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessorLookup {
    /// The platform reported a processor name.
    Found(String),
    /// The platform answered but had no usable processor name.
    NotFound,
    /// Every attempt failed, or the lookup task itself died.
    Failed,
}

impl ProcessorLookup {
    pub fn processor_name(&self) -> Option<&str> {
        match self {
            ProcessorLookup::Found(name) => Some(name),
            ProcessorLookup::NotFound | ProcessorLookup::Failed => None,
        }
    }
}
