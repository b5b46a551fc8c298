use serde::{Serialize, Serializer};

use crate::{is_compatible, Device, ProcessorLookup, ReferenceSet};

/// Header row of the compatibility report, in column order.
pub const REPORT_COLUMNS: [&str; 5] = ["Name", "Client", "Location", "Processor", "Compatible"];

/// One row of the compatibility report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Client")]
    pub client: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Processor")]
    pub processor: Option<String>,
    #[serde(rename = "Compatible", serialize_with = "serialize_flag")]
    pub compatible: Option<bool>,
}

impl DeviceRecord {
    /// Compatibility is only evaluated when a processor name was found.
    pub fn from_lookup(device: &Device, lookup: ProcessorLookup, reference: &ReferenceSet) -> Self {
        let processor = match lookup {
            ProcessorLookup::Found(name) => Some(name),
            ProcessorLookup::NotFound | ProcessorLookup::Failed => None,
        };
        let compatible = processor
            .as_deref()
            .map(|name| is_compatible(name, reference));
        Self {
            name: device.computer_name.clone(),
            client: device.client.clone(),
            location: device.location.clone(),
            processor,
            compatible,
        }
    }
}

fn serialize_flag<S: Serializer>(flag: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error> {
    match flag {
        Some(true) => serializer.serialize_str("True"),
        Some(false) => serializer.serialize_str("False"),
        None => serializer.serialize_none(),
    }
}
