use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

const UTF8_BOM: char = '\u{feff}';

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    pub manufacturer: String,
    pub product_line: String,
}

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    #[serde(rename = "Manufacturer")]
    manufacturer: String,
    #[serde(rename = "ProductLine")]
    product_line: String,
    #[serde(rename = "Model")]
    model: String,
}

/// Known-compatible CPU models keyed by model identifier.
///
/// Built once from a `Manufacturer,ProductLine,Model` table and read-only
/// afterwards. Rows with an empty model are skipped and the first row for a
/// given model wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    models: HashMap<String, ReferenceEntry>,
}

impl ReferenceSet {
    pub fn parse(text: &str) -> Result<Self, ReferenceError> {
        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let mut set = Self::default();
        for row in reader.deserialize::<ReferenceRow>() {
            let row = row?;
            set.insert(row.model, row.manufacturer, row.product_line);
        }
        Ok(set)
    }

    /// Returns false when the model was skipped (empty or already present).
    pub fn insert(
        &mut self,
        model: impl Into<String>,
        manufacturer: impl Into<String>,
        product_line: impl Into<String>,
    ) -> bool {
        let model = model.into();
        if model.is_empty() || self.models.contains_key(&model) {
            return false;
        }
        self.models.insert(
            model,
            ReferenceEntry {
                manufacturer: manufacturer.into(),
                product_line: product_line.into(),
            },
        );
        true
    }

    pub fn get(&self, model: &str) -> Option<&ReferenceEntry> {
        self.models.get(model)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReferenceEntry)> {
        self.models
            .iter()
            .map(|(model, entry)| (model.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
