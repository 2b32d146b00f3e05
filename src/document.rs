//! JSON scan documents.
//!
//! A document is a flat object keyed by attribute name:
//!
//! ```json
//! { "width": 16, "height": 16, "pixel-size": 8, "base-color": "#00ff88", "pixels": [4, 0, 0, 8] }
//! ```
//!
//! Strings are taken verbatim; numbers, booleans and arrays are stringified as JSON so they pass
//! through the same attribute parsing as a hand-written attribute. `null` means "absent".

use crate::element::attrs::{OBSERVED_ATTRIBUTES, ScanAttributes};
use crate::foundation::error::{ScanError, ScanResult};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ScanDocument {
    entries: BTreeMap<String, Value>,
}

impl ScanDocument {
    pub fn from_json_str(s: &str) -> ScanResult<Self> {
        serde_json::from_str(s).map_err(|e| ScanError::serde(format!("scan document: {e}")))
    }

    pub fn from_path(path: &Path) -> ScanResult<Self> {
        let f = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(f)).map_err(|e| {
            ScanError::serde(format!("scan document '{}': {e}", path.display()))
        })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn to_attributes(&self) -> ScanAttributes {
        self.entries
            .iter()
            .filter_map(|(name, value)| {
                if !OBSERVED_ATTRIBUTES.contains(&name.as_str()) {
                    tracing::debug!(attribute = %name, "document key is not an observed attribute");
                }
                let raw = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((name.clone(), raw))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../tests/unit/document.rs"]
mod tests;
