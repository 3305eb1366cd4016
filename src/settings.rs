//! Functions for loading hierarchy settings.

use std::fs;
use std::path::Path;

use crate::errors::Result;

/// A structure containing configuration data for the transform hierarchy. Every
/// field has a default, so a settings file only needs the values it changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub hierarchy: HierarchyParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyParams {
    /// The number of transforms to reserve storage for up front.
    pub capacity: usize,
    /// Keeps transforms with the same depth in their previous relative order
    /// when the hierarchy is resorted.
    pub stable_sort: bool,
}

impl Default for HierarchyParams {
    fn default() -> Self {
        HierarchyParams {
            capacity: 0,
            stable_sort: true,
        }
    }
}

impl Settings {
    /// Parses settings from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads settings from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;

        info!("Loads hierarchy settings from {:?}.", path);
        Ok(settings)
    }

    /// Serializes settings into a pretty-printed JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.hierarchy.stable_sort);

        let settings = Settings::from_json(r#"{ "hierarchy": { "capacity": 64 } }"#).unwrap();
        assert_eq!(settings.hierarchy.capacity, 64);
        assert!(settings.hierarchy.stable_sort);
    }

    #[test]
    fn malformed() {
        assert!(Settings::from_json("{ hierarchy: ").is_err());
    }
}
