//! Model versions served side by side

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::gbdt::BoosterParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelVersion {
    V1,
    #[default]
    V2,
}

impl ModelVersion {
    pub const ALL: [ModelVersion; 2] = [ModelVersion::V1, ModelVersion::V2];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVersion::V1 => "v1",
            ModelVersion::V2 => "v2",
        }
    }

    /// Lenient parse for query strings: only "v1" picks the baseline,
    /// anything else gets the current model.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("v1") => ModelVersion::V1,
            _ => ModelVersion::V2,
        }
    }

    pub fn params(&self) -> BoosterParams {
        match self {
            ModelVersion::V1 => BoosterParams::v1(),
            ModelVersion::V2 => BoosterParams::v2(),
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ModelVersion::V1 => "model_v1.json",
            ModelVersion::V2 => "model_v2.json",
        }
    }
}

impl fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_defaults_to_v2() {
        assert_eq!(ModelVersion::from_query(None), ModelVersion::V2);
        assert_eq!(ModelVersion::from_query(Some("v1")), ModelVersion::V1);
        assert_eq!(ModelVersion::from_query(Some("V1")), ModelVersion::V1);
        assert_eq!(ModelVersion::from_query(Some("v2")), ModelVersion::V2);
        assert_eq!(ModelVersion::from_query(Some("v9")), ModelVersion::V2);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ModelVersion::V1).unwrap(), "\"v1\"");
        let parsed: ModelVersion = serde_json::from_str("\"v2\"").unwrap();
        assert_eq!(parsed, ModelVersion::V2);
    }
}
