use super::version::SemanticVersion;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Environment tag emitted for Mac Catalyst builds.
pub const CATALYST_ENVIRONMENT: &str = "macabi";

/// The module a symbol graph was generated for.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub platform: Platform,
    /// Modules whose types participate in a cross-import overlay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bystanders: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_virtual: bool,
}

impl Module {
    /// Bystander names as a sorted set; empty when the module declares none.
    pub fn bystander_set(&self) -> BTreeSet<String> {
        self.bystanders.iter().flatten().cloned().collect()
    }

    pub fn has_bystanders(&self) -> bool {
        self.bystanders.as_ref().is_some_and(|b| !b.is_empty())
    }
}

/// Target triple of the build, plus the optional environment (e.g. `macabi`).
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_system: Option<OperatingSystem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl Platform {
    /// Whether the build targets a non-default environment such as Mac Catalyst.
    pub fn has_environment(&self) -> bool {
        self.environment.as_deref().is_some_and(|e| !e.is_empty())
    }

    pub fn is_catalyst(&self) -> bool {
        self.environment.as_deref() == Some(CATALYST_ENVIRONMENT)
    }

    pub fn operating_system_name(&self) -> Option<&str> {
        self.operating_system.as_ref().map(|os| os.name.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperatingSystem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_version: Option<SemanticVersion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_catalyst_module() {
        let module: Module = serde_json::from_str(
            r#"{
                "name": "MyKit",
                "platform": {
                    "architecture": "x86_64",
                    "vendor": "apple",
                    "operatingSystem": {"name": "ios", "minimumVersion": {"major": 13, "minor": 1}},
                    "environment": "macabi"
                }
            }"#,
        )
        .unwrap();

        assert!(module.platform.is_catalyst());
        assert!(module.platform.has_environment());
        assert_eq!(module.platform.operating_system_name(), Some("ios"));
        assert!(!module.has_bystanders());
    }

    #[test]
    fn test_bystander_set_is_sorted_and_deduplicated() {
        let module = Module {
            name: "MyKit".to_string(),
            platform: Platform::default(),
            bystanders: Some(vec![
                "UIKit".to_string(),
                "Foundation".to_string(),
                "UIKit".to_string(),
            ]),
            is_virtual: false,
        };

        let set: Vec<_> = module.bystander_set().into_iter().collect();
        assert_eq!(set, vec!["Foundation".to_string(), "UIKit".to_string()]);
    }
}
