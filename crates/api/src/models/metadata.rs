use super::version::SemanticVersion;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// File-level header of a symbol graph.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub format_version: SemanticVersion,
    pub generator: String,
}
