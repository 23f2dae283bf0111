use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A `major.minor.patch` version as encoded in symbol graph files.
///
/// Only `major` is required on the wire; missing components decode as zero.
#[derive(
    Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, JsonSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct SemanticVersion {
    pub major: u32,
    #[serde(default)]
    pub minor: u32,
    #[serde(default)]
    pub patch: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerelease: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_metadata: Option<String>,
}

impl SemanticVersion {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
            build_metadata: None,
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{pre}")?;
        }
        if let Some(build) = &self.build_metadata {
            write!(f, "+{build}")?;
        }
        Ok(())
    }
}
