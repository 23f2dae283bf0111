use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use symgraph_api::{SemanticVersion, SymbolGraph};

use crate::classify::ClassifiedFile;
use crate::error::DecodeCause;

/// An input artifact: a file name plus the bytes behind it.
///
/// Identity is the path. Bytes are either supplied up front or read from disk
/// by the decode task that consumes the file.
#[derive(Debug, Clone)]
pub struct SymbolGraphFile {
    path: PathBuf,
    contents: Option<Arc<[u8]>>,
}

impl SymbolGraphFile {
    pub fn on_disk(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            contents: None,
        }
    }

    pub fn in_memory(path: impl Into<PathBuf>, contents: impl Into<Arc<[u8]>>) -> Self {
        Self {
            path: path.into(),
            contents: Some(contents.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn read(&self) -> Result<Cow<'_, [u8]>, DecodeCause> {
        match &self.contents {
            Some(bytes) => Ok(Cow::Borrowed(bytes.as_ref())),
            None => Ok(Cow::Owned(std::fs::read(&self.path)?)),
        }
    }
}

/// A file paired with its provisional classification, ready to decode.
#[derive(Debug, Clone)]
pub struct DecodeRequest {
    pub file: SymbolGraphFile,
    pub classified: ClassifiedFile,
}

/// Output of the decode stage, before deduplication.
#[derive(Debug, Clone)]
pub struct RawSymbolGraph {
    pub path: PathBuf,
    pub classified: ClassifiedFile,
    pub graph: SymbolGraph,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyOverride {
    /// Let the strategy policy decide from the file count and runtime profile.
    #[default]
    Auto,
    Batched,
    Parallel,
}

impl FromStr for StrategyOverride {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "batched" => Ok(Self::Batched),
            "parallel" => Ok(Self::Parallel),
            other => Err(format!(
                "unknown decode strategy `{other}` (expected auto, batched or parallel)"
            )),
        }
    }
}

/// Fallback availability applied to symbols lacking the domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultAvailability {
    pub domain: String,
    pub introduced: SemanticVersion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    pub strategy: StrategyOverride,
    /// Decode worker count; 0 uses the detected parallelism.
    pub worker_threads: usize,
    pub symbol_batch_size: usize,
    /// Keyed by module name.
    pub default_availability: BTreeMap<String, Vec<DefaultAvailability>>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyOverride::Auto,
            worker_threads: 0,
            symbol_batch_size: 256,
            default_availability: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_override_parsing() {
        assert_eq!(
            "Parallel".parse::<StrategyOverride>(),
            Ok(StrategyOverride::Parallel)
        );
        assert_eq!(
            " batched ".parse::<StrategyOverride>(),
            Ok(StrategyOverride::Batched)
        );
        assert!("fastest".parse::<StrategyOverride>().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: IngestConfig = serde_json::from_str(
            r#"{"strategy": "parallel", "default_availability": {"MyKit": [{"domain": "iOS", "introduced": {"major": 13}}]}}"#,
        )
        .unwrap();

        assert_eq!(config.strategy, StrategyOverride::Parallel);
        assert_eq!(config.symbol_batch_size, 256);
        assert_eq!(config.worker_threads, 0);
        assert_eq!(config.default_availability["MyKit"][0].domain, "iOS");
    }

    #[test]
    fn test_in_memory_file_reads_without_disk() {
        let file = SymbolGraphFile::in_memory("/nowhere/MyKit.symbols.json", b"{}".to_vec());
        assert_eq!(&*file.read().unwrap(), b"{}");
    }

    #[test]
    fn test_missing_file_reports_io_cause() {
        let file = SymbolGraphFile::on_disk("/definitely/not/here/MyKit.symbols.json");
        assert!(matches!(file.read(), Err(DecodeCause::Io(_))));
    }
}
