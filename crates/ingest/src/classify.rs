//! File name classification.
//!
//! Classification runs in two phases. [`classify`] looks only at the file name
//! and produces a provisional [`FileClass`]. Once the module descriptor has been
//! decoded, [`ClassifiedFile::confirm`] resolves it to a [`GraphRole`]: a file
//! whose module declares bystanders is a main graph for that module regardless
//! of how many `@` segments its name has.

use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use symgraph_api::{Module, SYMBOL_GRAPH_SUFFIX};

use crate::error::ClassificationError;

/// Provisional classification derived from the file name alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileClass {
    /// `Module.symbols.json`
    Main { module: String },
    /// `Extending@Module.symbols.json`
    Extension { extending: String, extended: String },
    /// `A@B@C.symbols.json`: either a bystander graph for `A` or a legacy
    /// cross-import overlay grouped under `A`.
    Compound { segments: Vec<String> },
}

/// Confirmed role of a decoded graph. Doubles as the partition key for
/// consolidation: graphs with equal roles are variants of one logical graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "role", rename_all = "camelCase")]
pub enum GraphRole {
    Main {
        module: String,
    },
    Bystander {
        module: String,
        bystanders: BTreeSet<String>,
    },
    Extension {
        extending: String,
        extended: String,
    },
}

impl GraphRole {
    /// The module this graph is grouped under.
    pub fn module_name(&self) -> &str {
        match self {
            GraphRole::Main { module } | GraphRole::Bystander { module, .. } => module,
            GraphRole::Extension { extended, .. } => extended,
        }
    }

    pub fn is_main(&self) -> bool {
        !matches!(self, GraphRole::Extension { .. })
    }

    pub fn extending_module(&self) -> Option<&str> {
        match self {
            GraphRole::Extension { extending, .. } => Some(extending),
            _ => None,
        }
    }

    pub fn bystanders(&self) -> Option<&BTreeSet<String>> {
        match self {
            GraphRole::Bystander { bystanders, .. } => Some(bystanders),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassifiedFile {
    pub file_name: String,
    pub class: FileClass,
}

impl ClassifiedFile {
    pub fn primary_module_name(&self) -> &str {
        match &self.class {
            FileClass::Main { module } => module,
            FileClass::Extension { extended, .. } => extended,
            FileClass::Compound { segments } => &segments[0],
        }
    }

    pub fn extended_module_name(&self) -> Option<&str> {
        match &self.class {
            FileClass::Extension { extended, .. } => Some(extended),
            _ => None,
        }
    }

    pub fn bystander_module_names(&self) -> BTreeSet<String> {
        match &self.class {
            FileClass::Compound { segments } => segments[1..].iter().cloned().collect(),
            _ => BTreeSet::new(),
        }
    }

    /// Provisional main flag; compound names are assumed to carry bystanders
    /// until the decoded module says otherwise.
    pub fn is_main(&self) -> bool {
        !matches!(self.class, FileClass::Extension { .. })
    }

    pub fn confirm(&self, module: &Module) -> GraphRole {
        if module.has_bystanders() {
            return GraphRole::Bystander {
                module: module.name.clone(),
                bystanders: module.bystander_set(),
            };
        }

        match &self.class {
            FileClass::Main { module: from_name } => {
                if *from_name != module.name {
                    tracing::debug!(
                        "{} declares module {}, using the declared name",
                        self.file_name,
                        module.name
                    );
                }
                GraphRole::Main {
                    module: module.name.clone(),
                }
            }
            FileClass::Extension {
                extending,
                extended,
            } => GraphRole::Extension {
                extending: extending.clone(),
                extended: extended.clone(),
            },
            FileClass::Compound { segments } => GraphRole::Extension {
                extending: segments[segments.len() - 1].clone(),
                extended: segments[0].clone(),
            },
        }
    }
}

pub fn classify(file_name: &str) -> Result<ClassifiedFile, ClassificationError> {
    let stem = file_name
        .strip_suffix(SYMBOL_GRAPH_SUFFIX)
        .ok_or_else(|| ClassificationError::MissingExtension(file_name.to_string()))?;

    let segments: Vec<String> = stem.split('@').map(str::to_string).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ClassificationError::EmptyModuleName(file_name.to_string()));
    }

    let class = match segments.len() {
        1 => FileClass::Main {
            module: segments.into_iter().next().unwrap_or_default(),
        },
        2 => {
            let mut it = segments.into_iter();
            let extending = it.next().unwrap_or_default();
            let extended = it.next().unwrap_or_default();
            FileClass::Extension {
                extending,
                extended,
            }
        }
        _ => FileClass::Compound { segments },
    };

    Ok(ClassifiedFile {
        file_name: file_name.to_string(),
        class,
    })
}

pub fn classify_path(path: &Path) -> Result<ClassifiedFile, ClassificationError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| ClassificationError::MissingExtension(path.display().to_string()))?
        .to_str()
        .ok_or_else(|| ClassificationError::NotUtf8(path.display().to_string()))?;
    classify(file_name)
}
