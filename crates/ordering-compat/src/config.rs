use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::derive::{CompletionPlan, resolve_root};
use crate::error::Result;
use crate::ops::{OpSet, OrderingOp};

/// Declares which relational operations a type implements natively and,
/// optionally, which of them is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    pub defines: OpSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<OrderingOp>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, defines: OpSet) -> Self {
        Self {
            name: name.into(),
            defines,
            root: None,
        }
    }

    pub fn with_root(mut self, root: OrderingOp) -> Self {
        self.root = Some(root);
        self
    }

    pub fn resolve_root(&self) -> Result<OrderingOp> {
        resolve_root(&self.name, self.defines, self.root)
    }

    /// The derivations completion would install for this type.
    pub fn plan(&self) -> Result<CompletionPlan> {
        let root = self.resolve_root()?;
        Ok(CompletionPlan::new(root, self.defines))
    }
}

pub fn parse_descriptor(raw: &str) -> Result<TypeDescriptor> {
    Ok(serde_json::from_str(raw)?)
}

pub fn load_descriptor(path: impl AsRef<Path>) -> Result<TypeDescriptor> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn save_descriptor(path: impl AsRef<Path>, descriptor: &TypeDescriptor) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let bytes = serde_json::to_vec_pretty(descriptor)?;
    fs::write(path, bytes)?;
    Ok(())
}
