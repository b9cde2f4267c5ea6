use std::collections::BTreeMap;
use std::sync::Arc;

use log::{debug, trace};

use crate::derive::{CompletionPlan, Formula, resolve_root};
use crate::error::{CompatError, Result};
use crate::ops::{OpSet, OrderingOp};

pub type Relation<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync + 'static>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Native,
    Derived { root: OrderingOp, formula: Formula },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSpec {
    pub op: OrderingOp,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionReport {
    pub type_name: String,
    pub root: OrderingOp,
    pub derived: Vec<OrderingOp>,
}

/// Relational operations registered for one type, plus its equality.
pub struct OperationTable<T: ?Sized> {
    name: String,
    equality: Relation<T>,
    ops: BTreeMap<OrderingOp, (OperationSpec, Relation<T>)>,
}

impl<T: ?Sized + 'static> OperationTable<T> {
    pub fn new(name: impl Into<String>, equality: Relation<T>) -> Self {
        Self {
            name: name.into(),
            equality,
            ops: BTreeMap::new(),
        }
    }

    pub fn with_partial_eq(name: impl Into<String>) -> Self
    where
        T: PartialEq,
    {
        Self::new(name, Arc::new(|a: &T, b: &T| a == b))
    }

    /// Registers a native implementation of `op`.
    pub fn define(&mut self, op: OrderingOp, relation: Relation<T>) -> &mut Self {
        let spec = OperationSpec {
            op,
            provenance: Provenance::Native,
        };
        self.ops.insert(op, (spec, relation));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The natively defined operations.
    pub fn native(&self) -> OpSet {
        self.ops
            .values()
            .filter(|(spec, _)| spec.provenance == Provenance::Native)
            .map(|(spec, _)| spec.op)
            .collect()
    }

    pub fn defined(&self) -> OpSet {
        self.ops.keys().copied().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.ops.len() == OrderingOp::ALL.len()
    }

    pub fn spec(&self, op: OrderingOp) -> Option<&OperationSpec> {
        self.ops.get(&op).map(|entry| &entry.0)
    }

    pub fn relation(&self, op: OrderingOp) -> Option<Relation<T>> {
        self.ops.get(&op).map(|entry| Arc::clone(&entry.1))
    }

    pub fn equal(&self, a: &T, b: &T) -> bool {
        (self.equality)(a, b)
    }

    pub fn call(&self, op: OrderingOp, a: &T, b: &T) -> Result<bool> {
        let (_, relation) = self
            .ops
            .get(&op)
            .ok_or_else(|| CompatError::OperationNotDefined {
                type_name: self.name.clone(),
                op,
            })?;
        Ok(relation(a, b))
    }

    fn install(&mut self, plan: &CompletionPlan) -> Result<Vec<OrderingOp>> {
        let root_relation = self.relation(plan.root).ok_or_else(|| CompatError::RootNotDefined {
            type_name: self.name.clone(),
            root: plan.root,
        })?;

        let mut derived = Vec::with_capacity(plan.steps.len());
        for &(op, formula) in &plan.steps {
            let root_fn = Arc::clone(&root_relation);
            let eq = Arc::clone(&self.equality);
            let relation: Relation<T> =
                Arc::new(move |a: &T, b: &T| formula.apply(root_fn(a, b), || eq(a, b)));
            let spec = OperationSpec {
                op,
                provenance: Provenance::Derived {
                    root: plan.root,
                    formula,
                },
            };
            trace!(
                "{}: {} := {} ({})",
                self.name,
                op.dunder(),
                formula.render(plan.root),
                op.description()
            );
            self.ops.insert(op, (spec, relation));
            derived.push(op);
        }
        Ok(derived)
    }

    fn complete_with(&mut self, requested: Option<OrderingOp>) -> Result<CompletionReport> {
        let native = self.native();
        let root = resolve_root(&self.name, native, requested)?;
        // Only operations absent from the table are filled, so a second
        // pass over a completed table installs nothing.
        let plan = CompletionPlan::new(root, self.defined());
        if plan.is_noop() {
            debug!("{}: ordering already complete (root {})", self.name, root);
        } else {
            debug!("{}: completing ordering from root {} over native {}", self.name, root, native);
        }
        let derived = self.install(&plan)?;
        Ok(CompletionReport {
            type_name: self.name.clone(),
            root,
            derived,
        })
    }
}

/// Fills in the missing relational operations of `table`, deriving them
/// from the highest-priority native operation (`<`, `<=`, `>`, `>=`).
///
/// Fails with [`CompatError::MissingOrdering`] without touching the table
/// when no operation is defined.
pub fn complete_ordering<T: ?Sized + 'static>(
    table: &mut OperationTable<T>,
) -> Result<CompletionReport> {
    table.complete_with(None)
}

/// Like [`complete_ordering`], but derives from the designated `root`,
/// which must be natively defined.
pub fn complete_ordering_from<T: ?Sized + 'static>(
    table: &mut OperationTable<T>,
    root: OrderingOp,
) -> Result<CompletionReport> {
    table.complete_with(Some(root))
}
