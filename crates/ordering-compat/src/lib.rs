//! Ordering completion for types that define a single relational operation.
//!
//! This crate provides:
//! - a static derivation table expressing `<`, `<=`, `>` and `>=` through any
//!   one of them plus equality
//! - [`TotalOrdering`], [`Completed`] and [`impl_partial_ord_from_root!`] for
//!   compile-time completion with an explicitly designated root
//! - [`RootComparator`] for closure-based orderings
//! - [`OperationTable`] and [`complete_ordering`] for completing a per-type
//!   operation registry at runtime
//! - JSON [`TypeDescriptor`]s describing which operations a type defines

mod comparator;
mod config;
mod derive;
pub mod error;
mod ops;
mod root;
mod table;

pub use comparator::RootComparator;
pub use config::{TypeDescriptor, load_descriptor, parse_descriptor, save_descriptor};
pub use derive::{CompletionPlan, Formula, derive_with, formula, resolve_root};
pub use error::{CompatError, Result};
pub use ops::{OpSet, OrderingOp, canonical_op_name, parse_op};
pub use root::{Completed, TotalOrdering};
pub use table::{
    CompletionReport, OperationSpec, OperationTable, Provenance, Relation, complete_ordering,
    complete_ordering_from,
};
