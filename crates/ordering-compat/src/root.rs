//! Compile-time completion: a type declares the one relational operation it
//! implements and gets the other three as provided methods.

use std::cmp::Ordering;

use crate::derive::formula;
use crate::ops::OrderingOp;

/// A type whose ordering is fully determined by one relational operation
/// and its equality.
///
/// ```
/// use ordering_compat::{OrderingOp, TotalOrdering};
///
/// #[derive(PartialEq)]
/// struct Version(u32);
///
/// impl TotalOrdering for Version {
///     const ROOT: OrderingOp = OrderingOp::Gt;
///
///     fn root_holds(&self, other: &Self) -> bool {
///         self.0 > other.0
///     }
/// }
///
/// assert!(Version(1).less_than(&Version(2)));
/// assert!(Version(2).greater_equal(&Version(2)));
/// ```
pub trait TotalOrdering: PartialEq {
    /// The operation `root_holds` implements.
    const ROOT: OrderingOp;

    fn root_holds(&self, other: &Self) -> bool;

    fn ordering_eq(&self, other: &Self) -> bool {
        self == other
    }

    fn holds(&self, op: OrderingOp, other: &Self) -> bool {
        formula(Self::ROOT, op).apply(self.root_holds(other), || self.ordering_eq(other))
    }

    fn less_than(&self, other: &Self) -> bool {
        self.holds(OrderingOp::Lt, other)
    }

    fn less_equal(&self, other: &Self) -> bool {
        self.holds(OrderingOp::Le, other)
    }

    fn greater_than(&self, other: &Self) -> bool {
        self.holds(OrderingOp::Gt, other)
    }

    fn greater_equal(&self, other: &Self) -> bool {
        self.holds(OrderingOp::Ge, other)
    }

    fn ordering(&self, other: &Self) -> Ordering {
        if self.ordering_eq(other) {
            Ordering::Equal
        } else if self.less_than(other) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

/// Implements `PartialOrd` for a [`TotalOrdering`] type, routing each
/// operator through the derivation table.
#[macro_export]
macro_rules! impl_partial_ord_from_root {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ::core::cmp::PartialOrd for $ty {
                fn partial_cmp(&self, other: &Self) -> ::core::option::Option<::core::cmp::Ordering> {
                    ::core::option::Option::Some($crate::TotalOrdering::ordering(self, other))
                }

                fn lt(&self, other: &Self) -> bool {
                    $crate::TotalOrdering::less_than(self, other)
                }

                fn le(&self, other: &Self) -> bool {
                    $crate::TotalOrdering::less_equal(self, other)
                }

                fn gt(&self, other: &Self) -> bool {
                    $crate::TotalOrdering::greater_than(self, other)
                }

                fn ge(&self, other: &Self) -> bool {
                    $crate::TotalOrdering::greater_equal(self, other)
                }
            }
        )+
    };
}

/// Wrapper exposing the standard comparison traits for any
/// [`TotalOrdering`] type, e.g. for sorting or use as a `BTreeMap` key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Completed<T>(pub T);

impl<T> Completed<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: TotalOrdering> PartialEq for Completed<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0.ordering_eq(&other.0)
    }
}

impl<T: TotalOrdering + Eq> Eq for Completed<T> {}

impl<T: TotalOrdering> PartialOrd for Completed<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.ordering(&other.0))
    }

    fn lt(&self, other: &Self) -> bool {
        self.0.less_than(&other.0)
    }

    fn le(&self, other: &Self) -> bool {
        self.0.less_equal(&other.0)
    }

    fn gt(&self, other: &Self) -> bool {
        self.0.greater_than(&other.0)
    }

    fn ge(&self, other: &Self) -> bool {
        self.0.greater_equal(&other.0)
    }
}

impl<T: TotalOrdering + Eq> Ord for Completed<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.ordering(&other.0)
    }
}
