//! Static derivation table.
//!
//! Every relational operation can be expressed through a single root
//! operation `r = a ROOT b` and the equality `e = eq(a, b)`. The table below
//! is fixed for the lifetime of the process.

use std::fmt::{Display, Formatter};

use crate::error::{CompatError, Result};
use crate::ops::{OpSet, OrderingOp};

/// Boolean expression computing one operation from the root and equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formula {
    /// `r`
    Root,
    /// `r or e`
    RootOrEq,
    /// `not r`
    NotRoot,
    /// `not (r or e)`
    NeitherRootNorEq,
    /// `(not r) or e`
    NotRootOrEq,
    /// `r and not e`
    RootAndNotEq,
}

impl Formula {
    /// Evaluates the formula. `equal` is only invoked when the result
    /// depends on it.
    pub fn apply(self, root_holds: bool, equal: impl FnOnce() -> bool) -> bool {
        match self {
            Formula::Root => root_holds,
            Formula::RootOrEq => root_holds || equal(),
            Formula::NotRoot => !root_holds,
            Formula::NeitherRootNorEq => !(root_holds || equal()),
            Formula::NotRootOrEq => !root_holds || equal(),
            Formula::RootAndNotEq => root_holds && !equal(),
        }
    }

    pub fn uses_equality(self) -> bool {
        !matches!(self, Formula::Root | Formula::NotRoot)
    }

    pub fn render(self, root: OrderingOp) -> String {
        let r = format!("a {} b", root.symbol());
        match self {
            Formula::Root => r,
            Formula::RootOrEq => format!("{r} or eq(a, b)"),
            Formula::NotRoot => format!("not {r}"),
            Formula::NeitherRootNorEq => format!("not ({r} or eq(a, b))"),
            Formula::NotRootOrEq => format!("(not {r}) or eq(a, b)"),
            Formula::RootAndNotEq => format!("{r} and not eq(a, b)"),
        }
    }
}

use Formula::*;

// Indexed [root][target] in `OrderingOp::ALL` order.
const DERIVATIONS: [[Formula; 4]; 4] = [
    // root <
    [Root, RootOrEq, NeitherRootNorEq, NotRoot],
    // root <=
    [RootAndNotEq, Root, NotRoot, NotRootOrEq],
    // root >
    [NeitherRootNorEq, NotRoot, Root, RootOrEq],
    // root >=
    [NotRoot, NotRootOrEq, RootAndNotEq, Root],
];

pub fn formula(root: OrderingOp, target: OrderingOp) -> Formula {
    DERIVATIONS[root.index()][target.index()]
}

/// Evaluates `target` on `(a, b)` using only `root_fn` and `eq`.
pub fn derive_with<T: ?Sized>(
    root: OrderingOp,
    target: OrderingOp,
    a: &T,
    b: &T,
    root_fn: impl Fn(&T, &T) -> bool,
    eq: impl Fn(&T, &T) -> bool,
) -> bool {
    formula(root, target).apply(root_fn(a, b), || eq(a, b))
}

/// Picks the root: the explicitly requested one if given, otherwise the
/// highest-priority native operation.
pub fn resolve_root(
    type_name: &str,
    native: OpSet,
    requested: Option<OrderingOp>,
) -> Result<OrderingOp> {
    let Some(preferred) = native.preferred_root() else {
        return Err(CompatError::MissingOrdering {
            type_name: type_name.to_string(),
        });
    };
    match requested {
        Some(root) if !native.contains(root) => Err(CompatError::RootNotDefined {
            type_name: type_name.to_string(),
            root,
        }),
        Some(root) => Ok(root),
        None => Ok(preferred),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPlan {
    pub root: OrderingOp,
    /// Operations to install, with the formula each one uses.
    pub steps: Vec<(OrderingOp, Formula)>,
}

impl CompletionPlan {
    /// Native operations are never part of the plan, even when the root
    /// could derive them differently.
    pub fn new(root: OrderingOp, native: OpSet) -> Self {
        let steps = native
            .missing()
            .iter()
            .map(|op| (op, formula(root, op)))
            .collect();
        Self { root, steps }
    }

    pub fn is_noop(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn formula_for(&self, op: OrderingOp) -> Option<Formula> {
        self.steps
            .iter()
            .find(|(target, _)| *target == op)
            .map(|(_, formula)| *formula)
    }
}

impl Display for CompletionPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "root: {}", self.root)?;
        for op in OrderingOp::ALL {
            match self.formula_for(op) {
                Some(formula) => writeln!(f, "  {:<2} := {}", op.symbol(), formula.render(self.root))?,
                None => writeln!(f, "  {:<2} native", op.symbol())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_derivation_agrees_with_integer_ordering() {
        for root in OrderingOp::ALL {
            for target in OrderingOp::ALL {
                for a in -2i32..=2 {
                    for b in -2i32..=2 {
                        let derived =
                            derive_with(root, target, &a, &b, |x, y| root.apply(x, y), |x, y| x == y);
                        assert_eq!(
                            derived,
                            target.apply(&a, &b),
                            "{target} from {root} on ({a}, {b})"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn diagonal_is_the_root_itself() {
        for op in OrderingOp::ALL {
            assert_eq!(formula(op, op), Formula::Root);
        }
    }

    #[test]
    fn equality_is_not_consulted_when_unneeded() {
        let strict = formula(OrderingOp::Ge, OrderingOp::Lt);
        assert!(!strict.uses_equality());
        assert!(strict.apply(false, || panic!("equality must not be called")));
        assert!(Formula::RootOrEq.apply(true, || panic!("short-circuit expected")));
    }

    #[test]
    fn renders_formulas_with_root_symbol() {
        assert_eq!(
            formula(OrderingOp::Lt, OrderingOp::Gt).render(OrderingOp::Lt),
            "not (a < b or eq(a, b))"
        );
        assert_eq!(
            formula(OrderingOp::Le, OrderingOp::Ge).render(OrderingOp::Le),
            "(not a <= b) or eq(a, b)"
        );
    }

    #[test]
    fn resolve_root_rejects_empty_descriptor() {
        let err = resolve_root("Empty", OpSet::new(), None).expect_err("no ops defined");
        assert!(matches!(err, CompatError::MissingOrdering { type_name } if type_name == "Empty"));
    }

    #[test]
    fn resolve_root_honours_explicit_designation() {
        let native: OpSet = [OrderingOp::Lt, OrderingOp::Ge].into_iter().collect();
        assert_eq!(resolve_root("T", native, None).expect("root"), OrderingOp::Lt);
        assert_eq!(
            resolve_root("T", native, Some(OrderingOp::Ge)).expect("root"),
            OrderingOp::Ge
        );
        let err = resolve_root("T", native, Some(OrderingOp::Gt)).expect_err("gt is not native");
        assert!(matches!(
            err,
            CompatError::RootNotDefined { root: OrderingOp::Gt, .. }
        ));
    }

    #[test]
    fn plan_skips_native_operations() {
        let native: OpSet = [OrderingOp::Le, OrderingOp::Gt].into_iter().collect();
        let plan = CompletionPlan::new(OrderingOp::Le, native);
        assert_eq!(
            plan.steps,
            vec![
                (OrderingOp::Lt, Formula::RootAndNotEq),
                (OrderingOp::Ge, Formula::NotRootOrEq),
            ]
        );
        assert!(CompletionPlan::new(OrderingOp::Lt, OpSet::full()).is_noop());
    }
}
