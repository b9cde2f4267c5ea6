use std::cmp::Ordering;

use crate::derive::formula;
use crate::ops::OrderingOp;

/// All four relational operations built from one comparison closure and an
/// equality closure, for values whose type cannot implement
/// [`TotalOrdering`](crate::TotalOrdering) itself.
#[derive(Debug, Clone, Copy)]
pub struct RootComparator<F, E> {
    root: OrderingOp,
    relation: F,
    equality: E,
}

impl<F, E> RootComparator<F, E> {
    pub fn new(root: OrderingOp, relation: F, equality: E) -> Self {
        Self {
            root,
            relation,
            equality,
        }
    }

    pub fn root(&self) -> OrderingOp {
        self.root
    }
}

fn partial_eq<T: PartialEq + ?Sized>(a: &T, b: &T) -> bool {
    a == b
}

impl<T: PartialEq + ?Sized, F: Fn(&T, &T) -> bool> RootComparator<F, fn(&T, &T) -> bool> {
    /// Uses `T`'s `PartialEq` as the equality.
    pub fn with_partial_eq(root: OrderingOp, relation: F) -> Self {
        Self::new(root, relation, partial_eq::<T>)
    }
}

impl<F, E> RootComparator<F, E> {
    pub fn holds<T: ?Sized>(&self, op: OrderingOp, a: &T, b: &T) -> bool
    where
        F: Fn(&T, &T) -> bool,
        E: Fn(&T, &T) -> bool,
    {
        formula(self.root, op).apply((self.relation)(a, b), || (self.equality)(a, b))
    }

    pub fn lt<T: ?Sized>(&self, a: &T, b: &T) -> bool
    where
        F: Fn(&T, &T) -> bool,
        E: Fn(&T, &T) -> bool,
    {
        self.holds(OrderingOp::Lt, a, b)
    }

    pub fn le<T: ?Sized>(&self, a: &T, b: &T) -> bool
    where
        F: Fn(&T, &T) -> bool,
        E: Fn(&T, &T) -> bool,
    {
        self.holds(OrderingOp::Le, a, b)
    }

    pub fn gt<T: ?Sized>(&self, a: &T, b: &T) -> bool
    where
        F: Fn(&T, &T) -> bool,
        E: Fn(&T, &T) -> bool,
    {
        self.holds(OrderingOp::Gt, a, b)
    }

    pub fn ge<T: ?Sized>(&self, a: &T, b: &T) -> bool
    where
        F: Fn(&T, &T) -> bool,
        E: Fn(&T, &T) -> bool,
    {
        self.holds(OrderingOp::Ge, a, b)
    }

    /// Three-way comparison, usable with `sort_by`.
    pub fn compare<T: ?Sized>(&self, a: &T, b: &T) -> Ordering
    where
        F: Fn(&T, &T) -> bool,
        E: Fn(&T, &T) -> bool,
    {
        if (self.equality)(a, b) {
            Ordering::Equal
        } else if self.lt(a, b) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_from_greater_equal_closure() {
        let cmp = RootComparator::with_partial_eq(OrderingOp::Ge, |a: &str, b: &str| a >= b);
        assert!(cmp.gt("b", "a"));
        assert!(cmp.le("a", "a"));
        assert!(!cmp.lt("a", "a"));
        assert!(!cmp.ge("a", "b"));
    }

    #[test]
    fn sorts_with_custom_key_ordering() {
        // Order by length only; equality is length equality.
        let cmp = RootComparator::new(
            OrderingOp::Gt,
            |a: &String, b: &String| a.len() > b.len(),
            |a: &String, b: &String| a.len() == b.len(),
        );
        let mut words = vec!["ccc".to_string(), "a".to_string(), "bb".to_string()];
        words.sort_by(|a, b| cmp.compare(a, b));
        assert_eq!(words, vec!["a", "bb", "ccc"]);
        assert_eq!(cmp.compare(&"xy".to_string(), &"zz".to_string()), Ordering::Equal);
    }
}
