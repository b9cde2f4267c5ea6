use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CompatError;

/// One of the four relational operations a type can define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OrderingOp {
    Lt,
    Le,
    Gt,
    Ge,
}

impl OrderingOp {
    /// Canonical order, also the root preference used when a type defines
    /// several operations natively.
    pub const ALL: [OrderingOp; 4] = [OrderingOp::Lt, OrderingOp::Le, OrderingOp::Gt, OrderingOp::Ge];

    pub fn symbol(self) -> &'static str {
        match self {
            OrderingOp::Lt => "<",
            OrderingOp::Le => "<=",
            OrderingOp::Gt => ">",
            OrderingOp::Ge => ">=",
        }
    }

    pub fn short_name(self) -> &'static str {
        match self {
            OrderingOp::Lt => "lt",
            OrderingOp::Le => "le",
            OrderingOp::Gt => "gt",
            OrderingOp::Ge => "ge",
        }
    }

    pub fn dunder(self) -> &'static str {
        match self {
            OrderingOp::Lt => "__lt__",
            OrderingOp::Le => "__le__",
            OrderingOp::Gt => "__gt__",
            OrderingOp::Ge => "__ge__",
        }
    }

    /// One-line operator documentation attached to derived operations.
    pub fn description(self) -> &'static str {
        match self {
            OrderingOp::Lt => "Return self<value.",
            OrderingOp::Le => "Return self<=value.",
            OrderingOp::Gt => "Return self>value.",
            OrderingOp::Ge => "Return self>=value.",
        }
    }

    /// Evaluates the operation through the type's own `PartialOrd`.
    pub fn apply<T: PartialOrd + ?Sized>(self, a: &T, b: &T) -> bool {
        match self {
            OrderingOp::Lt => a < b,
            OrderingOp::Le => a <= b,
            OrderingOp::Gt => a > b,
            OrderingOp::Ge => a >= b,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            OrderingOp::Lt => 0,
            OrderingOp::Le => 1,
            OrderingOp::Gt => 2,
            OrderingOp::Ge => 3,
        }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl Display for OrderingOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for OrderingOp {
    type Err = CompatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_op(s).ok_or_else(|| CompatError::UnknownOperation {
            name: s.to_string(),
        })
    }
}

impl TryFrom<String> for OrderingOp {
    type Error = CompatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderingOp> for String {
    fn from(op: OrderingOp) -> Self {
        op.short_name().to_string()
    }
}

/// Resolves `<`, `lt` or `__lt__` style names (any case) to an operation.
pub fn parse_op(name: &str) -> Option<OrderingOp> {
    match canonical_op_name(name).as_str() {
        "<" | "lt" => Some(OrderingOp::Lt),
        "<=" | "le" => Some(OrderingOp::Le),
        ">" | "gt" => Some(OrderingOp::Gt),
        ">=" | "ge" => Some(OrderingOp::Ge),
        _ => None,
    }
}

pub fn canonical_op_name(name: &str) -> String {
    name.trim()
        .trim_end_matches('\0')
        .trim_matches('_')
        .to_ascii_lowercase()
}

/// Set of relational operations, typically the ones a type defines natively.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<OrderingOp>", into = "Vec<OrderingOp>")]
pub struct OpSet {
    bits: u8,
}

impl OpSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full() -> Self {
        OrderingOp::ALL.into_iter().collect()
    }

    pub fn contains(&self, op: OrderingOp) -> bool {
        self.bits & op.bit() != 0
    }

    /// Returns `false` if the operation was already present.
    pub fn insert(&mut self, op: OrderingOp) -> bool {
        let fresh = !self.contains(op);
        self.bits |= op.bit();
        fresh
    }

    pub fn remove(&mut self, op: OrderingOp) -> bool {
        let present = self.contains(op);
        self.bits &= !op.bit();
        present
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = OrderingOp> + '_ {
        OrderingOp::ALL.into_iter().filter(|op| self.contains(*op))
    }

    pub fn missing(&self) -> OpSet {
        OrderingOp::ALL
            .into_iter()
            .filter(|op| !self.contains(*op))
            .collect()
    }

    /// Highest-priority member: `<`, then `<=`, then `>`, then `>=`.
    pub fn preferred_root(&self) -> Option<OrderingOp> {
        self.iter().next()
    }
}

impl FromIterator<OrderingOp> for OpSet {
    fn from_iter<I: IntoIterator<Item = OrderingOp>>(iter: I) -> Self {
        let mut set = OpSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<OrderingOp> for OpSet {
    fn extend<I: IntoIterator<Item = OrderingOp>>(&mut self, iter: I) {
        for op in iter {
            self.insert(op);
        }
    }
}

impl From<Vec<OrderingOp>> for OpSet {
    fn from(ops: Vec<OrderingOp>) -> Self {
        ops.into_iter().collect()
    }
}

impl From<OpSet> for Vec<OrderingOp> {
    fn from(set: OpSet) -> Self {
        set.iter().collect()
    }
}

impl Display for OpSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(OrderingOp::symbol).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_spellings() {
        assert_eq!(parse_op("<"), Some(OrderingOp::Lt));
        assert_eq!(parse_op("le"), Some(OrderingOp::Le));
        assert_eq!(parse_op("__gt__"), Some(OrderingOp::Gt));
        assert_eq!(parse_op(" GE\0"), Some(OrderingOp::Ge));
        assert_eq!(parse_op("__eq__"), None);
        assert_eq!(parse_op("=<"), None);
    }

    #[test]
    fn unknown_name_is_reported() {
        let err = "cmp".parse::<OrderingOp>().expect_err("cmp is not relational");
        assert!(matches!(err, CompatError::UnknownOperation { name } if name == "cmp"));
    }

    #[test]
    fn preferred_root_follows_fixed_priority() {
        let set: OpSet = [OrderingOp::Ge, OrderingOp::Le].into_iter().collect();
        assert_eq!(set.preferred_root(), Some(OrderingOp::Le));

        let set: OpSet = [OrderingOp::Gt, OrderingOp::Ge, OrderingOp::Lt]
            .into_iter()
            .collect();
        assert_eq!(set.preferred_root(), Some(OrderingOp::Lt));

        assert_eq!(OpSet::new().preferred_root(), None);
    }

    #[test]
    fn priority_matches_greatest_dunder_name() {
        for root in OrderingOp::ALL {
            let set: OpSet = OrderingOp::ALL.into_iter().filter(|op| *op >= root).collect();
            let by_name = set.iter().max_by_key(|op| op.dunder());
            assert_eq!(set.preferred_root(), by_name);
        }
    }

    #[test]
    fn missing_is_the_complement() {
        let set: OpSet = [OrderingOp::Lt].into_iter().collect();
        let missing = set.missing();
        assert_eq!(missing.len(), 3);
        assert!(!missing.contains(OrderingOp::Lt));
        assert!(OpSet::full().missing().is_empty());
    }

    #[test]
    fn insert_and_remove_report_membership_changes() {
        let mut set = OpSet::new();
        assert!(set.insert(OrderingOp::Gt));
        assert!(!set.insert(OrderingOp::Gt));
        assert!(set.remove(OrderingOp::Gt));
        assert!(!set.remove(OrderingOp::Gt));
        assert!(set.is_empty());
    }

    #[test]
    fn serializes_as_short_names() {
        let set: OpSet = [OrderingOp::Ge, OrderingOp::Lt].into_iter().collect();
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, r#"["lt","ge"]"#);

        let parsed: OpSet = serde_json::from_str(r#"["__le__", ">"]"#).expect("deserialize");
        assert!(parsed.contains(OrderingOp::Le));
        assert!(parsed.contains(OrderingOp::Gt));
        assert_eq!(parsed.to_string(), "{<=, >}");
    }
}
