//! Syntactic representation of propositional formulas.
//!
//! A [`Formula`] is an immutable tree whose nodes are shared through [`Arc`],
//! so a subtree may appear in any number of derived formulas without copying.
//! The arity of every node is fixed by its [`Node`] variant, which makes an
//! ill-formed tree unrepresentable. [`Formula::from_parts`] offers the
//! symbol-driven construction and rejects wrong arities eagerly.
//!
//! Derived properties (the standard string form, the variable set and the
//! operator set) are computed lazily and cached inside the shared node.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use crate::parse::ParseError;

/// Checks if the given string is a variable name: a letter `p`..=`z`
/// followed by an optional decimal suffix.
pub fn is_variable(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some('p'..='z') => chars.all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Checks if the given string is a constant (`T` or `F`).
pub fn is_constant(s: &str) -> bool {
    s == "T" || s == "F"
}

/// Checks if the given string is a unary operator.
pub fn is_unary(s: &str) -> bool {
    s == "~"
}

/// Checks if the given string is a binary operator.
pub fn is_binary(s: &str) -> bool {
    BinaryOp::from_symbol(s).is_some()
}

/// Binary connectives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Implies,
    Xor,
    Iff,
    Nand,
    Nor,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 7] = [
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Implies,
        BinaryOp::Xor,
        BinaryOp::Iff,
        BinaryOp::Nand,
        BinaryOp::Nor,
    ];

    /// Order in which the standard parser tries to match operator symbols.
    ///
    /// `<->` must come before `->`, which shares its tail.
    pub(crate) const MATCH_ORDER: [BinaryOp; 7] = [
        BinaryOp::Iff,
        BinaryOp::Implies,
        BinaryOp::Nand,
        BinaryOp::Nor,
        BinaryOp::Xor,
        BinaryOp::And,
        BinaryOp::Or,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Implies => "->",
            BinaryOp::Xor => "+",
            BinaryOp::Iff => "<->",
            BinaryOp::Nand => "-&",
            BinaryOp::Nor => "-|",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        BinaryOp::ALL.into_iter().find(|op| op.symbol() == s)
    }

    /// Applies the connective to two truth values.
    pub fn apply(self, a: bool, b: bool) -> bool {
        match self {
            BinaryOp::And => a && b,
            BinaryOp::Or => a || b,
            BinaryOp::Implies => !a || b,
            BinaryOp::Xor => a != b,
            BinaryOp::Iff => a == b,
            BinaryOp::Nand => !(a && b),
            BinaryOp::Nor => !(a || b),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Any non-variable symbol that may appear at the root of a formula:
/// the constants, negation and the binary connectives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Operator {
    True,
    False,
    Not,
    Binary(BinaryOp),
}

impl Operator {
    pub const AND: Operator = Operator::Binary(BinaryOp::And);
    pub const OR: Operator = Operator::Binary(BinaryOp::Or);
    pub const IMPLIES: Operator = Operator::Binary(BinaryOp::Implies);
    pub const XOR: Operator = Operator::Binary(BinaryOp::Xor);
    pub const IFF: Operator = Operator::Binary(BinaryOp::Iff);
    pub const NAND: Operator = Operator::Binary(BinaryOp::Nand);
    pub const NOR: Operator = Operator::Binary(BinaryOp::Nor);

    /// All ten operator symbols.
    pub fn all() -> impl Iterator<Item = Operator> {
        [Operator::True, Operator::False, Operator::Not]
            .into_iter()
            .chain(BinaryOp::ALL.into_iter().map(Operator::Binary))
    }

    pub fn constant(value: bool) -> Self {
        if value {
            Operator::True
        } else {
            Operator::False
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::True => "T",
            Operator::False => "F",
            Operator::Not => "~",
            Operator::Binary(op) => op.symbol(),
        }
    }

    /// Number of operands the symbol takes.
    pub fn arity(self) -> usize {
        match self {
            Operator::True | Operator::False => 0,
            Operator::Not => 1,
            Operator::Binary(_) => 2,
        }
    }
}

impl From<BinaryOp> for Operator {
    fn from(op: BinaryOp) -> Self {
        Operator::Binary(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::all()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| ParseError::UnknownOperator(s.to_string()))
    }
}

/// The shape of a single formula node.
#[derive(Debug, Clone)]
pub enum Node {
    Variable(String),
    Constant(bool),
    Not(Formula),
    Binary(BinaryOp, Formula, Formula),
}

struct Inner {
    node: Node,
    repr: OnceLock<String>,
    variables: OnceLock<BTreeSet<String>>,
    operators: OnceLock<BTreeSet<Operator>>,
}

/// An immutable propositional formula.
///
/// Cloning is cheap: it only bumps a reference count.
/// Equality, ordering and hashing follow the standard string form.
#[derive(Clone)]
pub struct Formula(Arc<Inner>);

// Constructors
impl Formula {
    /// Wraps a node into a formula.
    ///
    /// # Panics
    ///
    /// Panics if a [`Node::Variable`] does not carry a valid variable name.
    pub fn new(node: Node) -> Self {
        if let Node::Variable(name) = &node {
            assert!(is_variable(name), "Invalid variable name `{}`", name);
        }
        Formula(Arc::new(Inner {
            node,
            repr: OnceLock::new(),
            variables: OnceLock::new(),
            operators: OnceLock::new(),
        }))
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(Node::Variable(name.into()))
    }

    pub fn constant(value: bool) -> Self {
        Self::new(Node::Constant(value))
    }

    pub fn not(first: Formula) -> Self {
        Self::new(Node::Not(first))
    }

    pub fn binary(op: BinaryOp, first: Formula, second: Formula) -> Self {
        Self::new(Node::Binary(op, first, second))
    }

    pub fn and(first: Formula, second: Formula) -> Self {
        Self::binary(BinaryOp::And, first, second)
    }

    pub fn or(first: Formula, second: Formula) -> Self {
        Self::binary(BinaryOp::Or, first, second)
    }

    pub fn implies(first: Formula, second: Formula) -> Self {
        Self::binary(BinaryOp::Implies, first, second)
    }

    pub fn xor(first: Formula, second: Formula) -> Self {
        Self::binary(BinaryOp::Xor, first, second)
    }

    pub fn iff(first: Formula, second: Formula) -> Self {
        Self::binary(BinaryOp::Iff, first, second)
    }

    pub fn nand(first: Formula, second: Formula) -> Self {
        Self::binary(BinaryOp::Nand, first, second)
    }

    pub fn nor(first: Formula, second: Formula) -> Self {
        Self::binary(BinaryOp::Nor, first, second)
    }

    /// Builds a formula from its root symbol and operands.
    ///
    /// # Panics
    ///
    /// Panics if the number of operands does not match the arity of `root`,
    /// or if `root` is neither a variable name nor an operator symbol.
    pub fn from_parts(root: &str, first: Option<Formula>, second: Option<Formula>) -> Self {
        if is_variable(root) || is_constant(root) {
            assert!(
                first.is_none() && second.is_none(),
                "Leaf `{}` cannot have operands",
                root
            );
            if is_variable(root) {
                Self::variable(root)
            } else {
                Self::constant(root == "T")
            }
        } else if is_unary(root) {
            match (first, second) {
                (Some(first), None) => Self::not(first),
                _ => panic!("Unary operator `{}` requires exactly one operand", root),
            }
        } else if let Some(op) = BinaryOp::from_symbol(root) {
            match (first, second) {
                (Some(first), Some(second)) => Self::binary(op, first, second),
                _ => panic!("Binary operator `{}` requires exactly two operands", root),
            }
        } else {
            panic!("Unknown root symbol `{}`", root)
        }
    }
}

// Accessors
impl Formula {
    pub fn node(&self) -> &Node {
        &self.0.node
    }

    /// The variable name, constant or operator symbol at the root.
    pub fn root(&self) -> &str {
        match self.node() {
            Node::Variable(name) => name.as_str(),
            Node::Constant(value) => Operator::constant(*value).symbol(),
            Node::Not(_) => Operator::Not.symbol(),
            Node::Binary(op, _, _) => op.symbol(),
        }
    }

    /// The first operand of a unary or binary root.
    pub fn first(&self) -> Option<&Formula> {
        match self.node() {
            Node::Not(first) | Node::Binary(_, first, _) => Some(first),
            Node::Variable(_) | Node::Constant(_) => None,
        }
    }

    /// The second operand of a binary root.
    pub fn second(&self) -> Option<&Formula> {
        match self.node() {
            Node::Binary(_, _, second) => Some(second),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.node(), Node::Variable(_) | Node::Constant(_))
    }

    /// Checks whether both handles point to the very same node.
    pub fn ptr_eq(&self, other: &Formula) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Standard (fully parenthesized) string representation, cached.
    pub fn as_str(&self) -> &str {
        self.0.repr.get_or_init(|| match self.node() {
            Node::Variable(name) => name.clone(),
            Node::Constant(value) => Operator::constant(*value).symbol().to_string(),
            Node::Not(first) => format!("~{}", first.as_str()),
            Node::Binary(op, first, second) => {
                format!("({}{}{})", first.as_str(), op.symbol(), second.as_str())
            }
        })
    }

    /// All variable names occurring in the formula.
    pub fn variables(&self) -> &BTreeSet<String> {
        self.0.variables.get_or_init(|| match self.node() {
            Node::Variable(name) => BTreeSet::from([name.clone()]),
            Node::Constant(_) => BTreeSet::new(),
            Node::Not(first) => first.variables().clone(),
            Node::Binary(_, first, second) => first.variables().union(second.variables()).cloned().collect(),
        })
    }

    /// All operators occurring in the formula, constants included.
    pub fn operators(&self) -> &BTreeSet<Operator> {
        self.0.operators.get_or_init(|| match self.node() {
            Node::Variable(_) => BTreeSet::new(),
            Node::Constant(value) => BTreeSet::from([Operator::constant(*value)]),
            Node::Not(first) => {
                let mut ops = first.operators().clone();
                ops.insert(Operator::Not);
                ops
            }
            Node::Binary(op, first, second) => {
                let mut ops: BTreeSet<Operator> = first.operators().union(second.operators()).copied().collect();
                ops.insert(Operator::Binary(*op));
                ops
            }
        })
    }

    /// Number of nodes in the formula tree, counting shared subtrees once per occurrence.
    pub fn size(&self) -> usize {
        match self.node() {
            Node::Variable(_) | Node::Constant(_) => 1,
            Node::Not(first) => 1 + first.size(),
            Node::Binary(_, first, second) => 1 + first.size() + second.size(),
        }
    }

    /// Depth of the formula tree (0 for leaves).
    pub fn depth(&self) -> usize {
        match self.node() {
            Node::Variable(_) | Node::Constant(_) => 0,
            Node::Not(first) => 1 + first.depth(),
            Node::Binary(_, first, second) => 1 + first.depth().max(second.depth()),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Formula").field(&self.as_str()).finish()
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.as_str() == other.as_str()
    }
}

impl Eq for Formula {}

impl PartialOrd for Formula {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Formula {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}
