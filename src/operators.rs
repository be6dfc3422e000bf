//! Conversion of formulas to restricted sets of operators.
//!
//! Every conversion is a single bottom-up [`substitute_operators`] pass with a
//! table of identities, possibly preceded by another pass. Each
//! identity is a tautological equivalence, so the result has the same truth
//! table as the input.
//!
//! Constants are rewritten in terms of the variable `p` (e.g. `T` becomes
//! `(p|~p)`), which may introduce `p` into a formula that did not use it.
//! The value of such a subformula does not depend on `p`. The `{->,F}`
//! conversion is the exception: it keeps `F` and turns `T` into `(F->F)`,
//! so its result never mentions a variable the input lacks.
//!
//! [`substitute_operators`]: Formula::substitute_operators

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use log::debug;
use thiserror::Error;

use crate::syntax::{Formula, Operator};

fn p() -> Formula {
    Formula::variable("p")
}

fn q() -> Formula {
    Formula::variable("q")
}

type Identities = HashMap<Operator, Formula>;

fn not_and_or_identities() -> &'static Identities {
    static IDENTITIES: OnceLock<Identities> = OnceLock::new();
    IDENTITIES.get_or_init(|| {
        HashMap::from([
            (Operator::True, Formula::or(p(), Formula::not(p()))),
            (Operator::False, Formula::and(p(), Formula::not(p()))),
            (Operator::IMPLIES, Formula::or(Formula::not(p()), q())),
            (
                Operator::XOR,
                Formula::or(
                    Formula::and(p(), Formula::not(q())),
                    Formula::and(Formula::not(p()), q()),
                ),
            ),
            (
                Operator::IFF,
                Formula::or(
                    Formula::and(p(), q()),
                    Formula::and(Formula::not(p()), Formula::not(q())),
                ),
            ),
            (Operator::NAND, Formula::not(Formula::and(p(), q()))),
            (Operator::NOR, Formula::not(Formula::or(p(), q()))),
        ])
    })
}

fn not_and_identities() -> &'static Identities {
    static IDENTITIES: OnceLock<Identities> = OnceLock::new();
    IDENTITIES.get_or_init(|| {
        HashMap::from([(
            Operator::OR,
            Formula::not(Formula::and(Formula::not(p()), Formula::not(q()))),
        )])
    })
}

fn nand_identities() -> &'static Identities {
    static IDENTITIES: OnceLock<Identities> = OnceLock::new();
    IDENTITIES.get_or_init(|| {
        let pq = Formula::nand(p(), q());
        HashMap::from([
            (Operator::Not, Formula::nand(p(), p())),
            (Operator::AND, Formula::nand(pq.clone(), pq)),
        ])
    })
}

fn implies_connectives() -> HashMap<Operator, Formula> {
    // (p<->q) is ~((p->q)->~(q->p)), and (p+q) is its negation.
    let differ = Formula::implies(Formula::implies(p(), q()), Formula::not(Formula::implies(q(), p())));
    HashMap::from([
        (Operator::AND, Formula::not(Formula::implies(p(), Formula::not(q())))),
        (Operator::OR, Formula::implies(Formula::not(p()), q())),
        (Operator::IFF, Formula::not(differ.clone())),
        (Operator::XOR, differ),
        (Operator::NAND, Formula::implies(p(), Formula::not(q()))),
        (Operator::NOR, Formula::not(Formula::implies(Formula::not(p()), q()))),
    ])
}

fn implies_not_identities() -> &'static Identities {
    static IDENTITIES: OnceLock<Identities> = OnceLock::new();
    IDENTITIES.get_or_init(|| {
        let mut identities = implies_connectives();
        identities.insert(Operator::True, Formula::implies(p(), p()));
        identities.insert(Operator::False, Formula::not(Formula::implies(p(), p())));
        identities
    })
}

/// `F` is already in `{->,F}`, so only `T` is rewritten, as `(F->F)`.
fn implies_false_prelude() -> &'static Identities {
    static IDENTITIES: OnceLock<Identities> = OnceLock::new();
    IDENTITIES.get_or_init(|| {
        let mut identities = implies_connectives();
        let f = Formula::constant(false);
        identities.insert(Operator::True, Formula::implies(f.clone(), f));
        identities
    })
}

fn implies_false_identities() -> &'static Identities {
    static IDENTITIES: OnceLock<Identities> = OnceLock::new();
    IDENTITIES.get_or_init(|| HashMap::from([(Operator::Not, Formula::implies(p(), Formula::constant(false)))]))
}

/// Converts the formula to an equivalent one using only `~`, `&` and `|`.
pub fn to_not_and_or(formula: &Formula) -> Formula {
    debug!("to_not_and_or(size = {})", formula.size());
    formula.substitute_operators(not_and_or_identities())
}

/// Converts the formula to an equivalent one using only `~` and `&`.
pub fn to_not_and(formula: &Formula) -> Formula {
    debug!("to_not_and(size = {})", formula.size());
    to_not_and_or(formula).substitute_operators(not_and_identities())
}

/// Converts the formula to an equivalent one using only `-&`.
pub fn to_nand(formula: &Formula) -> Formula {
    debug!("to_nand(size = {})", formula.size());
    to_not_and(formula).substitute_operators(nand_identities())
}

/// Converts the formula to an equivalent one using only `->` and `~`.
pub fn to_implies_not(formula: &Formula) -> Formula {
    debug!("to_implies_not(size = {})", formula.size());
    formula.substitute_operators(implies_not_identities())
}

/// Converts the formula to an equivalent one using only `->` and `F`.
pub fn to_implies_false(formula: &Formula) -> Formula {
    debug!("to_implies_false(size = {})", formula.size());
    formula
        .substitute_operators(implies_false_prelude())
        .substitute_operators(implies_false_identities())
}

/// A complete set of operators that every formula can be converted to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Basis {
    /// `{~, &, |}`
    NotAndOr,
    /// `{~, &}`
    NotAnd,
    /// `{-&}`
    Nand,
    /// `{->, ~}`
    ImpliesNot,
    /// `{->, F}`
    ImpliesFalse,
}

impl Basis {
    pub const ALL: [Basis; 5] = [
        Basis::NotAndOr,
        Basis::NotAnd,
        Basis::Nand,
        Basis::ImpliesNot,
        Basis::ImpliesFalse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Basis::NotAndOr => "not-and-or",
            Basis::NotAnd => "not-and",
            Basis::Nand => "nand",
            Basis::ImpliesNot => "implies-not",
            Basis::ImpliesFalse => "implies-false",
        }
    }

    /// The operators a converted formula may contain.
    pub fn operators(self) -> BTreeSet<Operator> {
        let ops: &[Operator] = match self {
            Basis::NotAndOr => &[Operator::Not, Operator::AND, Operator::OR],
            Basis::NotAnd => &[Operator::Not, Operator::AND],
            Basis::Nand => &[Operator::NAND],
            Basis::ImpliesNot => &[Operator::IMPLIES, Operator::Not],
            Basis::ImpliesFalse => &[Operator::IMPLIES, Operator::False],
        };
        ops.iter().copied().collect()
    }

    /// Checks whether the formula uses only operators of this basis.
    pub fn contains(self, formula: &Formula) -> bool {
        formula.operators().is_subset(&self.operators())
    }

    /// Converts the formula to an equivalent one over this basis.
    pub fn reduce(self, formula: &Formula) -> Formula {
        match self {
            Basis::NotAndOr => to_not_and_or(formula),
            Basis::NotAnd => to_not_and(formula),
            Basis::Nand => to_nand(formula),
            Basis::ImpliesNot => to_implies_not(formula),
            Basis::ImpliesFalse => to_implies_false(formula),
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<&str> = self.operators().into_iter().map(Operator::symbol).collect();
        write!(f, "{{{}}}", symbols.join(","))
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown basis {0:?}, expected one of: not-and-or, not-and, nand, implies-not, implies-false")]
pub struct UnknownBasis(String);

impl FromStr for Basis {
    type Err = UnknownBasis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Basis::ALL
            .into_iter()
            .find(|basis| basis.name() == s)
            .ok_or_else(|| UnknownBasis(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    use crate::semantics::{all_models, evaluate, is_equivalent};

    fn parse(s: &str) -> Formula {
        Formula::parse(s).unwrap()
    }

    fn check(basis: Basis, s: &str) -> Formula {
        let f = parse(s);
        let g = basis.reduce(&f);
        assert!(basis.contains(&g), "{} over {} uses {:?}", g, basis, g.operators());
        assert!(is_equivalent(&f, &g), "{} is not equivalent to {}", g, f);
        g
    }

    #[test]
    fn test_to_not_and_or_identities() {
        assert_eq!(check(Basis::NotAndOr, "T").to_string(), "(p|~p)");
        assert_eq!(check(Basis::NotAndOr, "F").to_string(), "(p&~p)");
        assert_eq!(check(Basis::NotAndOr, "(x->y)").to_string(), "(~x|y)");
        assert_eq!(check(Basis::NotAndOr, "(x+y)").to_string(), "((x&~y)|(~x&y))");
        assert_eq!(check(Basis::NotAndOr, "(x<->y)").to_string(), "((x&y)|(~x&~y))");
        assert_eq!(check(Basis::NotAndOr, "(x-&y)").to_string(), "~(x&y)");
        assert_eq!(check(Basis::NotAndOr, "(x-|y)").to_string(), "~(x|y)");
    }

    #[test]
    fn test_to_not_and_or_keeps_basis_formulas() {
        let f = parse("~((p&q)|~r)");
        assert!(to_not_and_or(&f).ptr_eq(&f));
    }

    #[test]
    fn test_to_not_and() {
        assert_eq!(check(Basis::NotAnd, "(x|y)").to_string(), "~(~x&~y)");
        assert_eq!(check(Basis::NotAnd, "(x->y)").to_string(), "~(~~x&~y)");
        check(Basis::NotAnd, "((x+y)<->~(z-|T))");
    }

    #[test]
    fn test_to_nand() {
        assert_eq!(check(Basis::Nand, "~x").to_string(), "(x-&x)");
        assert_eq!(check(Basis::Nand, "(x&y)").to_string(), "((x-&y)-&(x-&y))");
        check(Basis::Nand, "(x|y)");
        check(Basis::Nand, "((x->F)+(y<->z))");
    }

    #[test]
    fn test_to_nand_shares_operands() {
        let g = to_nand(&parse("~(x&y)"));
        let inner = g.first().unwrap();
        assert!(g.second().unwrap().ptr_eq(inner));
    }

    #[test]
    fn test_to_implies_not() {
        assert_eq!(check(Basis::ImpliesNot, "T").to_string(), "(p->p)");
        assert_eq!(check(Basis::ImpliesNot, "F").to_string(), "~(p->p)");
        assert_eq!(check(Basis::ImpliesNot, "(x&y)").to_string(), "~(x->~y)");
        assert_eq!(check(Basis::ImpliesNot, "(x|y)").to_string(), "(~x->y)");
        assert_eq!(check(Basis::ImpliesNot, "(x<->y)").to_string(), "~((x->y)->~(y->x))");
        assert_eq!(check(Basis::ImpliesNot, "(x+y)").to_string(), "((x->y)->~(y->x))");
        assert_eq!(check(Basis::ImpliesNot, "(x-&y)").to_string(), "(x->~y)");
        assert_eq!(check(Basis::ImpliesNot, "(x-|y)").to_string(), "~(~x->y)");
    }

    #[test]
    fn test_to_implies_false() {
        assert_eq!(check(Basis::ImpliesFalse, "~x").to_string(), "(x->F)");
        assert_eq!(check(Basis::ImpliesFalse, "F").to_string(), "F");
        assert_eq!(check(Basis::ImpliesFalse, "T").to_string(), "(F->F)");
        assert_eq!(check(Basis::ImpliesFalse, "(x->F)").to_string(), "(x->F)");
        assert_eq!(check(Basis::ImpliesFalse, "(T->F)").to_string(), "((F->F)->F)");
        assert_eq!(check(Basis::ImpliesFalse, "(x&y)").to_string(), "((x->(y->F))->F)");
        check(Basis::ImpliesFalse, "((x&y)|~(z-&(x+T)))");
    }

    #[test]
    fn test_to_implies_false_uses_only_input_variables() {
        for s in ["F", "T", "(T->F)", "(x->F)", "~(x<->T)", "((x-|F)+(y&T))"] {
            let f = parse(s);
            let g = to_implies_false(&f);
            assert!(g.variables().is_subset(f.variables()), "{} gives {}", f, g);
            let variables: Vec<&String> = f.variables().iter().collect();
            for m in all_models(&variables) {
                assert_eq!(evaluate(&f, &m), evaluate(&g, &m), "{} gives {} in {:?}", f, g, m);
            }
        }
    }

    #[test]
    fn test_reduce_every_operator_to_every_basis() {
        for basis in Basis::ALL {
            for op in Operator::all() {
                let s = match op.arity() {
                    0 => op.symbol().to_string(),
                    1 => format!("{}x", op.symbol()),
                    _ => format!("(x{}y)", op.symbol()),
                };
                check(basis, &s);
            }
        }
    }

    #[test]
    fn test_basis_operators() {
        assert_eq!(Basis::Nand.operators(), BTreeSet::from([Operator::NAND]));
        assert_eq!(Basis::ImpliesFalse.operators(), BTreeSet::from([Operator::False, Operator::IMPLIES]));
        assert!(Basis::NotAnd.contains(&parse("~(p&~q)")));
        assert!(!Basis::NotAnd.contains(&parse("(p|q)")));
        assert!(!Basis::ImpliesNot.contains(&parse("(p->T)")));
    }

    #[test]
    fn test_basis_from_str() {
        for basis in Basis::ALL {
            assert_eq!(basis.name().parse::<Basis>(), Ok(basis));
        }
        assert!("xor".parse::<Basis>().is_err());
        assert_eq!(Basis::NotAndOr.to_string(), "{~,&,|}");
    }
}
