//! Inference rules, as read by the semantic layer.

use std::collections::BTreeSet;
use std::fmt;

use crate::syntax::Formula;

/// An ordered list of assumptions together with a conclusion.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct InferenceRule {
    assumptions: Vec<Formula>,
    conclusion: Formula,
}

impl InferenceRule {
    pub fn new(assumptions: impl IntoIterator<Item = Formula>, conclusion: Formula) -> Self {
        Self {
            assumptions: assumptions.into_iter().collect(),
            conclusion,
        }
    }

    pub fn assumptions(&self) -> &[Formula] {
        &self.assumptions
    }

    pub fn conclusion(&self) -> &Formula {
        &self.conclusion
    }

    /// All variable names used in the assumptions and the conclusion.
    pub fn variables(&self) -> BTreeSet<String> {
        self.assumptions
            .iter()
            .chain(std::iter::once(&self.conclusion))
            .flat_map(|f| f.variables().iter().cloned())
            .collect()
    }
}

impl fmt::Display for InferenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, assumption) in self.assumptions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", assumption)?;
        }
        write!(f, "] ==> {}", self.conclusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_rule_variables_and_display() {
        let rule = InferenceRule::new(
            [Formula::parse("(p->q)").unwrap(), Formula::parse("p").unwrap()],
            Formula::parse("(q|r)").unwrap(),
        );
        let expected: BTreeSet<String> = ["p", "q", "r"].iter().map(|s| s.to_string()).collect();
        assert_eq!(rule.variables(), expected);
        assert_eq!(rule.to_string(), "[(p->q), p] ==> (q|r)");
        assert_eq!(rule.assumptions().len(), 2);
    }

    #[test]
    fn test_rule_without_assumptions() {
        let rule = InferenceRule::new([], Formula::parse("(p|~p)").unwrap());
        assert_eq!(rule.to_string(), "[] ==> (p|~p)");
    }
}
