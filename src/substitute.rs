//! Variable and operator substitution.
//!
//! Both substitutions work in a single bottom-up pass: whatever a
//! replacement introduces is never substituted again. Subtrees that contain
//! nothing to replace are shared with the input instead of being rebuilt.

use std::collections::HashMap;

use log::debug;

use crate::syntax::{is_variable, Formula, Node, Operator};

impl Formula {
    /// Replaces every variable `v` that is a key of `substitution` with
    /// `substitution[v]`.
    ///
    /// Only variable occurrences of the current formula are replaced, not
    /// those coming from the substituted formulas:
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use propositions::syntax::Formula;
    ///
    /// let f = Formula::parse("((p->p)|r)").unwrap();
    /// let substitution = HashMap::from([
    ///     ("p".to_string(), Formula::parse("(q&r)").unwrap()),
    ///     ("r".to_string(), Formula::parse("p").unwrap()),
    /// ]);
    /// assert_eq!(f.substitute_variables(&substitution).to_string(), "(((q&r)->(q&r))|p)");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if a key of `substitution` is not a variable name.
    pub fn substitute_variables(&self, substitution: &HashMap<String, Formula>) -> Formula {
        for variable in substitution.keys() {
            assert!(is_variable(variable), "Substitution key `{}` is not a variable name", variable);
        }
        debug!(
            "substitute_variables(size = {}, keys = {:?})",
            self.size(),
            substitution.keys().collect::<Vec<_>>()
        );
        self.replace_variables(substitution)
    }

    fn replace_variables(&self, substitution: &HashMap<String, Formula>) -> Formula {
        if !self.variables().iter().any(|v| substitution.contains_key(v)) {
            return self.clone();
        }
        match self.node() {
            Node::Variable(name) => substitution[name].clone(),
            Node::Constant(_) => self.clone(),
            Node::Not(first) => Formula::not(first.replace_variables(substitution)),
            Node::Binary(op, first, second) => Formula::binary(
                *op,
                first.replace_variables(substitution),
                second.replace_variables(substitution),
            ),
        }
    }

    /// Replaces every constant or operator `op` that is a key of
    /// `substitution` with the template `substitution[op]`, in which `p`
    /// stands for the first operand and `q` for the second one.
    ///
    /// Operands are substituted before their parent, and operators
    /// introduced by a template are left as they are:
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use propositions::syntax::{Formula, Operator};
    ///
    /// let f = Formula::parse("((x&y)&~z)").unwrap();
    /// let substitution = HashMap::from([(Operator::AND, Formula::parse("~(~p|~q)").unwrap())]);
    /// assert_eq!(f.substitute_operators(&substitution).to_string(), "~(~~(~x|~y)|~~z)");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if a template uses variables other than `p` and `q`.
    pub fn substitute_operators(&self, substitution: &HashMap<Operator, Formula>) -> Formula {
        for (op, template) in substitution {
            assert!(
                template.variables().iter().all(|v| v == "p" || v == "q"),
                "Template `{}` for `{}` may only use variables `p` and `q`",
                template,
                op
            );
        }
        debug!(
            "substitute_operators(size = {}, keys = {:?})",
            self.size(),
            substitution.keys().collect::<Vec<_>>()
        );
        self.replace_operators(substitution)
    }

    fn replace_operators(&self, substitution: &HashMap<Operator, Formula>) -> Formula {
        if !self.operators().iter().any(|op| substitution.contains_key(op)) {
            return self.clone();
        }
        match self.node() {
            Node::Variable(_) => self.clone(),
            Node::Constant(value) => substitution[&Operator::constant(*value)].clone(),
            Node::Not(first) => {
                let first = first.replace_operators(substitution);
                match substitution.get(&Operator::Not) {
                    Some(template) => instantiate(template, first, None),
                    None => Formula::not(first),
                }
            }
            Node::Binary(op, first, second) => {
                let first = first.replace_operators(substitution);
                let second = second.replace_operators(substitution);
                match substitution.get(&Operator::Binary(*op)) {
                    Some(template) => instantiate(template, first, Some(second)),
                    None => Formula::binary(*op, first, second),
                }
            }
        }
    }
}

/// Binds `p` and `q` of an operator template to the given operands.
fn instantiate(template: &Formula, first: Formula, second: Option<Formula>) -> Formula {
    let mut binding = HashMap::from([("p".to_string(), first)]);
    if let Some(second) = second {
        binding.insert("q".to_string(), second);
    }
    template.replace_variables(&binding)
}
