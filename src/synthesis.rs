//! Synthesis of formulas from truth tables, in DNF and CNF.

use log::debug;

use crate::semantics::{all_models, is_model, Model};
use crate::syntax::{BinaryOp, Formula};

fn literal(variable: &str, positive: bool) -> Formula {
    let v = Formula::variable(variable);
    if positive {
        v
    } else {
        Formula::not(v)
    }
}

/// Left-nested chain `((a op b) op c) ...`, or `None` if there is nothing to join.
fn chain(op: BinaryOp, formulas: impl IntoIterator<Item = Formula>) -> Option<Formula> {
    formulas.into_iter().reduce(|acc, f| Formula::binary(op, acc, f))
}

fn model_clause<S: AsRef<str>>(model: &Model, variables: &[S], op: BinaryOp, polarity: bool) -> Option<Formula> {
    chain(
        op,
        variables.iter().map(|v| {
            let v = v.as_ref();
            literal(v, model[v] == polarity)
        }),
    )
}

/// Conjunction of literals that is true exactly in `model`, among all models
/// over the same variables. Literals follow the order of the model's keys.
///
/// # Panics
///
/// Panics if the model is invalid or empty.
pub fn synthesize_for_model(model: &Model) -> Formula {
    assert!(is_model(model), "Invalid model {:?}", model);
    let variables: Vec<&str> = model.keys().map(String::as_str).collect();
    model_clause(model, &variables, BinaryOp::And, true).expect("Cannot synthesize over an empty model")
}

/// Disjunction of literals that is false exactly in `model`, among all
/// models over the same variables.
///
/// # Panics
///
/// Panics if the model is invalid or empty.
pub fn synthesize_for_all_except_model(model: &Model) -> Formula {
    assert!(is_model(model), "Invalid model {:?}", model);
    let variables: Vec<&str> = model.keys().map(String::as_str).collect();
    model_clause(model, &variables, BinaryOp::Or, false).expect("Cannot synthesize over an empty model")
}

/// Synthesizes a formula in DNF with the given truth table.
///
/// `values` lists the truth value for every model in the order of
/// [`all_models`]`(variables)`. Rows without a value are treated as false.
///
/// ```
/// use propositions::semantics::{all_models, truth_values};
/// use propositions::synthesis::synthesize;
///
/// let f = synthesize(&["p", "q"], [true, true, true, false]);
/// assert_eq!(truth_values(&f, all_models(&["p", "q"])), vec![true, true, true, false]);
/// ```
///
/// # Panics
///
/// Panics if `variables` is empty.
pub fn synthesize<S: AsRef<str>>(variables: &[S], values: impl IntoIterator<Item = bool>) -> Formula {
    assert!(!variables.is_empty(), "Cannot synthesize over an empty set of variables");
    let clauses: Vec<Formula> = all_models(variables)
        .zip(values)
        .filter(|(_, value)| *value)
        .filter_map(|(model, _)| model_clause(&model, variables, BinaryOp::And, true))
        .collect();
    debug!("synthesize: {} true rows over {} variables", clauses.len(), variables.len());
    chain(BinaryOp::Or, clauses).unwrap_or_else(|| {
        let v = variables[0].as_ref();
        Formula::and(literal(v, true), literal(v, false))
    })
}

/// Synthesizes a formula in CNF with the given truth table.
///
/// The dual of [`synthesize`]: one clause excludes each false row.
/// Rows without a value are treated as true.
///
/// # Panics
///
/// Panics if `variables` is empty.
pub fn synthesize_cnf<S: AsRef<str>>(variables: &[S], values: impl IntoIterator<Item = bool>) -> Formula {
    assert!(!variables.is_empty(), "Cannot synthesize over an empty set of variables");
    let clauses: Vec<Formula> = all_models(variables)
        .zip(values)
        .filter(|(_, value)| !*value)
        .filter_map(|(model, _)| model_clause(&model, variables, BinaryOp::Or, false))
        .collect();
    debug!("synthesize_cnf: {} false rows over {} variables", clauses.len(), variables.len());
    chain(BinaryOp::And, clauses).unwrap_or_else(|| {
        let v = variables[0].as_ref();
        Formula::or(literal(v, true), literal(v, false))
    })
}
