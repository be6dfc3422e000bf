//! Semantic analysis: models, evaluation and truth tables.
//!
//! All checks here are brute force over the full truth table, so their cost
//! is exponential in the number of variables.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Write};

use log::debug;
use num_bigint::BigUint;

use crate::proofs::InferenceRule;
use crate::syntax::{is_variable, Formula, Node};

/// An assignment of truth values to variable names.
pub type Model = BTreeMap<String, bool>;

/// Checks that every key of the model is a variable name.
pub fn is_model(model: &Model) -> bool {
    model.keys().all(|v| is_variable(v))
}

/// Variable names over which the model is defined.
pub fn variables(model: &Model) -> BTreeSet<&str> {
    assert!(is_model(model), "Invalid model {:?}", model);
    model.keys().map(String::as_str).collect()
}

/// Calculates the truth value of the formula in the model.
///
/// # Panics
///
/// Panics if the model is invalid or does not assign some variable of the formula.
pub fn evaluate(formula: &Formula, model: &Model) -> bool {
    assert!(is_model(model), "Invalid model {:?}", model);
    if let Some(missing) = formula.variables().iter().find(|v| !model.contains_key(*v)) {
        panic!("Model {:?} does not assign variable `{}`", model, missing);
    }
    eval(formula, model)
}

fn eval(formula: &Formula, model: &Model) -> bool {
    match formula.node() {
        Node::Variable(name) => model[name],
        Node::Constant(value) => *value,
        Node::Not(first) => !eval(first, model),
        Node::Binary(op, first, second) => op.apply(eval(first, model), eval(second, model)),
    }
}

/// Iterator over all models of a sequence of variables, see [`all_models`].
#[derive(Debug, Clone)]
pub struct AllModels {
    variables: Vec<String>,
    next: u64,
    end: u64,
}

impl Iterator for AllModels {
    type Item = Model;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let row = self.next;
        self.next += 1;
        let n = self.variables.len();
        let model = self
            .variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), (row >> (n - 1 - i)) & 1 == 1))
            .collect();
        Some(model)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.end - self.next).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

/// Enumerates all models over the given variables.
///
/// The order is lexicographic in the order of `variables`, with `false`
/// before `true`: the first variable changes slowest. Callers zip this
/// sequence against truth-table values, so the order is part of the contract.
///
/// # Panics
///
/// Panics if a name is not a variable name, or if there are 64 or more variables.
pub fn all_models<S: AsRef<str>>(variables: &[S]) -> AllModels {
    let variables: Vec<String> = variables.iter().map(|v| v.as_ref().to_string()).collect();
    for v in &variables {
        assert!(is_variable(v), "`{}` is not a variable name", v);
    }
    assert!(variables.len() < 64, "Too many variables: {}", variables.len());
    let end = 1u64 << variables.len();
    AllModels { variables, next: 0, end }
}

/// Truth values of the formula in each of the given models, in order.
pub fn truth_values(formula: &Formula, models: impl IntoIterator<Item = Model>) -> Vec<bool> {
    models.into_iter().map(|model| evaluate(formula, &model)).collect()
}

fn sorted_variables(formula: &Formula) -> Vec<&str> {
    // `BTreeSet` iterates in sorted order already.
    formula.variables().iter().map(String::as_str).collect()
}

/// Writes the truth table of the formula, with variable columns sorted
/// alphabetically:
///
/// ```text
/// | p | q76 | ~(p&q76) |
/// |---|-----|----------|
/// | F | F   | T        |
/// | F | T   | T        |
/// | T | F   | T        |
/// | T | T   | F        |
/// ```
pub fn write_truth_table(formula: &Formula, dest: &mut impl Write) -> io::Result<()> {
    let variables = sorted_variables(formula);
    let mut columns: Vec<&str> = variables.clone();
    columns.push(formula.as_str());

    writeln!(dest, "| {} |", columns.join(" | "))?;
    let dashes: Vec<String> = columns.iter().map(|c| "-".repeat(c.len())).collect();
    writeln!(dest, "|-{}-|", dashes.join("-|-"))?;

    for model in all_models(&variables) {
        let cells = variables
            .iter()
            .map(|v| model[*v])
            .chain(std::iter::once(eval(formula, &model)))
            .zip(&columns)
            .map(|(value, column)| format!("{:<width$}", if value { "T" } else { "F" }, width = column.len()))
            .collect::<Vec<_>>();
        writeln!(dest, "| {} |", cells.join(" | "))?;
    }
    Ok(())
}

/// Prints the truth table of the formula to stdout, see [`write_truth_table`].
pub fn print_truth_table(formula: &Formula) -> io::Result<()> {
    write_truth_table(formula, &mut io::stdout().lock())
}

/// Checks if the formula is true in every model.
pub fn is_tautology(formula: &Formula) -> bool {
    let variables = sorted_variables(formula);
    all_models(&variables).all(|model| eval(formula, &model))
}

/// Checks if the formula is false in every model.
pub fn is_contradiction(formula: &Formula) -> bool {
    !is_satisfiable(formula)
}

/// Checks if the formula is true in some model.
pub fn is_satisfiable(formula: &Formula) -> bool {
    let variables = sorted_variables(formula);
    all_models(&variables).any(|model| eval(formula, &model))
}

/// Checks if both formulas have the same truth value in every model over
/// the variables of either of them.
pub fn is_equivalent(first: &Formula, second: &Formula) -> bool {
    let variables: Vec<&str> = first
        .variables()
        .union(second.variables())
        .map(String::as_str)
        .collect();
    all_models(&variables).all(|model| eval(first, &model) == eval(second, &model))
}

/// Counts the models over `variables` in which the formula is true.
///
/// `variables` must cover all variables of the formula; every variable not
/// occurring in the formula doubles the count.
pub fn count_models<S: AsRef<str>>(formula: &Formula, variables: &[S]) -> BigUint {
    let variables: BTreeSet<&str> = variables.iter().map(|v| v.as_ref()).collect();
    for v in formula.variables() {
        assert!(variables.contains(v.as_str()), "Variable `{}` is not counted over", v);
    }
    let own = sorted_variables(formula);
    let count = all_models(&own).filter(|model| eval(formula, model)).count();
    let free = variables.len() - own.len();
    debug!("count_models(own = {}, free = {}) -> {} << {}", own.len(), free, count, free);
    BigUint::from(count) << free
}

/// Checks if the inference rule holds in the model: it fails only when all
/// assumptions are true and the conclusion is false.
pub fn evaluate_inference(rule: &InferenceRule, model: &Model) -> bool {
    assert!(is_model(model), "Invalid model {:?}", model);
    for v in rule.variables() {
        assert!(model.contains_key(&v), "Model {:?} does not assign variable `{}`", model, v);
    }
    !(rule.assumptions().iter().all(|a| evaluate(a, model)) && !evaluate(rule.conclusion(), model))
}

/// Checks if the conclusion of the rule holds in every model of its assumptions.
pub fn is_sound_inference(rule: &InferenceRule) -> bool {
    let variables: Vec<String> = rule.variables().into_iter().collect();
    all_models(&variables).all(|model| evaluate_inference(rule, &model))
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    fn parse(s: &str) -> Formula {
        Formula::parse(s).unwrap()
    }

    fn model(assignments: &[(&str, bool)]) -> Model {
        assignments.iter().map(|&(v, b)| (v.to_string(), b)).collect()
    }

    #[test]
    fn test_is_model() {
        assert!(is_model(&model(&[("p", true), ("q12", false)])));
        assert!(is_model(&Model::new()));
        assert!(!is_model(&model(&[("p", true), ("T", false)])));
    }

    #[test]
    fn test_model_variables() {
        let m = model(&[("p", true), ("q", false)]);
        assert_eq!(variables(&m), BTreeSet::from(["p", "q"]));
    }

    #[test]
    fn test_evaluate() {
        let f = parse("~(p&q76)");
        assert!(evaluate(&f, &model(&[("p", true), ("q76", false)])));
        assert!(!evaluate(&f, &model(&[("p", true), ("q76", true)])));
    }

    #[test]
    fn test_evaluate_all_operators() {
        let m = model(&[("p", true), ("q", false)]);
        let cases = [
            ("T", true),
            ("F", false),
            ("~q", true),
            ("(p&q)", false),
            ("(p|q)", true),
            ("(p->q)", false),
            ("(q->p)", true),
            ("(p+q)", true),
            ("(p<->q)", false),
            ("(p-&q)", true),
            ("(p-|q)", false),
        ];
        for (s, expected) in cases {
            assert_eq!(evaluate(&parse(s), &m), expected, "evaluating {}", s);
        }
    }

    #[test]
    fn test_evaluate_superset_model() {
        let m = model(&[("p", false), ("q", true), ("r", true)]);
        assert!(evaluate(&parse("(p->r)"), &m));
    }

    #[test]
    #[should_panic(expected = "does not assign variable `q`")]
    fn test_evaluate_missing_variable() {
        evaluate(&parse("(p&q)"), &model(&[("p", true)]));
    }

    #[test]
    #[should_panic(expected = "Invalid model")]
    fn test_evaluate_invalid_model() {
        evaluate(&parse("p"), &model(&[("p", true), ("A", true)]));
    }

    #[test]
    fn test_all_models_order() {
        let models: Vec<Model> = all_models(&["p", "q"]).collect();
        assert_eq!(
            models,
            vec![
                model(&[("p", false), ("q", false)]),
                model(&[("p", false), ("q", true)]),
                model(&[("p", true), ("q", false)]),
                model(&[("p", true), ("q", true)]),
            ]
        );

        let models: Vec<Model> = all_models(&["q", "p"]).collect();
        assert_eq!(models[1], model(&[("q", false), ("p", true)]));
        assert_eq!(models[2], model(&[("q", true), ("p", false)]));
    }

    #[test]
    fn test_all_models_empty() {
        let models: Vec<Model> = all_models::<&str>(&[]).collect();
        assert_eq!(models, vec![Model::new()]);
    }

    #[test]
    fn test_all_models_size_hint() {
        let models = all_models(&["p", "q", "r"]);
        assert_eq!(models.size_hint(), (8, Some(8)));
        assert_eq!(models.count(), 8);
    }

    #[test]
    fn test_truth_values() {
        let values = truth_values(&parse("~(p&q76)"), all_models(&["p", "q76"]));
        assert_eq!(values, vec![true, true, true, false]);
    }

    #[test]
    fn test_write_truth_table() {
        let mut out = Vec::new();
        write_truth_table(&parse("~(p&q76)"), &mut out).unwrap();
        let expected = "\
| p | q76 | ~(p&q76) |
|---|-----|----------|
| F | F   | T        |
| F | T   | T        |
| T | F   | T        |
| T | T   | F        |
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_write_truth_table_sorts_variables() {
        let mut out = Vec::new();
        write_truth_table(&parse("(r|p)"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().next(), Some("| p | r | (r|p) |"));
        assert_eq!(text.lines().nth(3), Some("| F | T | T     |"));
    }

    #[test]
    fn test_write_truth_table_constant() {
        let mut out = Vec::new();
        write_truth_table(&parse("~T"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "| ~T |\n|----|\n| F  |\n");
    }

    #[test]
    fn test_tautology_contradiction_satisfiable() {
        assert!(is_tautology(&parse("(p|~p)")));
        assert!(!is_tautology(&parse("(p|q)")));
        assert!(is_contradiction(&parse("(p&~p)")));
        assert!(!is_contradiction(&parse("(p&q)")));
        assert!(is_satisfiable(&parse("p")));
        assert!(!is_satisfiable(&parse("(p-|~p)")));
    }

    #[test]
    fn test_variable_free_formulas() {
        assert!(is_tautology(&parse("T")));
        assert!(is_contradiction(&parse("F")));
        assert!(is_satisfiable(&parse("(F->F)")));
        assert!(!is_satisfiable(&parse("~(T|F)")));
    }

    #[test]
    fn test_is_equivalent() {
        assert!(is_equivalent(&parse("(p->q)"), &parse("(~p|q)")));
        assert!(is_equivalent(&parse("T"), &parse("(r|~r)")));
        assert!(!is_equivalent(&parse("(p->q)"), &parse("(q->p)")));
        assert!(!is_equivalent(&parse("p"), &parse("(p&q)")));
    }

    #[test]
    fn test_count_models() {
        assert_eq!(count_models(&parse("(p|q)"), &["p", "q"]), BigUint::from(3u32));
        assert_eq!(count_models(&parse("(p|q)"), &["p", "q", "r"]), BigUint::from(6u32));
        assert_eq!(count_models(&parse("F"), &["p"]), BigUint::from(0u32));

        let many: Vec<String> = (0..100).map(|i| format!("x{}", i)).collect();
        assert_eq!(count_models(&parse("x0"), &many), BigUint::from(1u32) << 99);
    }

    #[test]
    #[should_panic(expected = "is not counted over")]
    fn test_count_models_missing_variable() {
        count_models(&parse("(p|q)"), &["p"]);
    }

    #[test]
    fn test_evaluate_inference() {
        let rule = InferenceRule::new([parse("p")], parse("q"));
        assert!(!evaluate_inference(&rule, &model(&[("p", true), ("q", false)])));
        assert!(evaluate_inference(&rule, &model(&[("p", false), ("q", false)])));
        assert!(evaluate_inference(&rule, &model(&[("p", true), ("q", true)])));
    }

    #[test]
    #[should_panic(expected = "does not assign variable `q`")]
    fn test_evaluate_inference_requires_all_rule_variables() {
        let rule = InferenceRule::new([parse("p")], parse("q"));
        evaluate_inference(&rule, &model(&[("p", false)]));
    }

    #[test]
    fn test_is_sound_inference() {
        let modus_ponens = InferenceRule::new([parse("p"), parse("(p->q)")], parse("q"));
        assert!(is_sound_inference(&modus_ponens));

        let affirming_consequent = InferenceRule::new([parse("q"), parse("(p->q)")], parse("p"));
        assert!(!is_sound_inference(&affirming_consequent));

        let excluded_middle = InferenceRule::new([], parse("(r|~r)"));
        assert!(is_sound_inference(&excluded_middle));

        let explosion = InferenceRule::new([parse("(p&~p)")], parse("z"));
        assert!(is_sound_inference(&explosion));
    }
}
