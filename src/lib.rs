//! # propositions: propositional logic formulas in Rust
//!
//! **`propositions`** is a small library for working with formulas of propositional logic.
//! It covers syntax (parsing and printing in two notations), semantics (evaluation, truth tables,
//! tautology and satisfiability checks), synthesis of formulas from truth tables, and conversion
//! of formulas to restricted sets of operators.
//!
//! ## Formulas
//!
//! A formula is a tree built from:
//!
//! - **variables**: a letter `p`..=`z` with an optional decimal suffix (`p`, `q76`, `x12`),
//! - **constants**: `T` and `F`,
//! - **negation**: `~`,
//! - **binary connectives**: `&` (and), `|` (or), `->` (implies), `+` (xor), `<->` (iff),
//!   `-&` (nand) and `-|` (nor).
//!
//! The standard notation fully parenthesizes every binary operation, e.g. `~((p&q76)->r)`.
//! Formulas are immutable and their subtrees are shared via reference counting,
//! so building derived formulas never copies existing ones.
//!
//! ## Basic Usage
//!
//! ```rust
//! use propositions::operators::to_nand;
//! use propositions::semantics::{evaluate, is_equivalent, is_tautology, Model};
//! use propositions::syntax::Formula;
//!
//! // 1. Parse a formula in standard notation
//! let f = Formula::parse("~(p&q76)").unwrap();
//!
//! // 2. Evaluate it in a model
//! let model = Model::from([("p".to_string(), true), ("q76".to_string(), false)]);
//! assert!(evaluate(&f, &model));
//!
//! // 3. Check properties
//! assert!(!is_tautology(&f));
//! assert!(is_tautology(&Formula::parse("(p|~p)").unwrap()));
//!
//! // 4. Convert to NAND only, keeping the truth table
//! let g = to_nand(&f);
//! assert!(is_equivalent(&f, &g));
//! ```
//!
//! ## Core Components
//!
//! - **[`syntax`]**: the [`Formula`][crate::syntax::Formula] type, its variables and operators.
//! - **[`parse`]**: standard and Polish notation readers and writers.
//! - **[`substitute`]**: substitution of variables and operators.
//! - **[`semantics`]**: models, evaluation, truth tables and inference rules.
//! - **[`synthesis`]**: DNF and CNF formulas from truth tables.
//! - **[`operators`]**: conversion to the bases `{~,&,|}`, `{~,&}`, `{-&}`, `{->,~}` and `{->,F}`.

pub mod operators;
pub mod parse;
pub mod proofs;
pub mod semantics;
pub mod substitute;
pub mod synthesis;
pub mod syntax;
