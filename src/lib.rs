//! # sequent_prover
//!
//! An automated theorem prover for classical first-order logic, built on a
//! two-sided sequent calculus extended with free unification variables.
//!
//! Given a closed formula, the engine searches for a proof; it answers
//! **provable**, **refutable** (the negation is provable), or runs forever
//! on formulas that are neither — the underlying problem is semidecidable,
//! so that third outcome is an expected property of the logic, not a bug.
//!
//! ## Briefly
//!
//! A [`term::Term`] is simultaneously a first-order term and a formula:
//! variables, function terms, predicate atoms, and the propositional
//! connectives and quantifiers all live in one recursive enum. A
//! [`sequent::Sequent`] pairs a left (antecedent) and right (succedent) set
//! of formulas. The [`engine::ProofSearch`] state machine performs a fair,
//! breadth-first reduction of a frontier of sequents, deferring quantifier
//! instantiation to fresh unification variables and closing branches by
//! [`unify::unify`]ing across groups of sibling sequents.
//!
//! ```
//! use sequent_prover::prove::prove_formula;
//! use sequent_prover::term::Term;
//!
//! let p = Term::Predicate("P".to_string(), vec![]);
//! assert!(prove_formula(&p.clone().implies(p)));
//! ```
//!
//! The top-level entry points are in [`prove`]: [`prove::prove_formula`] and
//! [`prove::prove_or_disprove`] may not terminate on an undecided formula by
//! design; [`prove::prove_formula_bounded`] and
//! [`prove::prove_or_disprove_bounded`] cap the search by step count for
//! callers (including this crate's own tests) that need a definite answer.

pub mod engine;
pub mod error;
pub mod prove;
pub mod sequent;
pub mod term;
pub mod unify;

pub use error::ProverError;
pub use prove::{prove, prove_bounded, prove_formula, prove_formula_bounded, prove_or_disprove, prove_or_disprove_bounded, Verdict};
pub use sequent::Sequent;
pub use term::Term;
