//! Error type for the prover's public API boundary.
//!
//! The calculus itself has no recoverable runtime errors: term operations
//! are total, unification returns failure rather than erroring, and sequent
//! construction cannot fail. The only genuine contract violation a caller
//! can trigger is asking a step-bounded driver for zero steps of search.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProverError {
    #[error("max_steps must be greater than zero")]
    EmptyBudget,
}
