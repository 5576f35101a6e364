//! Top-level proof drivers.
//!
//! `prove`/`prove_formula`/`prove_or_disprove` drive a [`ProofSearch`] (or
//! two, interleaved) to completion and may not terminate on an undecided
//! formula — that is expected, not an error (see the crate's error-handling
//! design). The `*_bounded` variants give host code, and this crate's own
//! tests, a way to cap the search by step count instead.

use tracing::info;

use crate::engine::{goal_sequent, ProofSearch, StepOutcome};
use crate::error::ProverError;
use crate::sequent::Sequent;
use crate::term::Term;

/// Tri-valued result of [`prove_or_disprove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    True,
    False,
    Unknown,
}

/// Drives a [`ProofSearch`] over `sequent` to completion. Loops forever if
/// `sequent` is neither provable nor refutable by this calculus.
pub fn prove(sequent: &Sequent) -> bool {
    let mut search = ProofSearch::new(sequent.clone());
    loop {
        if let StepOutcome::Done(verdict) = search.step() {
            info!(%sequent, verdict, "proof search converged");
            return verdict;
        }
    }
}

/// `prove` over the sequent `⊢ formula`.
pub fn prove_formula(formula: &Term) -> bool {
    prove(&goal_sequent(formula.clone()))
}

/// Interleaves a search over `formula` and one over `¬formula`, one
/// `step()` each at a time, until one side converges to `Done(true)` or
/// both get stuck.
pub fn prove_or_disprove(formula: &Term) -> Verdict {
    let mut positive = Some(ProofSearch::new(goal_sequent(formula.clone())));
    let mut negative = Some(ProofSearch::new(goal_sequent(formula.clone().not())));

    loop {
        if let Some(search) = positive.as_mut() {
            match search.step() {
                StepOutcome::Done(true) => return Verdict::True,
                StepOutcome::Done(false) => positive = None,
                StepOutcome::Running => {}
            }
        }
        if let Some(search) = negative.as_mut() {
            match search.step() {
                StepOutcome::Done(true) => return Verdict::False,
                StepOutcome::Done(false) => negative = None,
                StepOutcome::Running => {}
            }
        }
        if positive.is_none() && negative.is_none() {
            return Verdict::Unknown;
        }
    }
}

/// Step-bounded variant of [`prove`]. `None` means `max_steps` was
/// exhausted before the search converged.
pub fn prove_bounded(sequent: &Sequent, max_steps: usize) -> Result<Option<bool>, ProverError> {
    if max_steps == 0 {
        return Err(ProverError::EmptyBudget);
    }
    let mut search = ProofSearch::new(sequent.clone());
    for _ in 0..max_steps {
        if let StepOutcome::Done(verdict) = search.step() {
            return Ok(Some(verdict));
        }
    }
    Ok(None)
}

/// Step-bounded variant of [`prove_formula`].
pub fn prove_formula_bounded(formula: &Term, max_steps: usize) -> Result<Option<bool>, ProverError> {
    prove_bounded(&goal_sequent(formula.clone()), max_steps)
}

/// Step-bounded variant of [`prove_or_disprove`]. The budget is counted
/// across both interleaved machines combined.
pub fn prove_or_disprove_bounded(
    formula: &Term,
    max_steps: usize,
) -> Result<Option<Verdict>, ProverError> {
    if max_steps == 0 {
        return Err(ProverError::EmptyBudget);
    }

    let mut positive = Some(ProofSearch::new(goal_sequent(formula.clone())));
    let mut negative = Some(ProofSearch::new(goal_sequent(formula.clone().not())));

    for _ in 0..max_steps {
        if let Some(search) = positive.as_mut() {
            match search.step() {
                StepOutcome::Done(true) => return Ok(Some(Verdict::True)),
                StepOutcome::Done(false) => positive = None,
                StepOutcome::Running => {}
            }
        }
        if let Some(search) = negative.as_mut() {
            match search.step() {
                StepOutcome::Done(true) => return Ok(Some(Verdict::False)),
                StepOutcome::Done(false) => negative = None,
                StepOutcome::Running => {}
            }
        }
        if positive.is_none() && negative.is_none() {
            return Ok(Some(Verdict::Unknown));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod test {
    use super::*;

    fn pred(name: &str) -> Term {
        Term::Predicate(name.to_string(), vec![])
    }

    #[test]
    fn propositional_identity_is_provable() {
        let p = pred("P");
        assert!(prove_formula(&p.clone().implies(p)));
    }

    #[test]
    fn excluded_middle_is_provable() {
        let p = pred("P");
        assert!(prove_formula(&p.clone().or(p.not())));
    }

    #[test]
    fn contradiction_disproves_via_negation() {
        let p = pred("P");
        let contradiction = p.clone().and(p.not());
        assert_eq!(prove_or_disprove(&contradiction), Verdict::False);
    }

    #[test]
    fn bare_atom_is_unknown_within_budget() {
        let p = pred("P");
        let result = prove_or_disprove_bounded(&p, 50).unwrap();
        assert!(matches!(result, None | Some(Verdict::Unknown)));
    }

    #[test]
    fn zero_step_budget_is_a_contract_violation() {
        let p = pred("P");
        assert_eq!(prove_formula_bounded(&p, 0), Err(ProverError::EmptyBudget));
        assert_eq!(prove_or_disprove_bounded(&p, 0), Err(ProverError::EmptyBudget));
    }

    #[test]
    fn bounded_matches_unbounded_on_convergent_formula() {
        let p = pred("P");
        let formula = p.clone().implies(p);
        assert_eq!(prove_formula_bounded(&formula, 100), Ok(Some(true)));
    }
}
