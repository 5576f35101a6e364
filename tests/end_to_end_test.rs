// Scenario tests for the sequent-calculus prover.

use std::sync::Once;

use sequent_prover::prove::{prove_formula, prove_formula_bounded, prove_or_disprove};
use sequent_prover::term::Term;
use sequent_prover::Verdict;

static TRACING_INIT: Once = Once::new();

/// Enables `RUST_LOG`-driven tracing output for these tests; harmless, and
/// idempotent, if the caller doesn't set `RUST_LOG`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

fn pred(name: &str) -> Term {
    Term::Predicate(name.to_string(), vec![])
}

fn pred1(name: &str, arg: Term) -> Term {
    Term::Predicate(name.to_string(), vec![arg])
}

fn pred2(name: &str, a: Term, b: Term) -> Term {
    Term::Predicate(name.to_string(), vec![a, b])
}

#[test]
fn propositional_identity() {
    init_tracing();
    let p = pred("P");
    assert!(prove_formula(&p.clone().implies(p)));
}

#[test]
fn excluded_middle() {
    init_tracing();
    let p = pred("P");
    assert!(prove_formula(&p.clone().or(p.not())));
}

#[test]
fn de_morgan() {
    init_tracing();
    let p = pred("P");
    let q = pred("Q");

    // ¬(P ∧ Q) ⇒ (¬P ∨ ¬Q)
    let forward = p
        .clone()
        .and(q.clone())
        .not()
        .implies(p.clone().not().or(q.clone().not()));

    // (¬P ∨ ¬Q) ⇒ ¬(P ∧ Q)
    let backward = p.clone().not().or(q.clone().not()).implies(p.and(q).not());

    assert!(prove_formula(&forward.and(backward)));
}

#[test]
fn drinker_paradox() {
    init_tracing();
    // ∃x. (D(x) ⇒ ∀y. D(y))
    let formula = Term::ThereExists(
        "x".to_string(),
        Box::new(
            pred1("D", Term::Variable("x".to_string())).implies(Term::ForAll(
                "y".to_string(),
                Box::new(pred1("D", Term::Variable("y".to_string()))),
            )),
        ),
    );
    assert!(prove_formula(&formula));
}

#[test]
fn quantifier_swap_is_not_a_tautology() {
    init_tracing();
    // (∀x. ∃y. R(x,y)) ⇒ (∃y. ∀x. R(x,y))
    let inner = pred2("R", Term::Variable("x".to_string()), Term::Variable("y".to_string()));
    let lhs = Term::ForAll(
        "x".to_string(),
        Box::new(Term::ThereExists("y".to_string(), Box::new(inner.clone()))),
    );
    let rhs = Term::ThereExists(
        "y".to_string(),
        Box::new(Term::ForAll("x".to_string(), Box::new(inner))),
    );
    let formula = lhs.implies(rhs);

    let result = prove_formula_bounded(&formula, 500).expect("non-zero budget");
    assert_ne!(result, Some(true));
}

#[test]
fn disproof_via_negation() {
    init_tracing();
    let p = pred("P");
    let contradiction = p.clone().and(p.not());
    assert_eq!(prove_or_disprove(&contradiction), Verdict::False);
}

#[test]
fn bare_atom_is_unknown_within_budget() {
    init_tracing();
    use sequent_prover::prove::prove_or_disprove_bounded;
    let p = pred("P");
    let result = prove_or_disprove_bounded(&p, 200).expect("non-zero budget");
    assert!(matches!(result, None | Some(Verdict::Unknown)));
}
