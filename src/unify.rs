//! Robinson-style syntactic unification over [`Term`](crate::term::Term).
//!
//! Only `UnificationTerm` names are ever bound by a substitution — object
//! `Variable`s unify only with themselves, never with a term. This mirrors
//! the calculus's separation between the bound/free object variables that
//! quantifiers range over and the metavariables a quantifier instantiation
//! introduces to stand in for a witness chosen later.

use std::collections::HashMap;

use crate::term::Term;

/// A mapping from unification-variable names to the terms they are bound
/// to. Not required to be idempotent or fully composed — the engine
/// re-applies it before each new `unify` call, which suffices.
pub type Substitution = HashMap<String, Term>;

/// Applies `subst` to every `UnificationTerm` in `term`, recursively.
pub fn apply_substitution(term: &Term, subst: &Substitution) -> Term {
    match term {
        Term::UnificationTerm(name) => match subst.get(name) {
            Some(bound) => apply_substitution(bound, subst),
            None => term.clone(),
        },
        Term::Variable(_) => term.clone(),
        Term::Function(name, args) => Term::Function(
            name.clone(),
            args.iter().map(|a| apply_substitution(a, subst)).collect(),
        ),
        Term::Predicate(name, args) => Term::Predicate(
            name.clone(),
            args.iter().map(|a| apply_substitution(a, subst)).collect(),
        ),
        Term::Not(f) => Term::Not(Box::new(apply_substitution(f, subst))),
        Term::And(a, b) => Term::And(
            Box::new(apply_substitution(a, subst)),
            Box::new(apply_substitution(b, subst)),
        ),
        Term::Or(a, b) => Term::Or(
            Box::new(apply_substitution(a, subst)),
            Box::new(apply_substitution(b, subst)),
        ),
        Term::Implies(a, b) => Term::Implies(
            Box::new(apply_substitution(a, subst)),
            Box::new(apply_substitution(b, subst)),
        ),
        Term::ForAll(v, body) => Term::ForAll(v.clone(), Box::new(apply_substitution(body, subst))),
        Term::ThereExists(v, body) => {
            Term::ThereExists(v.clone(), Box::new(apply_substitution(body, subst)))
        }
    }
}

/// Unifies two terms, returning a most-general substitution on success.
///
/// * Equal terms always succeed with the empty substitution, checked before
///   any binding is attempted — this is what keeps `unify(x, x)` for a
///   unification variable `x` from binding `x` to itself.
/// * If `a` is a unification variable, it is bound to `b` unless `a` occurs
///   in `b` (occurs check).
/// * Symmetrically for `b`.
/// * Two `Variable`s unify only if they are the same name.
/// * Two `Function`s or two `Predicate`s unify if their names and arities
///   match, threading the accumulated substitution through each successive
///   argument pair.
/// * Any other shape combination fails.
pub fn unify(a: &Term, b: &Term) -> Option<Substitution> {
    if a == b {
        return Some(Substitution::new());
    }
    if let Term::UnificationTerm(name) = a {
        if Term::UnificationTerm(name.clone()).occurs(b) {
            return None;
        }
        let mut subst = Substitution::new();
        subst.insert(name.clone(), b.clone());
        return Some(subst);
    }
    if let Term::UnificationTerm(name) = b {
        if Term::UnificationTerm(name.clone()).occurs(a) {
            return None;
        }
        let mut subst = Substitution::new();
        subst.insert(name.clone(), a.clone());
        return Some(subst);
    }
    match (a, b) {
        (Term::Variable(x), Term::Variable(y)) => {
            if x == y {
                Some(Substitution::new())
            } else {
                None
            }
        }
        (Term::Function(name_a, args_a), Term::Function(name_b, args_b))
        | (Term::Predicate(name_a, args_a), Term::Predicate(name_b, args_b)) => {
            if name_a != name_b || args_a.len() != args_b.len() {
                return None;
            }
            unify_pairs(args_a.iter().zip(args_b.iter()))
        }
        _ => None,
    }
}

fn unify_pairs<'a>(pairs: impl Iterator<Item = (&'a Term, &'a Term)>) -> Option<Substitution> {
    let mut substitution = Substitution::new();
    for (a, b) in pairs {
        let a = apply_substitution(a, &substitution);
        let b = apply_substitution(b, &substitution);
        let step = unify(&a, &b)?;
        for (k, v) in step {
            substitution.insert(k, v);
        }
    }
    Some(substitution)
}

/// Unifies an arbitrary list of `(left, right)` equations, threading the
/// accumulated substitution through each successive pair.
pub fn unify_list(pairs: &[(Term, Term)]) -> Option<Substitution> {
    unify_pairs(pairs.iter().map(|(a, b)| (a, b)))
}
