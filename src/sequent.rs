//! Sequents: `left ⊢ right` judgements over the term algebra.
//!
//! Sibling-group membership is deliberately *not* a field here — a sequent's
//! identity is exactly its `(left, right)` pair, so two structurally equal
//! sequents (even one produced fresh by the engine and one already sitting
//! in the visited set) compare and hash equal regardless of which branch of
//! the search tree produced them. The engine tracks which sequent ids belong
//! to which sibling group in its own side-tables (see `engine::ProofSearch`).

use std::collections::BTreeSet;
use std::fmt;

use crate::term::Term;
use crate::unify::{unify, Substitution};

/// A two-sided sequent `left ⊢ right`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sequent {
    pub left: BTreeSet<Term>,
    pub right: BTreeSet<Term>,
}

impl Sequent {
    pub fn new(left: BTreeSet<Term>, right: BTreeSet<Term>) -> Sequent {
        Sequent { left, right }
    }

    /// Object variables free anywhere in this sequent.
    pub fn fv(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for f in self.left.iter().chain(self.right.iter()) {
            out.extend(f.fv());
        }
        out
    }

    /// Unification variables occurring anywhere in this sequent.
    pub fn ft(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        for f in self.left.iter().chain(self.right.iter()) {
            out.extend(f.ft());
        }
        out
    }

    /// Lowest `"v1"`, `"v2"`, ... not already free in this sequent.
    pub fn fresh_variable_name(&self) -> String {
        fresh_name("v", &self.fv())
    }

    /// Lowest `"t1"`, `"t2"`, ... not already a free term in this sequent.
    pub fn fresh_unification_name(&self) -> String {
        fresh_name("t", &self.ft())
    }

    /// `true` iff some formula appears on both sides.
    pub fn is_axiomatic(&self) -> bool {
        self.left.intersection(&self.right).next().is_some()
    }

    /// Every `(l, r)` pair with `l ∈ left`, `r ∈ right` that unifies,
    /// paired with the substitution unifying it.
    pub fn unifiable_pairs(&self) -> Vec<(Term, Term, Substitution)> {
        let mut out = Vec::new();
        for l in &self.left {
            for r in &self.right {
                if let Some(subst) = unify(l, r) {
                    out.push((l.clone(), r.clone(), subst));
                }
            }
        }
        out
    }
}

fn fresh_name(prefix: &str, taken: &BTreeSet<String>) -> String {
    let mut n = 1;
    loop {
        let candidate = format!("{prefix}{n}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

impl fmt::Display for Sequent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let left = self
            .left
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let right = self
            .right
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{left} ⊢ {right}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn pred(name: &str) -> Term {
        Term::Predicate(name.to_string(), vec![])
    }

    #[test]
    fn self_entailing_sequent_is_axiomatic() {
        let a = pred("A");
        let seq = Sequent::new(BTreeSet::from([a.clone()]), BTreeSet::from([a]));
        assert!(seq.is_axiomatic());
    }

    #[test]
    fn equality_ignores_construction_order() {
        let a = pred("A");
        let b = pred("B");
        let s1 = Sequent::new(
            BTreeSet::from([a.clone(), b.clone()]),
            BTreeSet::new(),
        );
        let s2 = Sequent::new(BTreeSet::from([b, a]), BTreeSet::new());
        assert_eq!(s1, s2);
    }

    #[test]
    fn fresh_variable_name_skips_taken_names() {
        let seq = Sequent::new(
            BTreeSet::from([Term::Variable("v1".to_string())]),
            BTreeSet::new(),
        );
        assert_eq!(seq.fresh_variable_name(), "v2");
    }

    #[test]
    fn non_axiomatic_sequent_has_no_unifiable_pairs_when_disjoint() {
        let seq = Sequent::new(BTreeSet::from([pred("A")]), BTreeSet::from([pred("B")]));
        assert!(seq.unifiable_pairs().is_empty());
    }

    #[test]
    fn unifiable_pairs_finds_matching_predicate() {
        let x = Term::UnificationTerm("t1".to_string());
        let a = Term::Function("a".to_string(), vec![]);
        let left = Term::Predicate("P".to_string(), vec![x]);
        let right = Term::Predicate("P".to_string(), vec![a]);
        let seq = Sequent::new(BTreeSet::from([left]), BTreeSet::from([right]));
        assert_eq!(seq.unifiable_pairs().len(), 1);
    }
}
