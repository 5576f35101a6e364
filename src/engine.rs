//! The proof-search engine: a fair, breadth-first reduction of sequents
//! with sibling-closure via unification.
//!
//! Modeled as an explicit state machine rather than a native generator
//! (stable Rust has none) so that [`crate::prove::prove_or_disprove`] can
//! interleave two searches one `step()` at a time.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use tracing::{debug, trace};

use crate::sequent::Sequent;
use crate::term::Term;
use crate::unify::unify_list;

/// Opaque id of a sequent within one [`ProofSearch`]'s arena.
pub type SequentId = u64;

/// Opaque id of a sibling group within one [`ProofSearch`]'s arena.
pub type GroupId = u64;

/// Outcome of a single [`ProofSearch::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The search made progress; more steps may be needed.
    Running,
    /// The search has converged: `true` if the goal sequent is provable,
    /// `false` if some branch got stuck with no further reduction possible.
    Done(bool),
}

/// A single proof-search machine over one goal sequent.
///
/// Owns its frontier, visited set, sequent arena, and sibling-group
/// side-tables. Nothing here is shared across `ProofSearch` instances, so
/// dropping one reclaims all of its state with no explicit teardown.
pub struct ProofSearch {
    frontier: VecDeque<SequentId>,
    visited: HashSet<Sequent>,
    arena: HashMap<SequentId, Sequent>,
    group_of: HashMap<SequentId, GroupId>,
    groups: HashMap<GroupId, HashSet<SequentId>>,
    depths: HashMap<Term, usize>,
    next_id: SequentId,
    next_group: GroupId,
    verdict: Option<bool>,
}

impl ProofSearch {
    /// Starts a new search with `goal` as the sole frontier entry.
    pub fn new(goal: Sequent) -> ProofSearch {
        let mut arena = HashMap::new();
        let mut visited = HashSet::new();
        let mut frontier = VecDeque::new();

        arena.insert(0, goal.clone());
        visited.insert(goal);
        frontier.push_back(0);

        ProofSearch {
            frontier,
            visited,
            arena,
            group_of: HashMap::new(),
            groups: HashMap::new(),
            depths: HashMap::new(),
            next_id: 1,
            next_group: 0,
            verdict: None,
        }
    }

    /// `true` once this search has reported `Done(_)`.
    pub fn is_done(&self) -> bool {
        self.verdict.is_some()
    }

    fn alloc_sequent(&mut self, sequent: Sequent) -> SequentId {
        let id = self.next_id;
        self.next_id += 1;
        self.arena.insert(id, sequent);
        id
    }

    fn alloc_group(&mut self) -> GroupId {
        let id = self.next_group;
        self.next_group += 1;
        self.groups.insert(id, HashSet::new());
        id
    }

    fn enqueue_child(&mut self, child: Sequent, parent_group: Option<GroupId>) {
        if self.visited.contains(&child) {
            return;
        }
        self.visited.insert(child.clone());
        let id = self.alloc_sequent(child);
        self.frontier.push_back(id);
        if let Some(gid) = parent_group {
            self.group_of.insert(id, gid);
            self.groups.entry(gid).or_default().insert(id);
        }
    }

    fn remove_from_group(&mut self, id: SequentId) {
        if let Some(gid) = self.group_of.remove(&id) {
            if let Some(members) = self.groups.get_mut(&gid) {
                members.remove(&id);
            }
        }
    }

    /// Advances the search by one sequent. See module docs and the engine
    /// design notes for the full Step A–E reduction it performs.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(v) = self.verdict {
            return StepOutcome::Done(v);
        }

        let id = match self.frontier.pop_front() {
            Some(id) => id,
            None => {
                debug!("frontier empty, proof search succeeded");
                self.verdict = Some(true);
                return StepOutcome::Done(true);
            }
        };

        let sequent = self.arena.get(&id).expect("frontier id must be in arena").clone();
        trace!(sequent = %sequent, "stepping");

        // Step A: axiom check.
        if sequent.is_axiomatic() {
            trace!(sequent = %sequent, "axiomatic, discharged");
            self.remove_from_group(id);
            return StepOutcome::Running;
        }

        // Step B: sibling closure.
        if let Some(&gid) = self.group_of.get(&id) {
            if let Some(outcome) = self.try_close_group(id, gid) {
                return outcome;
            }
        }

        // Step C: propositional reductions.
        if let Some(children) = self.reduce_propositional(&sequent) {
            let group = self.group_of.get(&id).copied();
            for child in children {
                self.enqueue_child(child, group);
            }
            return StepOutcome::Running;
        }

        // Step D: fairness-controlled quantifier instantiation.
        if let Some(child) = self.instantiate_quantifier(&sequent) {
            let group = match self.group_of.get(&id).copied() {
                Some(gid) => Some(gid),
                None => Some(self.alloc_group()),
            };
            self.enqueue_child(child, group);
            return StepOutcome::Running;
        }

        // Step E: stuck.
        debug!(sequent = %sequent, "stuck, proof search failed");
        self.verdict = Some(false);
        StepOutcome::Done(false)
    }

    /// Attempts to close `id`'s sibling group. Returns `Some(outcome)` if a
    /// decision was made this step (closed or self-unlinked), `None` if the
    /// caller should fall through to Step C.
    fn try_close_group(&mut self, id: SequentId, gid: GroupId) -> Option<StepOutcome> {
        let members: Vec<SequentId> = self.groups.get(&gid)?.iter().copied().collect();
        if members.is_empty() {
            return None;
        }

        let mut per_member_pairs = Vec::with_capacity(members.len());
        let mut any_empty = false;
        for &member_id in &members {
            let member = self.arena.get(&member_id).expect("group member must be in arena");
            let pairs = member.unifiable_pairs();
            any_empty |= pairs.is_empty();
            per_member_pairs.push(pairs);
        }

        if any_empty {
            // Some member (not necessarily S) has zero candidates: S
            // unlinks itself from the group and falls through to Step C.
            self.remove_from_group(id);
            return None;
        }

        if cartesian_unify(&per_member_pairs) {
            for member_id in &members {
                self.frontier.retain(|f| f != member_id);
                self.group_of.remove(member_id);
            }
            self.groups.remove(&gid);
            trace!(group = gid, "sibling group closed");
            return Some(StepOutcome::Running);
        }

        None
    }

    fn reduce_propositional(&self, sequent: &Sequent) -> Option<Vec<Sequent>> {
        for formula in &sequent.left {
            // ForAll on the left is not reduced here; Step D's fairness
            // rule handles it so every instance gets revisited in turn.
            if formula.is_atomic() || matches!(formula, Term::ForAll(_, _)) {
                continue;
            }
            let mut rest_left = sequent.left.clone();
            rest_left.remove(formula);
            return Some(match formula {
                Term::Not(a) => {
                    let mut right = sequent.right.clone();
                    right.insert((**a).clone());
                    vec![Sequent::new(rest_left, right)]
                }
                Term::And(a, b) => {
                    let mut left = rest_left;
                    left.insert((**a).clone());
                    left.insert((**b).clone());
                    vec![Sequent::new(left, sequent.right.clone())]
                }
                Term::Or(a, b) => {
                    let mut left_a = rest_left.clone();
                    left_a.insert((**a).clone());
                    let mut left_b = rest_left;
                    left_b.insert((**b).clone());
                    vec![
                        Sequent::new(left_a, sequent.right.clone()),
                        Sequent::new(left_b, sequent.right.clone()),
                    ]
                }
                Term::Implies(a, b) => {
                    let mut right_with_a = sequent.right.clone();
                    right_with_a.insert((**a).clone());
                    let mut left_with_b = rest_left.clone();
                    left_with_b.insert((**b).clone());
                    vec![
                        Sequent::new(rest_left, right_with_a),
                        Sequent::new(left_with_b, sequent.right.clone()),
                    ]
                }
                Term::ThereExists(v, body) => {
                    let fresh = sequent.fresh_variable_name();
                    let instantiated =
                        body.replace(&Term::Variable(v.clone()), &Term::Variable(fresh));
                    let mut left = rest_left;
                    left.insert(instantiated);
                    vec![Sequent::new(left, sequent.right.clone())]
                }
                _ => unreachable!("is_atomic and the ForAll guard exclude all other variants"),
            });
        }

        for formula in &sequent.right {
            // ThereExists on the right is not reduced here; Step D's
            // fairness rule handles it the same way as left-∀.
            if formula.is_atomic() || matches!(formula, Term::ThereExists(_, _)) {
                continue;
            }
            let mut rest_right = sequent.right.clone();
            rest_right.remove(formula);
            return Some(match formula {
                Term::Not(a) => {
                    let mut left = sequent.left.clone();
                    left.insert((**a).clone());
                    vec![Sequent::new(left, rest_right)]
                }
                Term::And(a, b) => {
                    let mut right_a = rest_right.clone();
                    right_a.insert((**a).clone());
                    let mut right_b = rest_right;
                    right_b.insert((**b).clone());
                    vec![
                        Sequent::new(sequent.left.clone(), right_a),
                        Sequent::new(sequent.left.clone(), right_b),
                    ]
                }
                Term::Or(a, b) => {
                    let mut right = rest_right;
                    right.insert((**a).clone());
                    right.insert((**b).clone());
                    vec![Sequent::new(sequent.left.clone(), right)]
                }
                Term::Implies(a, b) => {
                    let mut left = sequent.left.clone();
                    left.insert((**a).clone());
                    let mut right = rest_right;
                    right.insert((**b).clone());
                    vec![Sequent::new(left, right)]
                }
                Term::ForAll(v, body) => {
                    let fresh = sequent.fresh_variable_name();
                    let instantiated =
                        body.replace(&Term::Variable(v.clone()), &Term::Variable(fresh));
                    let mut right = rest_right;
                    right.insert(instantiated);
                    vec![Sequent::new(sequent.left.clone(), right)]
                }
                _ => unreachable!("is_atomic and the ThereExists guard exclude all other variants"),
            });
        }

        None
    }

    fn instantiate_quantifier(&mut self, sequent: &Sequent) -> Option<Sequent> {
        let mut candidates: Vec<(Term, bool)> = Vec::new();
        for formula in &sequent.left {
            if matches!(formula, Term::ForAll(_, _)) {
                candidates.push((formula.clone(), true));
            }
        }
        for formula in &sequent.right {
            if matches!(formula, Term::ThereExists(_, _)) {
                candidates.push((formula.clone(), false));
            }
        }
        if candidates.is_empty() {
            return None;
        }

        let mut best: Option<(usize, usize, Term, bool)> = None;
        for (idx, (formula, is_left)) in candidates.into_iter().enumerate() {
            let depth = *self.depths.get(&formula).unwrap_or(&0);
            let better = match &best {
                None => true,
                Some((best_depth, _, _, best_is_left)) => {
                    depth < *best_depth || (depth == *best_depth && is_left && !best_is_left)
                }
            };
            if better {
                best = Some((depth, idx, formula, is_left));
            }
        }

        let (depth, _, formula, is_left) = best.expect("candidates was non-empty");
        self.depths.insert(formula.clone(), depth + 1);

        let fresh_name = sequent.fresh_unification_name();
        let fresh = Term::UnificationTerm(fresh_name);

        if is_left {
            let Term::ForAll(v, body) = &formula else {
                unreachable!("is_left candidates are always ForAll")
            };
            let instantiated = body.replace(&Term::Variable(v.clone()), &fresh);
            let mut left = sequent.left.clone();
            left.insert(instantiated);
            Some(Sequent::new(left, sequent.right.clone()))
        } else {
            let Term::ThereExists(v, body) = &formula else {
                unreachable!("right candidates are always ThereExists")
            };
            let instantiated = body.replace(&Term::Variable(v.clone()), &fresh);
            let mut right = sequent.right.clone();
            right.insert(instantiated);
            Some(Sequent::new(sequent.left.clone(), right))
        }
    }
}

/// Cartesian product, in lexicographic index order, over each member's
/// candidate `(left, right)` pairs; returns the first combination whose
/// pairs jointly unify.
fn cartesian_unify(per_member_pairs: &[Vec<(Term, Term, crate::unify::Substitution)>]) -> bool {
    let mut indices = vec![0usize; per_member_pairs.len()];
    loop {
        let equations: Vec<(Term, Term)> = indices
            .iter()
            .zip(per_member_pairs.iter())
            .map(|(&i, pairs)| {
                let (l, r, _) = &pairs[i];
                (l.clone(), r.clone())
            })
            .collect();
        if unify_list(&equations).is_some() {
            return true;
        }

        let mut pos = indices.len();
        loop {
            if pos == 0 {
                return false;
            }
            pos -= 1;
            indices[pos] += 1;
            if indices[pos] < per_member_pairs[pos].len() {
                break;
            }
            indices[pos] = 0;
        }
    }
}

/// Convenience: build a goal sequent's singleton-right form, used by
/// [`crate::prove::prove_formula`].
pub fn goal_sequent(formula: Term) -> Sequent {
    Sequent::new(BTreeSet::new(), BTreeSet::from([formula]))
}

#[cfg(test)]
mod test {
    use super::*;

    fn pred(name: &str) -> Term {
        Term::Predicate(name.to_string(), vec![])
    }

    fn run_to_completion(mut search: ProofSearch) -> bool {
        loop {
            if let StepOutcome::Done(v) = search.step() {
                return v;
            }
        }
    }

    #[test]
    fn axiomatic_goal_is_immediately_provable() {
        let a = pred("A");
        let goal = Sequent::new(BTreeSet::from([a.clone()]), BTreeSet::from([a]));
        assert!(run_to_completion(ProofSearch::new(goal)));
    }

    #[test]
    fn implication_identity_is_provable() {
        let p = pred("P");
        let goal = goal_sequent(p.clone().implies(p));
        assert!(run_to_completion(ProofSearch::new(goal)));
    }

    #[test]
    fn excluded_middle_is_provable() {
        let p = pred("P");
        let goal = goal_sequent(p.clone().or(p.not()));
        assert!(run_to_completion(ProofSearch::new(goal)));
    }

    #[test]
    fn bare_atom_gets_stuck() {
        let goal = goal_sequent(pred("P"));
        assert!(!run_to_completion(ProofSearch::new(goal)));
    }

    #[test]
    fn done_search_is_idempotent() {
        let p = pred("P");
        let goal = Sequent::new(BTreeSet::from([p.clone()]), BTreeSet::from([p]));
        let mut search = ProofSearch::new(goal);
        let first = search.step();
        assert_eq!(first, StepOutcome::Running);
        let verdict = loop {
            if let StepOutcome::Done(v) = search.step() {
                break v;
            }
        };
        assert_eq!(search.step(), StepOutcome::Done(verdict));
        assert_eq!(search.step(), StepOutcome::Done(verdict));
    }

    #[test]
    fn drinker_paradox_is_provable() {
        let d = |t: Term| Term::Predicate("D".to_string(), vec![t]);
        let body = Term::ForAll(
            "y".to_string(),
            Box::new(d(Term::Variable("y".to_string()))),
        );
        let formula = Term::ThereExists(
            "x".to_string(),
            Box::new(Term::Implies(
                Box::new(d(Term::Variable("x".to_string()))),
                Box::new(body),
            )),
        );
        let goal = goal_sequent(formula);
        assert!(run_to_completion(ProofSearch::new(goal)));
    }
}
