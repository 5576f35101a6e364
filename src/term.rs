//! Terms and formulas of the calculus.
//!
//! A [`Term`] is simultaneously a first-order term (`Variable`, `Function`)
//! and a formula (`Predicate`, `Not`, `And`, ...) — the calculus makes no
//! syntactic distinction between the two, since a `Predicate` is just an
//! atomic formula built from terms. Equality, hashing and ordering are all
//! structural, derived directly from the enum shape, so a `Term` can key a
//! `BTreeSet`, a `HashSet`, or a `HashMap` without any extra bookkeeping.

use std::collections::BTreeSet;
use std::fmt;

/// A term or formula of the calculus.
///
/// `Variable` is a bound or free object variable; `UnificationTerm` is a
/// metavariable introduced when a quantifier is instantiated lazily (left-∀,
/// right-∃), and is only ever bound by [`crate::unify::unify`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Variable(String),
    UnificationTerm(String),
    Function(String, Vec<Term>),
    Predicate(String, Vec<Term>),
    Not(Box<Term>),
    And(Box<Term>, Box<Term>),
    Or(Box<Term>, Box<Term>),
    Implies(Box<Term>, Box<Term>),
    ForAll(String, Box<Term>),
    ThereExists(String, Box<Term>),
}

impl Term {
    /// Shorthand for `Not(Box::new(self))`.
    pub fn not(self) -> Term {
        Term::Not(Box::new(self))
    }

    /// Shorthand for `And(Box::new(self), Box::new(other))`.
    pub fn and(self, other: Term) -> Term {
        Term::And(Box::new(self), Box::new(other))
    }

    /// Shorthand for `Or(Box::new(self), Box::new(other))`.
    pub fn or(self, other: Term) -> Term {
        Term::Or(Box::new(self), Box::new(other))
    }

    /// Shorthand for `Implies(Box::new(self), Box::new(other))`.
    pub fn implies(self, other: Term) -> Term {
        Term::Implies(Box::new(self), Box::new(other))
    }

    /// `true` for the atomic variants: `Variable`, `UnificationTerm`,
    /// `Function` and `Predicate`. Atomic formulas are never reduced by the
    /// engine's propositional rules (see `engine::step`).
    pub fn is_atomic(&self) -> bool {
        matches!(
            self,
            Term::Variable(_) | Term::UnificationTerm(_) | Term::Function(_, _) | Term::Predicate(_, _)
        )
    }

    /// Object variables free in this term. `ForAll`/`ThereExists` bind their
    /// own variable, removing it from the free set of their body.
    pub fn fv(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.fv_into(&mut out);
        out
    }

    fn fv_into(&self, out: &mut BTreeSet<String>) {
        match self {
            Term::Variable(name) => {
                out.insert(name.clone());
            }
            Term::UnificationTerm(_) => {}
            Term::Function(_, args) | Term::Predicate(_, args) => {
                for arg in args {
                    arg.fv_into(out);
                }
            }
            Term::Not(f) => f.fv_into(out),
            Term::And(a, b) | Term::Or(a, b) | Term::Implies(a, b) => {
                a.fv_into(out);
                b.fv_into(out);
            }
            Term::ForAll(v, body) | Term::ThereExists(v, body) => {
                let mut inner = BTreeSet::new();
                body.fv_into(&mut inner);
                inner.remove(v);
                out.extend(inner);
            }
        }
    }

    /// Unification variables occurring anywhere in this term.
    pub fn ft(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.ft_into(&mut out);
        out
    }

    fn ft_into(&self, out: &mut BTreeSet<String>) {
        match self {
            Term::Variable(_) => {}
            Term::UnificationTerm(name) => {
                out.insert(name.clone());
            }
            Term::Function(_, args) | Term::Predicate(_, args) => {
                for arg in args {
                    arg.ft_into(out);
                }
            }
            Term::Not(f) => f.ft_into(out),
            Term::And(a, b) | Term::Or(a, b) | Term::Implies(a, b) => {
                a.ft_into(out);
                b.ft_into(out);
            }
            Term::ForAll(_, body) | Term::ThereExists(_, body) => body.ft_into(out),
        }
    }

    /// Whether `self` occurs anywhere inside `other` (including `self ==
    /// other`). Used by the occurs check in [`crate::unify::unify`] to
    /// reject binding a unification variable to a term that contains it.
    pub fn occurs(&self, other: &Term) -> bool {
        if self == other {
            return true;
        }
        match other {
            Term::Variable(_) | Term::UnificationTerm(_) => false,
            Term::Function(_, args) | Term::Predicate(_, args) => {
                args.iter().any(|arg| self.occurs(arg))
            }
            Term::Not(f) => self.occurs(f),
            Term::And(a, b) | Term::Or(a, b) | Term::Implies(a, b) => {
                self.occurs(a) || self.occurs(b)
            }
            Term::ForAll(_, body) | Term::ThereExists(_, body) => self.occurs(body),
        }
    }

    /// Capture-avoiding substitution: replaces every free occurrence of
    /// `old` by `new`. A binder that re-binds `old`'s name shadows it, so
    /// `replace` stops recursing into that binder's body.
    ///
    /// Correct only when `new` introduces no name that a binder inside
    /// `self` would capture; the engine only ever substitutes names drawn
    /// fresh from `Sequent::fresh_variable_name`/`fresh_unification_name`,
    /// so that precondition always holds here.
    pub fn replace(&self, old: &Term, new: &Term) -> Term {
        if self == old {
            return new.clone();
        }
        match self {
            Term::Variable(_) | Term::UnificationTerm(_) => self.clone(),
            Term::Function(name, args) => {
                Term::Function(name.clone(), args.iter().map(|a| a.replace(old, new)).collect())
            }
            Term::Predicate(name, args) => {
                Term::Predicate(name.clone(), args.iter().map(|a| a.replace(old, new)).collect())
            }
            Term::Not(f) => Term::Not(Box::new(f.replace(old, new))),
            Term::And(a, b) => Term::And(Box::new(a.replace(old, new)), Box::new(b.replace(old, new))),
            Term::Or(a, b) => Term::Or(Box::new(a.replace(old, new)), Box::new(b.replace(old, new))),
            Term::Implies(a, b) => {
                Term::Implies(Box::new(a.replace(old, new)), Box::new(b.replace(old, new)))
            }
            Term::ForAll(v, body) => {
                if *old == Term::Variable(v.clone()) {
                    self.clone()
                } else {
                    Term::ForAll(v.clone(), Box::new(body.replace(old, new)))
                }
            }
            Term::ThereExists(v, body) => {
                if *old == Term::Variable(v.clone()) {
                    self.clone()
                } else {
                    Term::ThereExists(v.clone(), Box::new(body.replace(old, new)))
                }
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(name) => write!(f, "{name}"),
            Term::UnificationTerm(name) => write!(f, "?{name}"),
            Term::Function(name, args) | Term::Predicate(name, args) => {
                if args.is_empty() {
                    write!(f, "{name}")
                } else {
                    write!(f, "{name}(")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    write!(f, ")")
                }
            }
            Term::Not(body) => write!(f, "¬{body}"),
            Term::And(a, b) => write!(f, "({a} ∧ {b})"),
            Term::Or(a, b) => write!(f, "({a} ∨ {b})"),
            Term::Implies(a, b) => write!(f, "({a} ⇒ {b})"),
            Term::ForAll(v, body) => write!(f, "∀{v}. {body}"),
            Term::ThereExists(v, body) => write!(f, "∃{v}. {body}"),
        }
    }
}
