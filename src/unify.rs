//! Unification of first-order terms
//!
//! Implements syntactic unification with occurs check over the [`Term`]
//! model. Bindings accumulate in a [`Substitution`]; variables may be bound
//! to other variables, so lookups follow binding chains rather than eagerly
//! rewriting existing entries.
//!
//! Unification failure is a normal negative outcome, not an error: `unify`
//! returns `false` and may leave the substitution partially extended.
//! Backtracking callers extend a private copy and discard it on failure.

use fnv::FnvHashMap;

use crate::term::{Predicate, Term, Variable};

/// A substitution mapping variables to terms
///
/// Built incrementally during unification. Keys are unique; a binding is
/// never overwritten once recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitution {
    bindings: FnvHashMap<Variable, Term>,
}

impl Substitution {
    /// Create an empty substitution
    pub fn new() -> Self {
        Substitution {
            bindings: FnvHashMap::default(),
        }
    }

    /// Look up the direct binding of a variable
    pub fn get(&self, var: &Variable) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// Check if the substitution has no bindings
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Number of bound variables
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Record a new binding
    ///
    /// Callers must ensure the variable is unbound and the occurs check has
    /// passed; `unify` is the only intended writer.
    fn bind(&mut self, var: Variable, term: Term) {
        debug_assert!(!self.bindings.contains_key(&var));
        self.bindings.insert(var, term);
    }

    /// Resolve a term one variable chain at a time
    ///
    /// If the term is a variable bound in this substitution, follow its
    /// binding (and any further variable-to-variable links) until reaching a
    /// non-variable term or an unbound variable. Any other term is returned
    /// unchanged; compound arguments are not rewritten.
    pub fn resolve(&self, term: &Term) -> Term {
        let mut current = term;
        while let Term::Variable(v) = current {
            match self.bindings.get(v) {
                Some(bound) => current = bound,
                None => break,
            }
        }
        current.clone()
    }

    /// Apply the substitution fully, replacing every reachable variable by
    /// its resolved binding
    ///
    /// Unbound variables pass through unchanged; compound terms are rebuilt
    /// with substituted arguments, preserving functor and arity.
    pub fn apply(&self, term: &Term) -> Term {
        match self.resolve(term) {
            Term::Predicate(p) => Term::Predicate(self.apply_predicate(&p)),
            resolved => resolved,
        }
    }

    /// Apply the substitution to every argument of a predicate
    pub fn apply_predicate(&self, pred: &Predicate) -> Predicate {
        Predicate {
            functor: pred.functor.clone(),
            args: pred.args.iter().map(|a| self.apply(a)).collect(),
        }
    }

    /// Occurs check: would `var` appear inside the resolved structure of
    /// `term`?
    ///
    /// Follows bindings of every variable encountered inside `term`, so a
    /// chain ?x -> ?y with `term` containing ?y still reports an occurrence
    /// of ?x's root. Used to reject bindings that would create an infinite
    /// (self-referential) structure.
    pub fn occurs(&self, var: &Variable, term: &Term) -> bool {
        match self.resolve(term) {
            Term::Variable(v) => v == *var,
            Term::Constant(_) => false,
            Term::Predicate(p) => p.args.iter().any(|a| self.occurs(var, a)),
        }
    }
}

/// Unify two terms, extending `subst` so both become identical after
/// resolution
///
/// Returns `true` on success. On failure the substitution may hold bindings
/// from partially unified arguments; callers that backtrack must work on a
/// private clone.
pub fn unify(x: &Term, y: &Term, subst: &mut Substitution) -> bool {
    if x == y {
        return true;
    }

    match (x, y) {
        (Term::Variable(v), t) => unify_variable(v, t, subst),
        (t, Term::Variable(v)) => unify_variable(v, t, subst),

        (Term::Predicate(p), Term::Predicate(q)) => {
            if p.functor != q.functor || p.args.len() != q.args.len() {
                return false;
            }
            // Later arguments observe bindings made by earlier ones.
            p.args
                .iter()
                .zip(&q.args)
                .all(|(a, b)| unify(a, b, subst))
        }

        // Unequal constants, or constant vs. predicate.
        _ => false,
    }
}

/// Unify two predicates under an evolving substitution
///
/// Requires identical functor and arity, then unifies the argument pairs
/// left to right.
pub fn unify_predicates(p: &Predicate, q: &Predicate, subst: &mut Substitution) -> bool {
    p.functor == q.functor
        && p.args.len() == q.args.len()
        && p.args.iter().zip(&q.args).all(|(a, b)| unify(a, b, subst))
}

/// Bind-or-merge step for a variable against a term
fn unify_variable(var: &Variable, term: &Term, subst: &mut Substitution) -> bool {
    // Never overwrite: unify through the existing binding instead.
    if let Some(bound) = subst.get(var) {
        let bound = bound.clone();
        return unify(&bound, term, subst);
    }

    if let Term::Variable(other) = term {
        if let Some(bound) = subst.get(other) {
            let bound = bound.clone();
            return unify(&Term::Variable(var.clone()), &bound, subst);
        }
    }

    if subst.occurs(var, term) {
        return false;
    }

    subst.bind(var.clone(), term.clone());
    true
}
