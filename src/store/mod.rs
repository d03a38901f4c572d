//! Fact store implementation
//!
//! A store holds the set of known ground facts, deduplicated by structural
//! equality. Iteration order is insertion order, which keeps inference runs
//! and printed output deterministic.

use indexmap::IndexSet;

use crate::term::Predicate;

/// A deduplicated set of ground facts
///
/// The ground invariant is enforced by the engine's `add_fact`; every
/// predicate inside the store is variable-free.
#[derive(Clone, Debug, Default)]
pub struct FactStore {
    facts: IndexSet<Predicate>,
}

impl FactStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fact, returning `true` if it was not already present
    pub fn insert(&mut self, fact: Predicate) -> bool {
        debug_assert!(fact.is_ground(), "fact store accepts only ground predicates");
        self.facts.insert(fact)
    }

    /// Check if the store contains a fact
    pub fn contains(&self, fact: &Predicate) -> bool {
        self.facts.contains(fact)
    }

    /// Number of facts
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterate over all facts in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.facts.iter()
    }

    /// Clear all facts
    pub fn clear(&mut self) {
        self.facts.clear();
    }

    /// Clone the facts into an owned set
    pub fn to_set(&self) -> IndexSet<Predicate> {
        self.facts.clone()
    }
}

impl Extend<Predicate> for FactStore {
    fn extend<I: IntoIterator<Item = Predicate>>(&mut self, iter: I) {
        for fact in iter {
            self.insert(fact);
        }
    }
}

impl<'a> IntoIterator for &'a FactStore {
    type Item = &'a Predicate;
    type IntoIter = indexmap::set::Iter<'a, Predicate>;

    fn into_iter(self) -> Self::IntoIter {
        self.facts.iter()
    }
}
