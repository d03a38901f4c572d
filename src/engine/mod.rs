//! Forward-chaining inference engine
//!
//! Implements the core saturation algorithm:
//! 1. Match rule antecedents against the fact store via unification
//! 2. Instantiate consequents from every complete solution
//! 3. Merge newly derived ground facts into the store
//! 4. Repeat until a fixpoint or the pass cap
//!
//! Each pass matches against the fact set as it stood when the pass began;
//! facts derived within a pass become visible in the next one. This keeps
//! the derived set independent of rule and fact iteration order.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{HornError, HornResult};
use crate::store::FactStore;
use crate::term::{Predicate, Variable};
use crate::unify::{unify_predicates, Substitution};

use fnv::FnvHashSet;

/// An inference rule: antecedents => consequent
///
/// Antecedent order is preserved; it only affects search order, never the
/// derived set. A rule is immutable once constructed and compared
/// structurally.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    /// Name/identifier for the rule (optional)
    pub name: Option<String>,
    /// Antecedent patterns (body), matched against facts
    pub antecedents: Vec<Predicate>,
    /// Consequent pattern (head), instantiated per solution
    pub consequent: Predicate,
}

impl Rule {
    /// Create a new rule
    pub fn new(antecedents: Vec<Predicate>, consequent: Predicate) -> Self {
        Rule {
            name: None,
            antecedents,
            consequent,
        }
    }

    /// Create a named rule
    pub fn named(
        name: impl Into<String>,
        antecedents: Vec<Predicate>,
        consequent: Predicate,
    ) -> Self {
        let mut rule = Self::new(antecedents, consequent);
        rule.name = Some(name.into());
        rule
    }

    /// All variables occurring in this rule
    pub fn variables(&self) -> FnvHashSet<Variable> {
        let mut vars = self.consequent.variables();
        for ant in &self.antecedents {
            for v in ant.variables() {
                vars.insert(v);
            }
        }
        vars
    }
}

/// Configuration for the engine
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Hard cap on saturation passes; forces termination even for rule sets
    /// that derive a structurally novel fact every pass
    pub max_passes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig { max_passes: 100 }
    }
}

/// How a saturation run ended
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// A full pass derived nothing new
    #[default]
    Fixpoint,
    /// The pass cap was hit before reaching a fixpoint; the rule set likely
    /// derives unboundedly many distinct facts
    PassLimit,
}

/// Statistics about a saturation run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InferenceStats {
    /// Number of passes executed
    pub passes: usize,
    /// Number of complete rule instantiations found
    pub rules_fired: usize,
    /// Number of facts actually new to the store
    pub facts_derived: usize,
    /// Instantiated consequents discarded because they still held a variable
    pub non_ground_discarded: usize,
    /// How the run ended
    pub termination: Termination,
}

impl InferenceStats {
    /// Whether the run reached a fixpoint
    pub fn converged(&self) -> bool {
        self.termination == Termination::Fixpoint
    }
}

/// Result of a saturation run: the full fact set plus run statistics
#[derive(Clone, Debug)]
pub struct Saturation {
    /// Every fact known at termination (initial plus derived)
    pub facts: IndexSet<Predicate>,
    /// Statistics, including the termination variant
    pub stats: InferenceStats,
}

/// The forward-chaining engine
///
/// Owns its fact and rule stores for its lifetime; both are mutated only
/// through the declared operations.
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    facts: FactStore,
    rules: Vec<Rule>,
}

impl Engine {
    /// Create a new engine with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom configuration
    pub fn with_config(config: EngineConfig) -> Self {
        Engine {
            config,
            ..Self::default()
        }
    }

    /// Add a ground fact to the store
    ///
    /// Rejects non-ground predicates and leaves the store untouched;
    /// idempotent under structural equality otherwise.
    pub fn add_fact(&mut self, fact: Predicate) -> HornResult<()> {
        if !fact.is_ground() {
            return Err(HornError::non_ground(format!(
                "cannot assert {}: contains variables",
                fact
            )));
        }
        self.facts.insert(fact);
        Ok(())
    }

    /// Add a rule, ignoring structural duplicates
    pub fn add_rule(&mut self, rule: Rule) {
        if !self.rules.contains(&rule) {
            self.rules.push(rule);
        }
    }

    /// Add multiple rules
    pub fn add_rules(&mut self, rules: impl IntoIterator<Item = Rule>) {
        for rule in rules {
            self.add_rule(rule);
        }
    }

    /// Get the fact store
    pub fn facts(&self) -> &FactStore {
        &self.facts
    }

    /// Get the rules
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Clear both stores, returning the engine to its initial empty state
    pub fn reset(&mut self) {
        self.facts.clear();
        self.rules.clear();
    }

    /// Run forward chaining to a fixpoint or the pass cap
    ///
    /// Returns the full fact set at termination together with statistics;
    /// `stats.termination` distinguishes a genuine fixpoint from a run cut
    /// off by the cap.
    pub fn infer(&mut self) -> Saturation {
        let mut stats = InferenceStats {
            termination: Termination::PassLimit,
            ..Default::default()
        };

        while stats.passes < self.config.max_passes {
            stats.passes += 1;

            let new_facts = self.pass(&mut stats);
            if new_facts == 0 {
                stats.termination = Termination::Fixpoint;
                break;
            }
        }

        Saturation {
            facts: self.facts.to_set(),
            stats,
        }
    }

    /// Execute one pass over all rules against the current fact snapshot
    ///
    /// Candidates collect in a per-pass buffer and merge only after every
    /// rule has been visited, so the snapshot stays fixed throughout the
    /// pass. Returns the number of actually-new facts.
    fn pass(&mut self, stats: &mut InferenceStats) -> usize {
        let mut buffer: IndexSet<Predicate> = IndexSet::new();

        for rule in &self.rules {
            for solution in solve_antecedents(&rule.antecedents, &self.facts, &Substitution::new())
            {
                stats.rules_fired += 1;

                let conclusion = solution.apply_predicate(&rule.consequent);
                if conclusion.is_ground() {
                    buffer.insert(conclusion);
                } else {
                    // Consequent mentions a variable absent from every
                    // antecedent; it can never become a fact.
                    stats.non_ground_discarded += 1;
                }
            }
        }

        let mut new_facts = 0;
        for fact in buffer {
            if self.facts.insert(fact) {
                new_facts += 1;
            }
        }
        stats.facts_derived += new_facts;
        new_facts
    }
}

/// Depth-first backtracking search for every substitution satisfying all
/// antecedents simultaneously
///
/// At each position every fact is tried against a private copy of the
/// accumulated substitution, so a failed attempt never pollutes sibling
/// branches. The search enumerates all complete solutions, not just the
/// first.
fn solve_antecedents(
    antecedents: &[Predicate],
    facts: &FactStore,
    subst: &Substitution,
) -> Vec<Substitution> {
    let Some((first, rest)) = antecedents.split_first() else {
        return vec![subst.clone()];
    };

    let mut solutions = Vec::new();
    for fact in facts {
        let mut attempt = subst.clone();
        if unify_predicates(first, fact, &mut attempt) {
            solutions.extend(solve_antecedents(rest, facts, &attempt));
        }
    }

    solutions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    fn pred(functor: &str, args: Vec<Term>) -> Predicate {
        Predicate::new(functor, args)
    }

    fn c(name: &str) -> Term {
        Term::constant(name)
    }

    fn v(name: &str) -> Term {
        Term::var(name)
    }

    #[test]
    fn test_socrates_is_mortal() {
        let mut engine = Engine::new();
        engine.add_fact(pred("human", vec![c("socrates")])).unwrap();
        engine.add_rule(Rule::new(
            vec![pred("human", vec![v("x")])],
            pred("mortal", vec![v("x")]),
        ));

        let result = engine.infer();
        assert!(result.stats.converged());
        assert!(result.facts.contains(&pred("mortal", vec![c("socrates")])));
    }

    #[test]
    fn test_no_chain_without_rule() {
        let mut engine = Engine::new();
        engine
            .add_fact(pred("philosopher", vec![c("plato")]))
            .unwrap();
        engine.add_rule(Rule::new(
            vec![pred("philosopher", vec![v("x")])],
            pred("human", vec![v("x")]),
        ));

        let result = engine.infer();
        assert!(result.facts.contains(&pred("human", vec![c("plato")])));
        assert!(!result.facts.contains(&pred("mortal", vec![c("plato")])));
    }

    #[test]
    fn test_binary_predicate_inversion() {
        let mut engine = Engine::new();
        engine
            .add_fact(pred("teacherOf", vec![c("socrates"), c("plato")]))
            .unwrap();
        engine.add_rule(Rule::new(
            vec![pred("teacherOf", vec![v("x"), v("y")])],
            pred("studentOf", vec![v("y"), v("x")]),
        ));

        let result = engine.infer();
        assert!(result
            .facts
            .contains(&pred("studentOf", vec![c("plato"), c("socrates")])));
    }

    #[test]
    fn test_non_ground_fact_rejected() {
        let mut engine = Engine::new();
        let err = engine
            .add_fact(pred("mortal", vec![v("x")]))
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::NonGroundFact);
        assert!(engine.facts().is_empty());
    }

    #[test]
    fn test_no_spurious_derivation() {
        let mut engine = Engine::new();
        engine.add_fact(pred("human", vec![c("socrates")])).unwrap();
        engine.add_fact(pred("human", vec![c("plato")])).unwrap();
        engine.add_rule(Rule::new(
            vec![pred("human", vec![v("x")])],
            pred("mortal", vec![v("x")]),
        ));

        let result = engine.infer();
        assert!(result.facts.contains(&pred("mortal", vec![c("socrates")])));
        assert!(result.facts.contains(&pred("mortal", vec![c("plato")])));
        assert!(!result.facts.contains(&pred("mortal", vec![c("aristotle")])));
    }

    #[test]
    fn test_transitive_closure() {
        let mut engine = Engine::new();
        engine
            .add_fact(pred("subClassOf", vec![c("a"), c("b")]))
            .unwrap();
        engine
            .add_fact(pred("subClassOf", vec![c("b"), c("c")]))
            .unwrap();
        engine.add_rule(Rule::new(
            vec![
                pred("subClassOf", vec![v("x"), v("y")]),
                pred("subClassOf", vec![v("y"), v("z")]),
            ],
            pred("subClassOf", vec![v("x"), v("z")]),
        ));

        let result = engine.infer();
        assert!(result.stats.converged());
        assert!(result.facts.contains(&pred("subClassOf", vec![c("a"), c("c")])));
    }

    #[test]
    fn test_multiple_instantiations_per_rule() {
        // Both orderings of distinct humans must be enumerated.
        let mut engine = Engine::new();
        engine.add_fact(pred("human", vec![c("socrates")])).unwrap();
        engine.add_fact(pred("human", vec![c("plato")])).unwrap();
        engine.add_rule(Rule::new(
            vec![pred("human", vec![v("x")]), pred("human", vec![v("y")])],
            pred("peer", vec![v("x"), v("y")]),
        ));

        let result = engine.infer();
        assert!(result.facts.contains(&pred("peer", vec![c("socrates"), c("plato")])));
        assert!(result.facts.contains(&pred("peer", vec![c("plato"), c("socrates")])));
        assert!(result.facts.contains(&pred("peer", vec![c("plato"), c("plato")])));
    }

    #[test]
    fn test_monotonic_and_idempotent() {
        let mut engine = Engine::new();
        engine.add_fact(pred("human", vec![c("socrates")])).unwrap();
        engine.add_rule(Rule::new(
            vec![pred("human", vec![v("x")])],
            pred("mortal", vec![v("x")]),
        ));

        let initial: IndexSet<_> = engine.facts().to_set();
        let first = engine.infer();
        assert!(initial.iter().all(|f| first.facts.contains(f)));

        let second = engine.infer();
        assert_eq!(first.facts, second.facts);
        assert_eq!(second.stats.facts_derived, 0);
    }

    #[test]
    fn test_ground_only_store_invariant() {
        let mut engine = Engine::new();
        engine.add_fact(pred("human", vec![c("socrates")])).unwrap();
        engine.add_rule(Rule::new(
            vec![pred("human", vec![v("x")])],
            pred("mortal", vec![v("x")]),
        ));
        engine.infer();

        assert!(engine.facts().iter().all(|f| f.is_ground()));
    }

    #[test]
    fn test_unbound_consequent_variable_discarded() {
        let mut engine = Engine::new();
        engine.add_fact(pred("human", vec![c("socrates")])).unwrap();
        // ?y never appears in an antecedent; every instantiation is dropped.
        engine.add_rule(Rule::new(
            vec![pred("human", vec![v("x")])],
            pred("likes", vec![v("x"), v("y")]),
        ));

        let result = engine.infer();
        assert!(result.stats.converged());
        assert!(result.stats.non_ground_discarded > 0);
        assert!(!result.facts.iter().any(|f| f.functor == "likes"));
    }

    #[test]
    fn test_pass_cap_surfaced() {
        let mut engine = Engine::with_config(EngineConfig { max_passes: 10 });
        engine.add_fact(pred("count", vec![c("zero")])).unwrap();
        // Grows a fresh successor term every pass; never reaches a fixpoint.
        engine.add_rule(Rule::new(
            vec![pred("count", vec![v("n")])],
            pred("count", vec![Term::pred("s", vec![v("n")])]),
        ));

        let result = engine.infer();
        assert_eq!(result.stats.termination, Termination::PassLimit);
        assert!(!result.stats.converged());
        assert_eq!(result.stats.passes, 10);
    }

    #[test]
    fn test_rule_variables() {
        let rule = Rule::new(
            vec![pred("teacherOf", vec![v("x"), v("y")])],
            pred("studentOf", vec![v("y"), v("x")]),
        );
        assert_eq!(rule.variables().len(), 2);
    }

    #[test]
    fn test_duplicate_rules_ignored() {
        let mut engine = Engine::new();
        let rule = Rule::new(
            vec![pred("human", vec![v("x")])],
            pred("mortal", vec![v("x")]),
        );
        engine.add_rule(rule.clone());
        engine.add_rule(rule);
        assert_eq!(engine.rules().len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut engine = Engine::new();
        engine.add_fact(pred("human", vec![c("socrates")])).unwrap();
        engine.add_rule(Rule::new(
            vec![pred("human", vec![v("x")])],
            pred("mortal", vec![v("x")]),
        ));

        engine.reset();
        assert!(engine.facts().is_empty());
        assert!(engine.rules().is_empty());

        let result = engine.infer();
        assert!(result.facts.is_empty());
        assert!(result.stats.converged());
    }

    #[test]
    fn test_propositional_atoms() {
        let mut engine = Engine::new();
        engine.add_fact(Predicate::atom("raining")).unwrap();
        engine.add_rule(Rule::new(
            vec![Predicate::atom("raining")],
            Predicate::atom("wet"),
        ));

        let result = engine.infer();
        assert!(result.facts.contains(&Predicate::atom("wet")));
    }

    #[test]
    fn test_chained_rules_across_passes() {
        let mut engine = Engine::new();
        engine
            .add_fact(pred("philosopher", vec![c("plato")]))
            .unwrap();
        engine.add_rule(Rule::new(
            vec![pred("philosopher", vec![v("x")])],
            pred("human", vec![v("x")]),
        ));
        engine.add_rule(Rule::new(
            vec![pred("human", vec![v("x")])],
            pred("mortal", vec![v("x")]),
        ));

        let result = engine.infer();
        assert!(result.facts.contains(&pred("mortal", vec![c("plato")])));
        // philosopher -> human in one pass, human -> mortal in the next,
        // plus the empty pass that detects the fixpoint.
        assert_eq!(result.stats.passes, 3);
    }
}
