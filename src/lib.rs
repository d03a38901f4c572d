//! Horn - forward-chaining rule engine
//!
//! A small inference engine over first-order terms: starting from a set of
//! known ground facts, it repeatedly applies rules whose antecedents are
//! matched against facts via unification (with occurs check), and grows the
//! fact set until no rule produces anything new or a pass cap is hit.
//!
//! # Architecture
//!
//! - [`term`] - the Variable / Constant / Predicate term model
//! - [`unify`] - substitutions, resolution, and the unification algorithm
//! - [`store`] - the deduplicated ground-fact store
//! - [`engine`] - rule instantiation search and the saturation driver
//! - [`parser`] - the textual `functor(arg, ...)` notation
//!
//! # Example
//!
//! ```rust
//! use horn::{Engine, Predicate, Rule, Term};
//!
//! let mut engine = Engine::new();
//! engine
//!     .add_fact(Predicate::new("human", vec![Term::constant("socrates")]))
//!     .unwrap();
//! engine.add_rule(Rule::new(
//!     vec![Predicate::new("human", vec![Term::var("x")])],
//!     Predicate::new("mortal", vec![Term::var("x")]),
//! ));
//!
//! let result = engine.infer();
//! assert!(result.stats.converged());
//! assert!(result
//!     .facts
//!     .contains(&Predicate::new("mortal", vec![Term::constant("socrates")])));
//! ```

pub mod engine;
pub mod error;
pub mod parser;
pub mod store;
pub mod term;
pub mod unify;

// Re-export term types
pub use term::{Constant, Predicate, Term, Variable};

// Re-export unification
pub use unify::{unify, unify_predicates, Substitution};

// Re-export store types
pub use store::FactStore;

// Re-export engine types
pub use engine::{Engine, EngineConfig, InferenceStats, Rule, Saturation, Termination};

// Re-export parser types
pub use parser::{parse, ParseError, Statement};

// Re-export error types
pub use error::{ErrorCode, HornError, HornResult};
