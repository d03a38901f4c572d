//! First-order term representations
//!
//! This module defines the core data types the engine reasons over:
//! - Variables (named placeholders in rule patterns)
//! - Constants (opaque atomic tokens)
//! - Predicates (a functor applied to an ordered list of argument terms)
//!
//! A predicate with no arguments is a bare propositional atom. A term is
//! *ground* when it contains no variable at any nesting depth; only ground
//! predicates may enter the fact store.

use std::fmt;

use fnv::FnvHashSet;

/// A variable in a rule pattern
///
/// Two variables are equal iff their names are equal.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
}

impl Variable {
    /// Create a variable with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Variable { name: name.into() }
    }

    /// Get the variable name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

/// An atomic constant value
///
/// The payload is treated as an opaque comparable/printable token.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Constant(String);

impl Constant {
    pub fn new(value: impl Into<String>) -> Self {
        Constant(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A compound term: a functor name applied to zero or more argument terms
///
/// Equality is structural: same functor, same arity, element-wise equal
/// arguments in order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    pub functor: String,
    pub args: Vec<Term>,
}

impl Predicate {
    /// Create a predicate from a functor and arguments
    pub fn new(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Predicate {
            functor: functor.into(),
            args,
        }
    }

    /// Create a 0-arity predicate (a bare propositional atom)
    pub fn atom(functor: impl Into<String>) -> Self {
        Predicate::new(functor, vec![])
    }

    /// Number of arguments
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Check if this predicate is ground (contains no variables)
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(|a| a.is_ground())
    }

    /// Get all variables occurring in this predicate
    pub fn variables(&self) -> FnvHashSet<Variable> {
        let mut vars = FnvHashSet::default();
        for arg in &self.args {
            arg.collect_variables(&mut vars);
        }
        vars
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            return write!(f, "{}", self.functor);
        }
        write!(f, "{}(", self.functor)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", arg)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A first-order term
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A named variable
    Variable(Variable),
    /// An atomic constant
    Constant(Constant),
    /// A compound term (functor + arguments)
    Predicate(Predicate),
}

impl Term {
    /// Create a variable term
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    /// Create a constant term
    pub fn constant(value: impl Into<String>) -> Self {
        Term::Constant(Constant::new(value))
    }

    /// Create a compound term
    pub fn pred(functor: impl Into<String>, args: Vec<Term>) -> Self {
        Term::Predicate(Predicate::new(functor, args))
    }

    /// Check if this term is a variable
    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Check if this term is ground (contains no variables at any depth)
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Variable(_) => false,
            Term::Constant(_) => true,
            Term::Predicate(p) => p.is_ground(),
        }
    }

    /// Get the predicate if this is a compound term
    pub fn as_predicate(&self) -> Option<&Predicate> {
        match self {
            Term::Predicate(p) => Some(p),
            _ => None,
        }
    }

    /// Get all variables occurring in this term
    pub fn variables(&self) -> FnvHashSet<Variable> {
        let mut vars = FnvHashSet::default();
        self.collect_variables(&mut vars);
        vars
    }

    pub(crate) fn collect_variables(&self, vars: &mut FnvHashSet<Variable>) {
        match self {
            Term::Variable(v) => {
                vars.insert(v.clone());
            }
            Term::Constant(_) => {}
            Term::Predicate(p) => {
                for arg in &p.args {
                    arg.collect_variables(vars);
                }
            }
        }
    }
}

impl From<Predicate> for Term {
    fn from(p: Predicate) -> Self {
        Term::Predicate(p)
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{:?}", v),
            Term::Constant(c) => write!(f, "{:?}", c),
            Term::Predicate(p) => write!(f, "{:?}", p),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => write!(f, "{}", v),
            Term::Constant(c) => write!(f, "{}", c),
            Term::Predicate(p) => write!(f, "{}", p),
        }
    }
}
