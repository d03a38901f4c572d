//! Structured error handling for horn
//!
//! Provides a unified error type with:
//! - Error codes for programmatic handling
//! - Structured, JSON-friendly error values
//! - Optional hints for resolving the error
//!
//! Unification failure and hitting the pass cap are *not* errors: the first
//! is a normal negative outcome of `unify`, the second is reported through
//! [`crate::engine::Termination`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Parse errors (1xxx)
    /// Generic parse error in the textual notation
    ParseError = 1000,

    // Engine errors (2xxx)
    /// A fact submitted to the store contains a variable
    NonGroundFact = 2000,

    // Internal errors (9xxx)
    /// Internal error
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::NonGroundFact => "Non-ground fact rejected",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// The main error type for horn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HornError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl HornError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, message)
    }

    /// Create a non-ground fact rejection
    pub fn non_ground(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NonGroundFact, message)
            .with_hint("facts must not contain variables; bind them in a rule instead")
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Attach a hint for resolving the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for HornError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}

impl std::error::Error for HornError {}

impl From<crate::parser::ParseError> for HornError {
    fn from(err: crate::parser::ParseError) -> Self {
        HornError::parse(err.to_string())
    }
}

/// Result alias using [`HornError`]
pub type HornResult<T> = Result<T, HornError>;
