//! Error types for the rule engine

use thiserror::Error;

/// Main error type for the rule engine
#[derive(Error, Debug)]
pub enum RuleEngineError {
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Attribute {0} is not in the catalog")]
    UnknownAttribute(String),

    #[error("A rule with the name \"{0}\" already exists")]
    DuplicateRule(String),

    #[error("The following rules do not exist: {}", .0.join(", "))]
    MissingRules(Vec<String>),

    #[error("Rule with name \"{0}\" not found")]
    RuleNotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the rule engine
pub type Result<T> = std::result::Result<T, RuleEngineError>;
