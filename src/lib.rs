//! Rule Engine Core - boolean rule expressions over named attributes
//!
//! Rules like `age > 30 AND department = 'Sales'` are parsed into an AST,
//! validated against an attribute catalog, stored by name, combined under
//! a single boolean operator, and evaluated against input records.
//!
//! The expression engine in [`expr`] is pure computation; storage is
//! reached only through the [`store`] trait contracts, with in-memory
//! implementations included for tests and embedded use.

pub mod engine;
pub mod error;
pub mod expr;
pub mod model;
pub mod store;
pub mod validator;

pub use engine::{EvaluationReport, RuleEngine};
pub use error::{Result, RuleEngineError};
pub use expr::{
    combine, evaluate, evaluate_str, parse, record_from_json, CompareOp, LogicalOp, Node, Outcome,
    Record, Value,
};
pub use model::{Attribute, DataType, Rule};
pub use store::{AttributeCatalog, MemoryAttributeCatalog, MemoryRuleStore, RuleStore};
pub use validator::{guess_data_type, validate_attributes};
