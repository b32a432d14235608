//! Engine facade exposed to transport layers
//!
//! `RuleEngine` wires the pure expression engine to the two storage
//! collaborators and exposes the create/combine/evaluate/list use cases.
//! It holds no state of its own beyond the collaborator handles, so one
//! instance can serve arbitrarily many concurrent calls.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, RuleEngineError};
use crate::expr::{combine, evaluate, parser, LogicalOp, Node, Outcome, Record};
use crate::model::Rule;
use crate::store::{AttributeCatalog, RuleStore};
use crate::validator::validate_attributes;

/// Result of evaluating a stored rule, carrying the source text for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationReport {
    pub rule_string: String,
    pub outcome: Outcome,
}

/// The rule engine over a rule store and an attribute catalog
#[derive(Clone)]
pub struct RuleEngine {
    store: Arc<dyn RuleStore>,
    catalog: Arc<dyn AttributeCatalog>,
}

impl RuleEngine {
    pub fn new(store: Arc<dyn RuleStore>, catalog: Arc<dyn AttributeCatalog>) -> Self {
        Self { store, catalog }
    }

    /// Parse, validate and persist a new named rule, returning its AST
    pub fn create_rule(&self, name: &str, rule_string: &str) -> Result<Node> {
        if self.store.find_by_name(name)?.is_some() {
            return Err(RuleEngineError::DuplicateRule(name.to_string()));
        }

        let ast = parser::parse(rule_string)?;
        validate_attributes(&ast, self.catalog.as_ref())?;

        // The store enforces name uniqueness atomically; the check above
        // can race with a concurrent create, and the insert error is the
        // one that counts
        self.store
            .insert(Rule::new(name, rule_string, ast.clone()))?;

        info!(rule = name, "rule created");
        Ok(ast)
    }

    /// Fold several stored rules into one expression under a single
    /// boolean operator, in request order. The stored rules are left
    /// untouched; the result is a new tree.
    pub fn combine_rules(&self, names: &[&str], operator: LogicalOp) -> Result<Node> {
        if names.is_empty() {
            return Err(RuleEngineError::InvalidRule(
                "no rules to combine".to_string(),
            ));
        }

        let rules = self.store.find_by_names(names)?;
        let found: AHashSet<&str> = rules.iter().map(|r| r.name.as_str()).collect();

        let missing: Vec<String> = names
            .iter()
            .filter(|name| !found.contains(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RuleEngineError::MissingRules(missing));
        }

        let by_name: AHashMap<&str, &Rule> =
            rules.iter().map(|r| (r.name.as_str(), r)).collect();

        let mut asts = Vec::with_capacity(names.len());
        for name in names {
            let rule = by_name
                .get(name)
                .ok_or_else(|| RuleEngineError::RuleNotFound(name.to_string()))?;
            asts.push(rule.ast.clone());
        }

        debug!(rules = ?names, %operator, "combining rules");

        combine(asts, operator)
            .ok_or_else(|| RuleEngineError::InvalidRule("no rules to combine".to_string()))
    }

    /// Evaluate a stored rule against an input record
    pub fn evaluate_rule(&self, name: &str, record: &Record) -> Result<EvaluationReport> {
        let rule = self
            .store
            .find_by_name(name)?
            .ok_or_else(|| RuleEngineError::RuleNotFound(name.to_string()))?;

        let outcome = evaluate(&rule.ast, record);
        debug!(rule = name, ?outcome, "rule evaluated");

        Ok(EvaluationReport {
            rule_string: rule.rule_string,
            outcome,
        })
    }

    /// List every stored rule: name, source text and AST
    pub fn list_rules(&self) -> Result<Vec<Rule>> {
        self.store.list_all()
    }
}
