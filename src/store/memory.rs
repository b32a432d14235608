//! In-memory store backends
//!
//! Thread-safe map-backed implementations of the storage contracts, used
//! by the tests and by embedded deployments that need no database.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::error::{Result, RuleEngineError};
use crate::model::{Attribute, Rule};
use crate::store::{AttributeCatalog, RuleStore};

/// In-memory rule store with a unique-name constraint
#[derive(Default, Clone)]
pub struct MemoryRuleStore {
    inner: Arc<RwLock<AHashMap<String, Rule>>>,
}

impl MemoryRuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl RuleStore for MemoryRuleStore {
    fn find_by_name(&self, name: &str) -> Result<Option<Rule>> {
        Ok(self.inner.read().get(name).cloned())
    }

    fn find_by_names(&self, names: &[&str]) -> Result<Vec<Rule>> {
        let inner = self.inner.read();
        Ok(names.iter().filter_map(|n| inner.get(*n).cloned()).collect())
    }

    fn insert(&self, rule: Rule) -> Result<()> {
        // Check and insert under one write lock: uniqueness is atomic here
        let mut inner = self.inner.write();
        if inner.contains_key(&rule.name) {
            return Err(RuleEngineError::DuplicateRule(rule.name));
        }
        inner.insert(rule.name.clone(), rule);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Rule>> {
        Ok(self.inner.read().values().cloned().collect())
    }
}

/// In-memory attribute catalog
#[derive(Default, Clone)]
pub struct MemoryAttributeCatalog {
    inner: Arc<RwLock<AHashMap<String, Attribute>>>,
}

impl MemoryAttributeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Fetch a single definition, mostly useful in tests
    pub fn find(&self, name: &str) -> Option<Attribute> {
        self.inner.read().get(name).cloned()
    }
}

impl AttributeCatalog for MemoryAttributeCatalog {
    fn find_by_names(&self, names: &[&str]) -> Result<Vec<Attribute>> {
        let inner = self.inner.read();
        Ok(names.iter().filter_map(|n| inner.get(*n).cloned()).collect())
    }

    fn insert_many(&self, attributes: Vec<Attribute>) -> Result<()> {
        let mut inner = self.inner.write();
        for attribute in attributes {
            // First definition wins; re-registration never rewrites a type
            inner
                .entry(attribute.attribute_name.clone())
                .or_insert(attribute);
        }
        Ok(())
    }
}
