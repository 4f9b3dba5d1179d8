use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::anyhow;
use rig_core::{Rule, RuleId, RulePatch};

use crate::error::StoreError;
use crate::traits::RuleStore;

/// In-memory rule store for tests. Not durable, but enough for unit and
/// scenario tests against the evaluator and admin surface.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<HashMap<String, Rule>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for tests: a store pre-filled with the given rules.
    pub fn with_rules(rules: Vec<Rule>) -> Result<Self, StoreError> {
        let store = Self::new();
        for rule in rules {
            store.insert(rule)?;
        }
        Ok(store)
    }
}

impl RuleStore for InMemoryStore {
    fn list(&self, active_only: bool) -> Result<Vec<Rule>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut rules: Vec<Rule> = inner
            .values()
            .filter(|r| !active_only || r.is_active)
            .cloned()
            .collect();
        rules.sort_by_key(|r| r.rule_number);
        Ok(rules)
    }

    fn get(&self, id: &RuleId) -> Result<Rule, StoreError> {
        let inner = self.inner.lock().unwrap();
        inner
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_string()))
    }

    fn update(&self, id: &RuleId, patch: RulePatch) -> Result<Rule, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let rule = inner
            .get_mut(id.as_str())
            .ok_or_else(|| StoreError::NotFound(id.as_str().to_string()))?;
        if let Some(active) = patch.is_active {
            rule.is_active = active;
        }
        if let Some(severity) = patch.severity {
            rule.severity = severity;
        }
        Ok(rule.clone())
    }

    fn insert(&self, rule: Rule) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.contains_key(rule.id.as_str()) {
            return Err(StoreError::Persistence(anyhow!(
                "duplicate rule id: {}",
                rule.id.as_str()
            )));
        }
        if inner.values().any(|r| r.rule_number == rule.rule_number) {
            return Err(StoreError::Persistence(anyhow!(
                "duplicate rule number: {}",
                rule.rule_number
            )));
        }
        inner.insert(rule.id.as_str().to_string(), rule);
        Ok(())
    }
}
