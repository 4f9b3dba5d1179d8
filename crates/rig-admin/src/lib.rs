use rig_core::{Rule, RuleId, RulePatch, Severity};
use rig_store::{RuleStore, StoreError};

/// The two mutations the admin screens expose, as a thin façade over
/// `RuleStore::update`. Severity arrives as the wire string so values
/// outside `error`/`warning` are rejected here, before the store is
/// touched. Authorization is the caller's problem; this trusts that admin
/// privilege was already checked.
pub struct RuleAdmin<'a> {
    store: &'a dyn RuleStore,
}

impl<'a> RuleAdmin<'a> {
    pub fn new(store: &'a dyn RuleStore) -> Self {
        Self { store }
    }

    pub fn set_active(&self, id: &RuleId, active: bool) -> Result<Rule, StoreError> {
        self.store.update(id, RulePatch::active(active))
    }

    pub fn set_severity(&self, id: &RuleId, severity: &str) -> Result<Rule, StoreError> {
        let severity = Severity::parse(severity)
            .ok_or_else(|| StoreError::InvalidSeverity(severity.to_string()))?;
        self.store.update(id, RulePatch::severity(severity))
    }
}
