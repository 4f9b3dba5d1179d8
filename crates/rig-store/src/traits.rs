use rig_core::{Rule, RuleId, RulePatch};

use crate::error::StoreError;

/// The registry's persistence boundary. Reads return the current stored
/// state each call; nothing is cached on this side. Updates are durably
/// applied before returning and are limited to the admin-mutable fields
/// (`is_active`, `severity`) -- `rule_config`, `message_template` and
/// `rule_number` cannot change through this interface.
pub trait RuleStore: Send + Sync {
    /// All rules, or only active ones, sorted ascending by `rule_number`.
    fn list(&self, active_only: bool) -> Result<Vec<Rule>, StoreError>;

    fn get(&self, id: &RuleId) -> Result<Rule, StoreError>;

    /// Apply the patch and return the updated record.
    fn update(&self, id: &RuleId, patch: RulePatch) -> Result<Rule, StoreError>;

    /// Provisioning entry point used by pack seeding; `rule_number` and id
    /// collisions surface as persistence errors.
    fn insert(&self, rule: Rule) -> Result<(), StoreError>;
}
