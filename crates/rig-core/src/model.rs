use serde::{Deserialize, Serialize};

use crate::{ids::RuleId, types::Severity};

/// A stored compatibility check. `rule_number` is the unique display and
/// evaluation ordinal and is never reassigned; admins may only flip
/// `is_active` and `severity`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub rule_number: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub severity: Severity,
    pub is_active: bool,
    pub message_template: String,
    /// JSON predicate spec, parsed lazily at evaluation time so one bad
    /// config cannot take the whole rule set down.
    pub rule_config: String,
}

/// The admin-mutable subset of a rule.
#[derive(Clone, Debug, Default)]
pub struct RulePatch {
    pub is_active: Option<bool>,
    pub severity: Option<Severity>,
}

impl RulePatch {
    pub fn active(value: bool) -> Self {
        Self {
            is_active: Some(value),
            ..Self::default()
        }
    }

    pub fn severity(value: Severity) -> Self {
        Self {
            severity: Some(value),
            ..Self::default()
        }
    }
}

/// One rule's failure against a selection. Issues carry no identity beyond
/// their originating rule and are recomputed fresh on every evaluation.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Issue {
    pub rule_id: RuleId,
    pub severity: Severity,
    pub message: String,
}
