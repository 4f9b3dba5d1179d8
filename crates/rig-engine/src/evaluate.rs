use rig_core::{render, Issue, PartSelection, PredicateConfig};
use rig_store::{RuleStore, StoreError};
use tracing::warn;

use crate::outcome::{PredicateOutcome, SkipReason};
use crate::predicate::eval_predicate;

/// Runs the active rule set against a part selection and assembles the
/// ordered issue list. Holds no state of its own: every call reads the
/// store's current snapshot, so admin edits are visible on the next
/// evaluation without any cache to invalidate.
pub struct Evaluator<'a> {
    store: &'a dyn RuleStore,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a dyn RuleStore) -> Self {
        Self { store }
    }

    /// Issues come back in ascending `rule_number` order (the store's list
    /// order). Rules are independent; none short-circuits another, and a
    /// misconfigured rule is logged and skipped rather than aborting the
    /// rest. Callers partition the result by severity.
    pub fn evaluate(&self, selection: &PartSelection) -> Result<Vec<Issue>, StoreError> {
        let rules = self.store.list(true)?;
        let mut issues = Vec::new();
        for rule in &rules {
            let config = match PredicateConfig::parse(&rule.rule_config) {
                Ok(config) => config,
                Err(err) => {
                    warn!(rule = rule.id.as_str(), %err, "skipping rule with unparseable config");
                    continue;
                }
            };
            match eval_predicate(&config, selection) {
                PredicateOutcome::Satisfied => {}
                PredicateOutcome::Skipped(SkipReason::CategoryAbsent(_)) => {}
                PredicateOutcome::Skipped(SkipReason::Misconfigured(reason)) => {
                    warn!(rule = rule.id.as_str(), %reason, "skipping misconfigured rule");
                }
                PredicateOutcome::Violated { substitutions } => {
                    issues.push(Issue {
                        rule_id: rule.id.clone(),
                        severity: rule.severity,
                        message: render(&rule.message_template, &substitutions),
                    });
                }
            }
        }
        Ok(issues)
    }
}
