use std::collections::BTreeMap;

use rig_core::{
    number_display, value_display, AttributePath, Operand, PartSelection, PredicateConfig,
};
use serde_json::Value;

use crate::outcome::{PredicateOutcome, SkipReason};

/// Test one parsed rule config against a selection.
///
/// Absence beats misconfiguration: if any operand path names a category
/// that has no part chosen, the predicate is skipped before attribute
/// resolution is attempted. `requires` names its category as the subject
/// under test rather than through an operand path, so absence there is the
/// failure it exists to report.
pub fn eval_predicate(config: &PredicateConfig, selection: &PartSelection) -> PredicateOutcome {
    match config {
        PredicateConfig::Equals { left, right, substitutions } => {
            if let Some(skip) = absent_category(&[left, right], selection) {
                return PredicateOutcome::Skipped(skip);
            }
            let left_value = match resolve_attr(left, selection) {
                Ok(v) => v,
                Err(skip) => return PredicateOutcome::Skipped(skip),
            };
            let right_value = match resolve_attr(right, selection) {
                Ok(v) => v,
                Err(skip) => return PredicateOutcome::Skipped(skip),
            };
            if values_equal(&left_value, &right_value) {
                PredicateOutcome::Satisfied
            } else {
                let mut subs = BTreeMap::new();
                subs.insert("actual".to_string(), value_display(&left_value));
                subs.insert("expected".to_string(), value_display(&right_value));
                extend_substitutions(&mut subs, substitutions, selection);
                PredicateOutcome::Violated { substitutions: subs }
            }
        }
        PredicateConfig::Threshold { left, op, right, substitutions } => {
            let mut paths = vec![left];
            if let Operand::Path(p) = right {
                paths.push(p);
            }
            if let Some(skip) = absent_category(&paths, selection) {
                return PredicateOutcome::Skipped(skip);
            }
            let left_num = match resolve_number(left, selection) {
                Ok(n) => n,
                Err(skip) => return PredicateOutcome::Skipped(skip),
            };
            let (right_num, right_text) = match right {
                Operand::Path(p) => match resolve_number(p, selection) {
                    Ok(n) => (n, number_display(n)),
                    Err(skip) => return PredicateOutcome::Skipped(skip),
                },
                Operand::Literal(n) => (*n, number_display(*n)),
            };
            if op.holds(left_num, right_num) {
                PredicateOutcome::Satisfied
            } else {
                let mut subs = BTreeMap::new();
                subs.insert("actual".to_string(), number_display(left_num));
                subs.insert("expected".to_string(), right_text);
                extend_substitutions(&mut subs, substitutions, selection);
                PredicateOutcome::Violated { substitutions: subs }
            }
        }
        PredicateConfig::Requires { category, substitutions } => {
            if selection.contains(category) {
                PredicateOutcome::Satisfied
            } else {
                let mut subs = BTreeMap::new();
                subs.insert("category".to_string(), category.clone());
                extend_substitutions(&mut subs, substitutions, selection);
                PredicateOutcome::Violated { substitutions: subs }
            }
        }
    }
}

fn absent_category(paths: &[&AttributePath], selection: &PartSelection) -> Option<SkipReason> {
    paths
        .iter()
        .find(|p| !selection.contains(&p.category))
        .map(|p| SkipReason::CategoryAbsent(p.category.clone()))
}

fn resolve_attr(path: &AttributePath, selection: &PartSelection) -> Result<Value, SkipReason> {
    selection
        .resolve(path)
        .ok_or_else(|| SkipReason::Misconfigured(format!("no attribute {} in selection", path)))
}

fn resolve_number(path: &AttributePath, selection: &PartSelection) -> Result<f64, SkipReason> {
    let value = resolve_attr(path, selection)?;
    value
        .as_f64()
        .ok_or_else(|| SkipReason::Misconfigured(format!("attribute {} is not numeric", path)))
}

/// Exact, case-sensitive equality; numbers compare numerically so catalog
/// data may mix integer and float encodings.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// Resolve the config's extra message substitutions. Paths that do not
/// resolve are simply omitted; the renderer leaves their placeholders
/// verbatim.
fn extend_substitutions(
    subs: &mut BTreeMap<String, String>,
    extra: &BTreeMap<String, AttributePath>,
    selection: &PartSelection,
) {
    for (key, path) in extra {
        if let Some(value) = selection.resolve(path) {
            subs.insert(key.clone(), value_display(&value));
        }
    }
}
