use std::collections::BTreeMap;

/// Result of testing one rule's predicate against a selection.
#[derive(Clone, Debug, PartialEq)]
pub enum PredicateOutcome {
    Satisfied,
    /// The check failed; the map holds the values the rule's message
    /// template may reference.
    Violated { substitutions: BTreeMap<String, String> },
    Skipped(SkipReason),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    /// An operand references a category with no part chosen. The predicate
    /// is vacuously satisfied: an incomplete build must never produce
    /// spurious issues for parts the user has not picked yet.
    CategoryAbsent(String),
    /// The rule's config cannot be resolved against the selection (missing
    /// attribute, non-numeric value in a numeric comparison, ...). Logged
    /// and skipped so one bad rule cannot block the rest.
    Misconfigured(String),
}
