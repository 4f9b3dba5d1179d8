use rig_core::{Part, PartSelection, Rule, RuleId, RulePatch, Severity};
use rig_engine::Evaluator;
use rig_store::{InMemoryStore, RuleStore};

// Small helpers shared by the scenarios.

fn rule(id: &str, number: u32, severity: Severity, template: &str, config: &str) -> Rule {
    Rule {
        id: RuleId::from_str(id),
        rule_number: number,
        name: format!("Rule {}", number),
        description: String::new(),
        severity,
        is_active: true,
        message_template: template.to_string(),
        rule_config: config.to_string(),
    }
}

fn socket_rule() -> Rule {
    rule(
        "rule-socket",
        1,
        Severity::Error,
        "CPU socket {cpuSocket} does not match motherboard socket {moboSocket}",
        r#"{"kind":"equals","left":"cpu.socket","right":"motherboard.socket",
            "substitutions":{"cpuSocket":"cpu.socket","moboSocket":"motherboard.socket"}}"#,
    )
}

fn wattage_rule() -> Rule {
    rule(
        "rule-wattage",
        2,
        Severity::Warning,
        "PSU provides {actual}W but the build draws {expected}W",
        r#"{"kind":"threshold","left":"psu.wattage","op":">=","right":"build.totalDraw"}"#,
    )
}

fn part(json: serde_json::Value) -> Part {
    serde_json::from_value(json).unwrap()
}

fn mismatched_sockets() -> PartSelection {
    let mut sel = PartSelection::new();
    sel.insert("cpu", part(serde_json::json!({"name": "Ryzen 7", "socket": "AM5"})));
    sel.insert("motherboard", part(serde_json::json!({"name": "B450", "socket": "AM4"})));
    sel
}

fn underpowered_psu() -> PartSelection {
    let mut sel = PartSelection::new();
    sel.insert("psu", part(serde_json::json!({"name": "450W PSU", "wattage": 450})));
    sel.insert("build", part(serde_json::json!({"name": "build", "totalDraw": 500})));
    sel
}

#[test]
fn socket_mismatch_yields_one_error_with_rendered_message() {
    let store = InMemoryStore::with_rules(vec![socket_rule()]).unwrap();
    let issues = Evaluator::new(&store).evaluate(&mismatched_sockets()).unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Error);
    assert_eq!(
        issues[0].message,
        "CPU socket AM5 does not match motherboard socket AM4"
    );
}

#[test]
fn matching_sockets_yield_no_issues() {
    let store = InMemoryStore::with_rules(vec![socket_rule()]).unwrap();
    let mut sel = mismatched_sockets();
    sel.insert("motherboard", part(serde_json::json!({"name": "B650", "socket": "AM5"})));

    assert!(Evaluator::new(&store).evaluate(&sel).unwrap().is_empty());
}

#[test]
fn underpowered_psu_yields_one_warning() {
    let store = InMemoryStore::with_rules(vec![wattage_rule()]).unwrap();
    let issues = Evaluator::new(&store).evaluate(&underpowered_psu()).unwrap();

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Warning);
    assert_eq!(issues[0].message, "PSU provides 450W but the build draws 500W");
}

#[test]
fn absent_category_produces_no_issue_regardless_of_other_values() {
    let store = InMemoryStore::with_rules(vec![socket_rule()]).unwrap();
    let mut sel = PartSelection::new();
    sel.insert("cpu", part(serde_json::json!({"name": "Ryzen 7", "socket": "AM5"})));

    assert!(Evaluator::new(&store).evaluate(&sel).unwrap().is_empty());
}

#[test]
fn issues_come_back_in_rule_number_order() {
    // Inserted out of order on purpose; both rules fire.
    let store = InMemoryStore::with_rules(vec![wattage_rule(), socket_rule()]).unwrap();
    let mut sel = mismatched_sockets();
    sel.insert("psu", part(serde_json::json!({"name": "450W PSU", "wattage": 450})));
    sel.insert("build", part(serde_json::json!({"name": "build", "totalDraw": 500})));

    let issues = Evaluator::new(&store).evaluate(&sel).unwrap();
    let ids: Vec<&str> = issues.iter().map(|i| i.rule_id.as_str()).collect();
    assert_eq!(ids, vec!["rule-socket", "rule-wattage"]);
}

#[test]
fn disabling_a_rule_removes_exactly_its_issue() {
    let store = InMemoryStore::with_rules(vec![socket_rule(), wattage_rule()]).unwrap();
    let mut sel = mismatched_sockets();
    sel.insert("psu", part(serde_json::json!({"name": "450W PSU", "wattage": 450})));
    sel.insert("build", part(serde_json::json!({"name": "build", "totalDraw": 500})));

    let before = Evaluator::new(&store).evaluate(&sel).unwrap();
    assert_eq!(before.len(), 2);

    store.update(&RuleId::from_str("rule-wattage"), RulePatch::active(false)).unwrap();

    let after = Evaluator::new(&store).evaluate(&sel).unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0], before[0]);
}

#[test]
fn severity_change_affects_only_the_severity_field() {
    let store = InMemoryStore::with_rules(vec![socket_rule()]).unwrap();
    let sel = mismatched_sockets();

    let before = Evaluator::new(&store).evaluate(&sel).unwrap();
    store.update(&RuleId::from_str("rule-socket"), RulePatch::severity(Severity::Warning)).unwrap();
    let after = Evaluator::new(&store).evaluate(&sel).unwrap();

    assert_eq!(after.len(), 1);
    assert_eq!(after[0].severity, Severity::Warning);
    assert_eq!(after[0].message, before[0].message);
    assert_eq!(after[0].rule_id, before[0].rule_id);
}

#[test]
fn evaluation_is_deterministic() {
    let store = InMemoryStore::with_rules(vec![socket_rule(), wattage_rule()]).unwrap();
    let mut sel = mismatched_sockets();
    sel.insert("psu", part(serde_json::json!({"name": "450W PSU", "wattage": 450})));
    sel.insert("build", part(serde_json::json!({"name": "build", "totalDraw": 500})));

    let evaluator = Evaluator::new(&store);
    let a = evaluator.evaluate(&sel).unwrap();
    let b = evaluator.evaluate(&sel).unwrap();
    assert_eq!(a, b);
}

#[test]
fn bad_rule_config_does_not_block_other_rules() {
    let broken = rule(
        "rule-broken",
        1,
        Severity::Error,
        "never rendered",
        r#"{"kind":"astrology","sign":"aries"}"#,
    );
    let mut good = socket_rule();
    good.rule_number = 2;
    let store = InMemoryStore::with_rules(vec![broken, good]).unwrap();

    let issues = Evaluator::new(&store).evaluate(&mismatched_sockets()).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule_id.as_str(), "rule-socket");
}
