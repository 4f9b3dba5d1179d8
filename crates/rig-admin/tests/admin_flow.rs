use rig_admin::RuleAdmin;
use rig_core::{Part, PartSelection, Rule, RuleId, Severity};
use rig_engine::Evaluator;
use rig_store::InMemoryStore;

fn wattage_rule() -> Rule {
    Rule {
        id: RuleId::from_str("rule-wattage"),
        rule_number: 2,
        name: "PSU Wattage".to_string(),
        description: String::new(),
        severity: Severity::Warning,
        is_active: true,
        message_template: "PSU provides {actual}W but the build draws {expected}W".to_string(),
        rule_config: r#"{"kind":"threshold","left":"psu.wattage","op":">=","right":"build.totalDraw"}"#
            .to_string(),
    }
}

fn underpowered_selection() -> PartSelection {
    let mut sel = PartSelection::new();
    let psu: Part = serde_json::from_value(serde_json::json!({"name": "450W", "wattage": 450})).unwrap();
    let build: Part =
        serde_json::from_value(serde_json::json!({"name": "build", "totalDraw": 500})).unwrap();
    sel.insert("psu", psu);
    sel.insert("build", build);
    sel
}

#[test]
fn disabled_rule_is_invisible_to_the_next_evaluation() {
    let store = InMemoryStore::with_rules(vec![wattage_rule()]).unwrap();
    let sel = underpowered_selection();

    assert_eq!(Evaluator::new(&store).evaluate(&sel).unwrap().len(), 1);

    RuleAdmin::new(&store)
        .set_active(&RuleId::from_str("rule-wattage"), false)
        .unwrap();

    assert!(Evaluator::new(&store).evaluate(&sel).unwrap().is_empty());
}

#[test]
fn severity_edit_shows_up_without_any_cache_to_clear() {
    let store = InMemoryStore::with_rules(vec![wattage_rule()]).unwrap();
    let sel = underpowered_selection();

    RuleAdmin::new(&store)
        .set_severity(&RuleId::from_str("rule-wattage"), "error")
        .unwrap();

    let issues = Evaluator::new(&store).evaluate(&sel).unwrap();
    assert_eq!(issues[0].severity, Severity::Error);
}
