use anyhow::{anyhow, Context, Result};
use rig_core::{PredicateConfig, Rule, RuleId, Severity};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A provisioning bundle of compatibility rules. Packs are how rule sets
/// enter the store; after seeding, admins only ever toggle activation and
/// severity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RulePack {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rules: Vec<RuleSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Stable id; minted on compile when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub rule_number: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub severity: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub message_template: String,
    /// Predicate spec in its structured form; stored as canonical JSON.
    pub rule_config: serde_json::Value,
}

fn default_active() -> bool {
    true
}

pub fn load_rule_pack(path: &std::path::Path) -> Result<RulePack> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read rule pack: {}", path.display()))?;
    parse_rule_pack(&s)
}

pub fn parse_rule_pack(yaml: &str) -> Result<RulePack> {
    let pack: RulePack = serde_yaml::from_str(yaml).with_context(|| "parse rule pack yaml")?;
    validate_rule_pack(&pack)?;
    Ok(pack)
}

/// Seeding is strict where evaluation is soft: a pack that would produce
/// misconfigured rules is rejected here, before anything reaches the store.
pub fn validate_rule_pack(pack: &RulePack) -> Result<()> {
    if pack.name.trim().is_empty() {
        return Err(anyhow!("rule pack missing name"));
    }
    if pack.rules.is_empty() {
        return Err(anyhow!("rule pack must include at least one rule"));
    }
    let mut seen_numbers = std::collections::HashSet::new();
    let mut seen_ids = std::collections::HashSet::new();
    for rule in &pack.rules {
        if rule.rule_number == 0 {
            return Err(anyhow!("rule {:?}: rule_number must be positive", rule.name));
        }
        if !seen_numbers.insert(rule.rule_number) {
            return Err(anyhow!("duplicate rule_number {}", rule.rule_number));
        }
        if let Some(id) = &rule.id {
            if !seen_ids.insert(id.clone()) {
                return Err(anyhow!("duplicate rule id {:?}", id));
            }
        }
        if rule.name.trim().is_empty() {
            return Err(anyhow!("rule #{} missing name", rule.rule_number));
        }
        if Severity::parse(&rule.severity).is_none() {
            return Err(anyhow!(
                "rule #{}: invalid severity {:?} (expected error|warning)",
                rule.rule_number,
                rule.severity
            ));
        }
        if rule.message_template.trim().is_empty() {
            return Err(anyhow!("rule #{} missing message_template", rule.rule_number));
        }
        serde_json::from_value::<PredicateConfig>(rule.rule_config.clone()).with_context(|| {
            format!("rule #{}: unsupported rule_config", rule.rule_number)
        })?;
    }
    Ok(())
}

pub fn canonical_json(pack: &RulePack) -> serde_json::Value {
    let v = serde_json::to_value(pack).expect("RulePack serializable");
    sort_json(v)
}

/// Recursively sort object keys for stable hashing.
fn sort_json(v: serde_json::Value) -> serde_json::Value {
    match v {
        serde_json::Value::Object(map) => {
            let mut keys: Vec<_> = map.keys().cloned().collect();
            keys.sort();
            let mut new_map = serde_json::Map::new();
            for k in keys {
                let child = map.get(&k).cloned().unwrap_or(serde_json::Value::Null);
                new_map.insert(k, sort_json(child));
            }
            serde_json::Value::Object(new_map)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(sort_json).collect())
        }
        other => other,
    }
}

/// Content fingerprint of a pack, reported at seed time so operators can
/// tell which revision a store was provisioned from.
pub fn pack_hash(pack: &RulePack) -> String {
    let v = canonical_json(pack);
    let bytes = serde_json::to_vec(&v).expect("json bytes");
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    hex::encode(digest)
}

/// Turn a validated pack into storable rules. Severity strings were
/// checked by `validate_rule_pack`; ids are minted where the pack left
/// them out.
pub fn compile_rules(pack: &RulePack) -> Vec<Rule> {
    pack.rules
        .iter()
        .map(|spec| Rule {
            id: spec
                .id
                .as_deref()
                .map(RuleId::from_str)
                .unwrap_or_default(),
            rule_number: spec.rule_number,
            name: spec.name.clone(),
            description: spec.description.clone(),
            severity: Severity::parse(&spec.severity).unwrap_or(Severity::Warning),
            is_active: spec.is_active,
            message_template: spec.message_template.clone(),
            rule_config: serde_json::to_string(&sort_json(spec.rule_config.clone()))
                .expect("json bytes"),
        })
        .collect()
}
