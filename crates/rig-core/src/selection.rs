use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::predicate::AttributePath;

/// One chosen part. Catalog-specific fields (socket, wattage, formFactor,
/// ...) live in the flattened attribute map; `name`, `brand` and `price`
/// are common to every category.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Part {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(flatten)]
    pub attributes: BTreeMap<String, Value>,
}

impl Part {
    pub fn attr(&self, attribute: &str) -> Option<Value> {
        match attribute {
            "name" => Some(Value::from(self.name.clone())),
            "brand" => self.brand.clone().map(Value::from),
            "price" => serde_json::Number::from_f64(self.price).map(Value::Number),
            _ => self.attributes.get(attribute).cloned(),
        }
    }
}

/// The parts chosen for a build, keyed by category slug (`cpu`,
/// `motherboard`, `psu`, ...). Categories with no part chosen are simply
/// absent. A BTreeMap keeps iteration order stable between evaluations.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PartSelection(pub BTreeMap<String, Part>);

impl PartSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, part: Part) {
        self.0.insert(category.into(), part);
    }

    pub fn get(&self, category: &str) -> Option<&Part> {
        self.0.get(category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.0.contains_key(category)
    }

    pub fn parts(&self) -> impl Iterator<Item = (&String, &Part)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Flat lookup used for message substitutions: absent category and
    /// absent attribute both come back as `None`.
    pub fn resolve(&self, path: &AttributePath) -> Option<Value> {
        self.0.get(&path.category).and_then(|p| p.attr(&path.attribute))
    }
}

/// String form of an attribute value for message substitution. Strings are
/// unquoted; everything else keeps its JSON rendering.
pub fn value_display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Display form for literal threshold operands: whole numbers drop the
/// trailing `.0` so messages read `450`, not `450.0`.
pub fn number_display(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
