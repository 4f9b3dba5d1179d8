use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::CompareOp;

/// `category.attribute` reference into a part selection, e.g. `cpu.socket`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttributePath {
    pub category: String,
    pub attribute: String,
}

impl AttributePath {
    pub fn new(category: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.category, self.attribute)
    }
}

impl TryFrom<String> for AttributePath {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.split_once('.') {
            Some((category, attribute)) if !category.is_empty() && !attribute.is_empty() => {
                Ok(Self::new(category, attribute))
            }
            _ => Err(format!("attribute path must be category.attribute, got {:?}", s)),
        }
    }
}

impl From<AttributePath> for String {
    fn from(path: AttributePath) -> String {
        path.to_string()
    }
}

/// Right-hand side of a threshold comparison: another attribute or a
/// literal number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    Path(AttributePath),
    Literal(f64),
}

/// The closed set of predicate kinds a rule config may use. Stored as JSON
/// with a `kind` tag; unknown tags fail to parse and the owning rule is
/// soft-skipped during evaluation.
///
/// `substitutions` maps extra message placeholders to attribute paths so
/// templates can name values beyond the operands themselves
/// (`{cpuSocket}`, `{partName}`, ...).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredicateConfig {
    Equals {
        left: AttributePath,
        right: AttributePath,
        #[serde(default)]
        substitutions: BTreeMap<String, AttributePath>,
    },
    Threshold {
        left: AttributePath,
        op: CompareOp,
        right: Operand,
        #[serde(default)]
        substitutions: BTreeMap<String, AttributePath>,
    },
    Requires {
        category: String,
        #[serde(default)]
        substitutions: BTreeMap<String, AttributePath>,
    },
}

impl PredicateConfig {
    /// Parse the stored JSON form of a rule's predicate.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn substitutions(&self) -> &BTreeMap<String, AttributePath> {
        match self {
            Self::Equals { substitutions, .. }
            | Self::Threshold { substitutions, .. }
            | Self::Requires { substitutions, .. } => substitutions,
        }
    }
}
