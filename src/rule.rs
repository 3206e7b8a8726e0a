//! Declarative crafting rules and the problem file they are loaded from.

use crate::{ItemUniverse, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// A raw production rule, before compilation into a [`Recipe`](crate::Recipe).
///
/// Every clause is optional. `requires` only asserts presence: the flag value
/// is not consulted, any listed item must be held in a positive quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "Requires", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requires: BTreeMap<String, bool>,
    #[serde(rename = "Consumes", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub consumes: BTreeMap<String, u64>,
    #[serde(rename = "Produces", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub produces: BTreeMap<String, u64>,
    #[serde(rename = "Time")]
    pub time: f64,
}

impl Rule {
    pub fn new(time: f64) -> Self {
        Self {
            time,
            ..Self::default()
        }
    }

    pub fn requires(mut self, item: impl Into<String>) -> Self {
        self.requires.insert(item.into(), true);
        self
    }

    pub fn consumes(mut self, item: impl Into<String>, quantity: u64) -> Self {
        self.consumes.insert(item.into(), quantity);
        self
    }

    pub fn produces(mut self, item: impl Into<String>, quantity: u64) -> Self {
        self.produces.insert(item.into(), quantity);
        self
    }

    /// Every item this rule mentions in any clause.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.requires
            .keys()
            .chain(self.consumes.keys())
            .chain(self.produces.keys())
            .map(String::as_str)
    }
}

/// A complete crafting problem as stored on disk.
///
/// ```
/// use craftplan::RuleSet;
///
/// let problem = RuleSet::from_json_str(r#"{
///     "Items": ["wood", "plank"],
///     "Initial": {"wood": 5},
///     "Goal": {"plank": 4},
///     "Recipes": {
///         "craft plank": {"Consumes": {"wood": 1}, "Produces": {"plank": 4}, "Time": 1}
///     }
/// }"#).unwrap();
///
/// assert_eq!(problem.items, ["wood", "plank"]);
/// assert_eq!(problem.recipes["craft plank"].produces["plank"], 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(rename = "Items")]
    pub items: Vec<String>,
    #[serde(rename = "Initial", default)]
    pub initial: BTreeMap<String, u64>,
    #[serde(rename = "Goal", default)]
    pub goal: BTreeMap<String, u64>,
    #[serde(rename = "Recipes", default)]
    pub recipes: BTreeMap<String, Rule>,
}

impl RuleSet {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn universe(&self) -> ItemUniverse {
        ItemUniverse::new(self.items.iter().cloned())
    }
}
