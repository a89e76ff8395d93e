use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Address components of the device position, as returned by reverse geocoding
/// (street, district, city, region, postal code, country...).
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalityDescriptor {
    pub components: Vec<String>,
}

impl<S: Into<String>> FromIterator<S> for LocalityDescriptor {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl LocalityDescriptor {
    pub fn new(components: Vec<String>) -> Self {
        Self { components }
    }

    pub fn is_empty(&self) -> bool {
        self.components.iter().all(|c| c.trim().is_empty())
    }

    /// Lower-cased words of every component, commas removed.
    pub fn tokens(&self) -> HashSet<String> {
        tokenize(&self.components.join(" "))
    }
}

pub fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .replace(',', "")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// The `major_cities` field of a bus as it was stored.
/// Only a list of strings is usable; anything else is kept so the bus can be
/// told apart from one that has no route at all.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DeclaredRoute {
    #[default]
    Missing,
    Cities(Vec<String>),
    Malformed(serde_json::Value),
}

impl From<Vec<String>> for DeclaredRoute {
    fn from(value: Vec<String>) -> Self {
        Self::Cities(value)
    }
}

impl From<serde_json::Value> for DeclaredRoute {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Missing,
            value => serde_json::from_value::<Vec<String>>(value.clone())
                .map(Self::Cities)
                .unwrap_or(Self::Malformed(value)),
        }
    }
}

impl DeclaredRoute {
    /// Every city name on the route, trimmed and lower-cased. Entries may hold
    /// several cities separated by commas. `None` when the route is unusable.
    pub fn city_names(&self) -> Option<HashSet<String>> {
        match self {
            DeclaredRoute::Cities(entries) => Some(
                entries
                    .iter()
                    .flat_map(|entry| entry.split(','))
                    .map(|city| city.trim().to_lowercase())
                    .filter(|city| !city.is_empty())
                    .collect(),
            ),
            DeclaredRoute::Missing | DeclaredRoute::Malformed(_) => None,
        }
    }

    /// Exact match of any city against any token.
    pub fn serves(&self, tokens: &HashSet<String>) -> bool {
        match self.city_names() {
            Some(cities) => cities.iter().any(|city| tokens.contains(city)),
            None => false,
        }
    }
}

#[test]
fn tokenize_test() {
    let tokens = tokenize("12 Main Street, Springfield,  North District");
    assert!(tokens.contains("springfield"));
    assert!(tokens.contains("north"));
    assert!(tokens.contains("district"));
    assert!(!tokens.contains(""));
    assert!(!tokens.contains("springfield,"));
}

#[test]
fn route_from_value_test() {
    let value = serde_json::json!(["Springfield, North District"]);
    assert!(matches!(DeclaredRoute::from(value), DeclaredRoute::Cities(_)));
    let value = serde_json::json!("not-a-list");
    assert!(matches!(
        DeclaredRoute::from(value),
        DeclaredRoute::Malformed(_)
    ));
    assert_eq!(
        DeclaredRoute::from(serde_json::Value::Null),
        DeclaredRoute::Missing
    );
}
