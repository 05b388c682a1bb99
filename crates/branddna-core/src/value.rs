//! Tagged value tree for open-ended brand documents.
//!
//! Typed blocks in [`crate::record`] cover the known attributes; this tree
//! keeps the whole document so facets and insight queries can address any
//! attribute by dotted path without reflection.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Text(String),
    Number(f64),
    Bool(bool),
    List(Vec<AttrValue>),
    Map(BTreeMap<String, AttrValue>),
}

impl AttrValue {
    /// Walk `path` (split on `.`) through nested maps.
    ///
    /// Returns `None` as soon as a segment is missing or the current node is
    /// not a map. List-valued attributes come back as the list itself.
    pub fn resolve(&self, path: &str) -> Option<&AttrValue> {
        path.split('.').try_fold(self, |node, key| match node {
            AttrValue::Map(map) if !key.is_empty() => map.get(key),
            _ => None,
        })
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, AttrValue>> {
        match self {
            AttrValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Category codes carried by this value.
    ///
    /// A non-empty text scalar yields itself; a list yields its non-empty text
    /// elements in order. Everything else (numbers, maps, empty strings) is
    /// not categorical and yields nothing.
    pub fn categories(&self) -> Vec<&str> {
        match self {
            AttrValue::Text(s) if !s.is_empty() => vec![s.as_str()],
            AttrValue::List(items) => items
                .iter()
                .filter_map(AttrValue::as_text)
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl From<&serde_json::Value> for AttrValue {
    /// JSON `null` has no counterpart: null map entries and list items are
    /// dropped so they read as absent, and a bare `null` becomes an empty map.
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => AttrValue::Map(BTreeMap::new()),
            Value::Bool(b) => AttrValue::Bool(*b),
            Value::Number(n) => AttrValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => AttrValue::Text(s.clone()),
            Value::Array(items) => AttrValue::List(
                items
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(AttrValue::from)
                    .collect(),
            ),
            Value::Object(obj) => AttrValue::Map(
                obj.iter()
                    .filter(|(_, v)| !v.is_null())
                    .map(|(k, v)| (k.clone(), AttrValue::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> AttrValue {
        AttrValue::from(&json!({
            "dna": {
                "positioning": {
                    "price_segment": "premium",
                    "price_zone": { "p50": 120.0 }
                },
                "operations": { "channels": ["dtc", "wholesale"] },
                "style": { "style_primary": null }
            }
        }))
    }

    #[test]
    fn resolves_nested_scalar() {
        let doc = doc();
        assert_eq!(
            doc.resolve("dna.positioning.price_segment")
                .and_then(AttrValue::as_text),
            Some("premium")
        );
        assert_eq!(
            doc.resolve("dna.positioning.price_zone.p50")
                .and_then(AttrValue::as_number),
            Some(120.0)
        );
    }

    #[test]
    fn resolves_list_as_list() {
        let doc = doc();
        let channels = doc.resolve("dna.operations.channels").unwrap();
        assert_eq!(channels.categories(), vec!["dtc", "wholesale"]);
    }

    #[test]
    fn missing_intermediate_yields_none() {
        let doc = doc();
        assert!(doc.resolve("dna.audience.gender_focus").is_none());
        assert!(doc.resolve("dna.positioning.price_segment.deeper").is_none());
        assert!(doc.resolve("dna..positioning").is_none());
        assert!(doc.resolve("").is_none());
    }

    #[test]
    fn null_reads_as_absent() {
        let doc = doc();
        assert!(doc.resolve("dna.style.style_primary").is_none());
    }

    #[test]
    fn non_categorical_values_have_no_categories() {
        assert!(AttrValue::Number(0.4).categories().is_empty());
        assert!(AttrValue::Text(String::new()).categories().is_empty());
        let mixed = AttrValue::List(vec![
            AttrValue::Text("a".into()),
            AttrValue::Number(1.0),
            AttrValue::Text(String::new()),
        ]);
        assert_eq!(mixed.categories(), vec!["a"]);
    }
}
