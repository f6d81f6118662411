use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Counter whose presence marks a collector module.
pub const COLLECTOR_MARKER: &str = "RawDiskBytes";

/// One poll's worth of named numeric counters.
///
/// Built from the flat JSON object returned by the stats endpoint.  Values
/// that are not numbers are dropped rather than failing the whole sample.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct Sample {
    counters: BTreeMap<String, f64>,
}

impl Sample {
    /// Value of `key`, if the backend reported it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<f64> {
        self.counters.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.counters.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.counters.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for Sample {
    fn from(map: Map<String, Value>) -> Self {
        let counters = map
            .into_iter()
            .filter_map(|(k, v)| v.as_f64().map(|n| (k, n)))
            .collect();
        Self { counters }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Sample {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            counters: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A single configuration value as reported by the backend.
///
/// The variant is fixed when the config response is decoded; the form uses it
/// to choose between a checkbox and a text input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    /// Numbers are kept as numbers so an unedited value is sent back as-is.
    Number(Number),
    Text(String),
}

impl ConfigValue {
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text shown in the input box for non-boolean values.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// New value after the user typed `input` into a field.
    ///
    /// `numeric` is whether the field was a number when the config was
    /// loaded.  Such a field is sent as a number whenever the input parses,
    /// no matter what was typed in between.
    #[must_use]
    pub fn from_input(input: String, numeric: bool) -> Self {
        if numeric {
            if let Ok(n) = input.trim().parse::<Number>() {
                return Self::Number(n);
            }
        }
        Self::Text(input)
    }
}

/// In-memory, editable mirror of the backend's configuration.
pub type ConfigState = BTreeMap<String, ConfigValue>;

/// Which backend module variant the dashboard is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleKind {
    /// Not classified yet.
    #[default]
    Unknown,
    Dispatcher,
    Collector,
}

impl ModuleKind {
    /// Classify a module from the shape of one stats payload.
    #[must_use]
    pub fn classify(sample: &Sample) -> Self {
        if sample.contains(COLLECTOR_MARKER) {
            Self::Collector
        } else {
            Self::Dispatcher
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sample_drops_non_numeric_values() {
        let sample: Sample =
            serde_json::from_value(json!({ "RawNetBytes": 5, "Name": "x", "Up": true })).unwrap();
        assert_eq!(sample.len(), 1);
        assert_eq!(sample.get("RawNetBytes"), Some(5.0));
        assert!(!sample.contains("Name"));
    }

    #[test]
    fn classify_dispatcher() {
        let sample = Sample::from_iter([("CompressedNetBytes", 10.0), ("RawNetBytes", 5.0)]);
        assert_eq!(ModuleKind::classify(&sample), ModuleKind::Dispatcher);
    }

    #[test]
    fn classify_collector() {
        let sample = Sample::from_iter([("RawDiskBytes", 7.0), ("CompressedNetBytes", 3.0)]);
        assert_eq!(ModuleKind::classify(&sample), ModuleKind::Collector);
    }

    #[test]
    fn config_values_decode_by_type() {
        let state: ConfigState = serde_json::from_value(json!({
            "Verbose": true,
            "DestinationHost": "10.0.0.1",
            "DestinationPort": 514,
        }))
        .unwrap();
        assert_eq!(state["Verbose"], ConfigValue::Bool(true));
        assert_eq!(state["DestinationHost"], ConfigValue::Text("10.0.0.1".into()));
        assert!(matches!(state["DestinationPort"], ConfigValue::Number(_)));
    }

    #[test]
    fn config_state_round_trips_unchanged() {
        let raw = json!({ "Verbose": false, "SyslogPort": 514, "Destination": "a:1" });
        let state: ConfigState = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&state).unwrap(), raw);
    }

    #[test]
    fn numeric_input_parses_only_for_numeric_fields() {
        assert_eq!(
            ConfigValue::from_input("6514".into(), true),
            ConfigValue::Number(6514.into())
        );
        assert_eq!(
            ConfigValue::from_input("65x".into(), true),
            ConfigValue::Text("65x".into())
        );
        assert_eq!(
            ConfigValue::from_input("42".into(), false),
            ConfigValue::Text("42".into())
        );
    }
}
