//! Open-ended per-request option bag.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request options, modeled as an open bag of JSON entries.
///
/// Only two entries are interpreted by the adapters: `temperature`
/// (sampling temperature) and `num_predict` (response token cap).
/// Unrecognized entries are carried along untouched — the local provider
/// receives the whole bag verbatim, the cloud adapter ignores them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatOptions {
    entries: Map<String, Value>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.entries
            .insert("temperature".to_string(), Value::from(temperature));
        self
    }

    pub fn with_num_predict(mut self, num_predict: u32) -> Self {
        self.entries
            .insert("num_predict".to_string(), Value::from(num_predict));
        self
    }

    /// Insert an arbitrary entry; interpreted by the provider, not here.
    pub fn with_entry(mut self, key: impl Into<String>, value: Value) -> Self {
        self.entries.insert(key.into(), value);
        self
    }

    pub fn temperature(&self) -> Option<f64> {
        self.entries.get("temperature").and_then(Value::as_f64)
    }

    pub fn num_predict(&self) -> Option<u64> {
        self.entries.get("num_predict").and_then(Value::as_u64)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Map<String, Value>> for ChatOptions {
    fn from(entries: Map<String, Value>) -> Self {
        Self { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpreted_entries_round_trip() {
        let options = ChatOptions::new().with_temperature(0.2).with_num_predict(50);
        assert_eq!(options.temperature(), Some(0.2));
        assert_eq!(options.num_predict(), Some(50));
    }

    #[test]
    fn converts_from_a_raw_map_and_reports_emptiness() {
        assert!(ChatOptions::new().is_empty());

        let mut map = Map::new();
        map.insert("num_predict".to_string(), Value::from(128));
        let options = ChatOptions::from(map);
        assert!(!options.is_empty());
        assert_eq!(options.num_predict(), Some(128));
    }

    #[test]
    fn unknown_entries_are_kept_not_rejected() {
        let options: ChatOptions =
            serde_json::from_value(serde_json::json!({"top_k": 40, "temperature": 0.5})).unwrap();
        assert_eq!(options.temperature(), Some(0.5));
        let value = serde_json::to_value(&options).unwrap();
        assert_eq!(value["top_k"], 40);
    }
}
