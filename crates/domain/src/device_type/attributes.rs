use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, Result};

/// Caller-owned payload of a device type; never interpreted by the core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Shallow merge: non-null values overwrite, nulls remove the key
    pub fn apply(&mut self, patch: &AttributePatch) {
        for (key, value) in patch.0.iter() {
            if value.is_null() {
                self.0.remove(key);
            } else {
                self.0.insert(key.clone(), value.clone());
            }
        }
    }
}

impl TryFrom<Value> for Attributes {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::ValidationFailed(format!(
                "Attributes must be a JSON object, got {other}"
            ))),
        }
    }
}

/// Attribute changes applied by an update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributePatch(Map<String, Value>);

impl AttributePatch {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for AttributePatch {
    type Error = DomainError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(DomainError::ValidationFailed(format!(
                "Patch must be a JSON object, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_overwrites_and_adds() {
        let mut attrs = Attributes::try_from(json!({"name": "Sensor", "rev": 1})).unwrap();
        let patch = AttributePatch::try_from(json!({"rev": 2, "vendor": "Acme"})).unwrap();

        attrs.apply(&patch);

        assert_eq!(
            attrs.into_value(),
            json!({"name": "Sensor", "rev": 2, "vendor": "Acme"})
        );
    }

    #[test]
    fn test_apply_null_removes_key() {
        let mut attrs = Attributes::try_from(json!({"name": "Sensor", "description": "x"})).unwrap();
        let patch = AttributePatch::try_from(json!({"description": null})).unwrap();

        attrs.apply(&patch);

        assert_eq!(attrs.get("description"), None);
        assert_eq!(attrs.get("name"), Some(&json!("Sensor")));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(
            Attributes::try_from(json!([1, 2])),
            Err(DomainError::ValidationFailed(_))
        ));
        assert!(matches!(
            AttributePatch::try_from(json!("name")),
            Err(DomainError::ValidationFailed(_))
        ));
    }
}
