//! Action records and their untyped JSON form.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::StoreError;

/// A tagged record describing an intended state change.
///
/// Actions are usually enums, one variant per kind, so reducers can match
/// on them exhaustively. `kind` returns the discriminant as it appears in
/// the `type` field of the JSON form.
pub trait Action: Clone + fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> &'static str;
}

/// An action that can be decoded from a [`RawAction`].
///
/// Implementors are expected to derive `Deserialize` with
/// `#[serde(tag = "type")]`, and `KINDS` must list every tag the enum
/// accepts. A raw action whose tag is not in `KINDS` is treated as
/// unrecognized rather than malformed.
pub trait DecodeAction: Action + DeserializeOwned {
    const KINDS: &'static [&'static str];
}

/// Untyped action: a `type` discriminant plus an arbitrary payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAction {
    kind: String,
    payload: Map<String, Value>,
}

impl RawAction {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    /// Adds a payload field. A `type` key is ignored.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != "type" {
            self.payload.insert(key, value.into());
        }
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn to_value(&self) -> Value {
        let mut object = self.payload.clone();
        object.insert("type".to_string(), Value::String(self.kind.clone()));
        Value::Object(object)
    }

    /// Decodes into a typed action.
    ///
    /// Returns `Ok(None)` when `A` has no variant for this kind.
    pub fn decode<A: DecodeAction>(&self) -> Result<Option<A>, StoreError> {
        if !A::KINDS.contains(&self.kind.as_str()) {
            return Ok(None);
        }
        serde_json::from_value(self.to_value())
            .map(Some)
            .map_err(|source| StoreError::MalformedPayload {
                kind: self.kind.clone(),
                source,
            })
    }
}

impl TryFrom<Value> for RawAction {
    type Error = StoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let mut payload = match value {
            Value::Object(payload) => payload,
            other => {
                return Err(StoreError::invalid(format!(
                    "expected a JSON object, got {}",
                    json_type_name(&other)
                )))
            }
        };

        match payload.remove("type") {
            Some(Value::String(kind)) if !kind.trim().is_empty() => Ok(Self { kind, payload }),
            Some(Value::String(_)) => Err(StoreError::invalid("'type' must not be empty")),
            Some(other) => Err(StoreError::invalid(format!(
                "'type' must be a string, got {}",
                json_type_name(&other)
            ))),
            None => Err(StoreError::invalid("missing 'type' field")),
        }
    }
}

impl FromStr for RawAction {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)
            .map_err(|e| StoreError::invalid(format!("not valid JSON: {}", e)))?;
        Self::try_from(value)
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    #[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
    enum NoteAction {
        AddNote { text: String },
        Clear,
    }

    impl Action for NoteAction {
        fn kind(&self) -> &'static str {
            match self {
                NoteAction::AddNote { .. } => "ADD_NOTE",
                NoteAction::Clear => "CLEAR",
            }
        }
    }

    impl DecodeAction for NoteAction {
        const KINDS: &'static [&'static str] = &["ADD_NOTE", "CLEAR"];
    }

    #[test]
    fn missing_type_is_invalid() {
        let err = RawAction::try_from(json!({"text": "hi"})).unwrap_err();
        assert!(matches!(err, StoreError::InvalidAction { .. }));
        assert!(err.to_string().contains("missing 'type'"));
    }

    #[test]
    fn non_string_type_is_invalid() {
        let err = RawAction::try_from(json!({"type": 3})).unwrap_err();
        assert!(err.to_string().contains("got a number"));
    }

    #[test]
    fn non_object_is_invalid() {
        let err = RawAction::try_from(json!(["ADD"])).unwrap_err();
        assert!(err.to_string().contains("got an array"));
    }

    #[test]
    fn blank_type_is_invalid() {
        assert!(RawAction::try_from(json!({"type": "  "})).is_err());
    }

    #[test]
    fn type_is_split_from_payload() {
        let raw: RawAction = r#"{"type": "ADD_NOTE", "text": "Hello!"}"#.parse().unwrap();
        assert_eq!(raw.kind(), "ADD_NOTE");
        assert_eq!(raw.payload().get("text"), Some(&json!("Hello!")));
        assert!(raw.payload().get("type").is_none());
    }

    #[test]
    fn decode_known_kind() {
        let raw = RawAction::new("ADD_NOTE").with("text", "Hello!");
        let action: Option<NoteAction> = raw.decode().unwrap();
        assert_eq!(
            action,
            Some(NoteAction::AddNote {
                text: "Hello!".to_string()
            })
        );
    }

    #[test]
    fn decode_unknown_kind_is_none() {
        let raw = RawAction::new("LOGIN");
        let action: Option<NoteAction> = raw.decode().unwrap();
        assert!(action.is_none());
    }

    #[test]
    fn decode_bad_payload_is_malformed() {
        let raw = RawAction::new("ADD_NOTE").with("text", 42);
        let err = raw.decode::<NoteAction>().unwrap_err();
        assert!(matches!(err, StoreError::MalformedPayload { ref kind, .. } if kind == "ADD_NOTE"));
    }

    #[test]
    fn with_ignores_type_key() {
        let raw = RawAction::new("CLEAR").with("type", "OTHER");
        assert_eq!(raw.to_value(), json!({"type": "CLEAR"}));
    }
}
