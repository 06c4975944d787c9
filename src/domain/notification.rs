//! Transient notification payloads and their wire envelope.

use serde_json::{Map, Value};

use crate::error::GatewayError;

/// Kind used when the caller does not name one.
pub const DEFAULT_KIND: &str = "notification";

/// A fire-and-forget notification addressed to one user.
///
/// Serialized on the wire as
/// `{"notification": {"message": .., "type": .., ...extra}}`. Extra fields
/// are merged after `message` and `type`, so a colliding extra key wins.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    message: String,
    kind: String,
    extra: Map<String, Value>,
}

impl Notification {
    /// Creates a notification with no extra fields.
    #[must_use]
    pub fn new(message: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: kind.into(),
            extra: Map::new(),
        }
    }

    /// Replaces the extra payload.
    #[must_use]
    pub fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    /// Adds a single extra field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Client-side dispatch tag.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Extra fields merged into the envelope.
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Builds the JSON envelope sent to clients.
    #[must_use]
    pub fn to_envelope(&self) -> Value {
        let mut body = Map::with_capacity(self.extra.len() + 2);
        body.insert("message".to_string(), Value::String(self.message.clone()));
        body.insert("type".to_string(), Value::String(self.kind.clone()));
        for (key, value) in &self.extra {
            body.insert(key.clone(), value.clone());
        }

        let mut envelope = Map::with_capacity(1);
        envelope.insert("notification".to_string(), Value::Object(body));
        Value::Object(envelope)
    }

    /// Serializes the envelope into a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Serialization`] if encoding fails.
    pub fn to_frame(&self) -> Result<String, GatewayError> {
        Ok(serde_json::to_string(&self.to_envelope())?)
    }

    /// Interprets an arbitrary admin payload as a notification.
    ///
    /// Every shape is accepted:
    /// - object: `message` and `type` are lifted out (defaults `""` and
    ///   [`DEFAULT_KIND`]), every other field becomes extra;
    /// - string: used as the message;
    /// - `null`: empty message;
    /// - number, boolean or array: its JSON text becomes the kind.
    ///
    /// Non-string `message`/`type` values inside an object are replaced by
    /// their JSON text.
    #[must_use]
    pub fn from_payload(payload: Value) -> Self {
        match payload {
            Value::Null => Self::new("", DEFAULT_KIND),
            Value::String(message) => Self::new(message, DEFAULT_KIND),
            Value::Object(mut fields) => {
                let message = take_text(&mut fields, "message").unwrap_or_default();
                let kind =
                    take_text(&mut fields, "type").unwrap_or_else(|| DEFAULT_KIND.to_string());
                Self::new(message, kind).with_extra(fields)
            }
            other => Self::new("", other.to_string()),
        }
    }
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn envelope_merges_extra_fields() {
        let n = Notification::new("msg", "info").with_field("extra", 1);
        assert_eq!(
            n.to_envelope(),
            json!({"notification": {"message": "msg", "type": "info", "extra": 1}})
        );
    }

    #[test]
    fn extra_overrides_reserved_keys() {
        let n = Notification::new("msg", "info").with_field("type", "override");
        assert_eq!(n.to_envelope()["notification"]["type"], json!("override"));
    }

    #[test]
    fn frame_is_valid_json() {
        let Ok(frame) = Notification::new("hi", "showNotification").to_frame() else {
            panic!("serialization failed");
        };
        let Ok(parsed) = serde_json::from_str::<Value>(&frame) else {
            panic!("frame is not json");
        };
        assert_eq!(parsed["notification"]["message"], json!("hi"));
    }

    #[test]
    fn object_payload_is_split() {
        let n = Notification::from_payload(json!({
            "message": "Points added",
            "type": "refreshUserPoints",
            "points": 120
        }));
        assert_eq!(n.message(), "Points added");
        assert_eq!(n.kind(), "refreshUserPoints");
        assert_eq!(n.extra().get("points"), Some(&json!(120)));
        assert!(!n.extra().contains_key("message"));
    }

    #[test]
    fn string_and_null_payloads_use_default_kind() {
        let from_str = Notification::from_payload(json!("hello"));
        assert_eq!(from_str.message(), "hello");
        assert_eq!(from_str.kind(), DEFAULT_KIND);

        let from_null = Notification::from_payload(Value::Null);
        assert_eq!(from_null.message(), "");
        assert_eq!(from_null.kind(), DEFAULT_KIND);
    }

    #[test]
    fn scalar_and_array_payloads_become_the_kind() {
        assert_eq!(Notification::from_payload(json!(42)).kind(), "42");
        assert_eq!(Notification::from_payload(json!(true)).kind(), "true");
        assert_eq!(Notification::from_payload(json!([1, 2])).kind(), "[1,2]");
        assert_eq!(Notification::from_payload(json!(42)).message(), "");
    }

    #[test]
    fn non_string_message_and_type_are_stringified() {
        let n = Notification::from_payload(json!({"message": 42, "type": true, "points": 3}));
        assert_eq!(n.message(), "42");
        assert_eq!(n.kind(), "true");
        assert_eq!(n.extra().get("points"), Some(&json!(3)));
    }
}
