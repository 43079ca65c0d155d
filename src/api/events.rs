use serde_json::{Map, Value};

use crate::api::models::Scope;

/// Places a directive may carry its scope, highest priority first.
const SCOPE_PATHS: [(&str, &str); 3] = [
    ("endpoint", "scope"),
    ("payload", "grantee"),
    ("payload", "scope"),
];

/// Raw invocation event. The whole value is forwarded to the backend as-is,
/// so it is kept untyped and only the fields the relay checks are read.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingEvent {
    raw: Value,
}

impl IncomingEvent {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn directive(&self) -> Option<Directive<'_>> {
        self.raw
            .get("directive")
            .and_then(Value::as_object)
            .map(|fields| Directive { fields })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Directive<'a> {
    fields: &'a Map<String, Value>,
}

impl<'a> Directive<'a> {
    pub fn payload_version(&self) -> Option<&'a str> {
        self.fields
            .get("header")
            .and_then(|h| h.get("payloadVersion"))
            .and_then(Value::as_str)
    }

    /// First non-empty scope mapping found along `SCOPE_PATHS`.
    pub fn scope(&self) -> Option<Scope> {
        SCOPE_PATHS.iter().find_map(|&(section, key)| {
            let candidate = self.fields.get(section)?.get(key)?.as_object()?;
            if candidate.is_empty() {
                return None;
            }
            Some(Scope {
                kind: candidate.get("type").and_then(Value::as_str).map(str::to_string),
                token: candidate.get("token").and_then(Value::as_str).map(str::to_string),
            })
        })
    }
}
