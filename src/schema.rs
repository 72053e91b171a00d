//! Schema types for public minimal incident logs and their events.
//!
//! Loading is deliberately forgiving: a field that cannot be read degrades to
//! "unknown" for that event instead of rejecting the whole log.

use anyhow::{anyhow, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// Schema tag written into logs produced by this tool.
pub const SCHEMA_VERSION: &str = "sia_audit_minimal_v0_public";

const UNKNOWN_CASE_ID: &str = "unknown_case";

/// How much the cited source can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    #[default]
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    fn from_value(value: Option<&Value>) -> Self {
        let Some(value) = value.filter(|value| !value.is_null()) else {
            return Confidence::default();
        };
        match value.as_str().map(|raw| raw.trim().to_ascii_lowercase()) {
            Some(raw) if raw == "high" => Confidence::High,
            Some(raw) if raw == "medium" => Confidence::Medium,
            _ => Confidence::Low,
        }
    }
}

/// Provenance attached to an event. Never affects scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    #[serde(rename = "ref")]
    pub reference: String,
    pub note: String,
    pub confidence: Confidence,
}

impl SourceRef {
    pub fn new(reference: &str, note: &str, confidence: Confidence) -> Self {
        Self {
            reference: reference.to_string(),
            note: note.to_string(),
            confidence,
        }
    }

    fn from_object(raw: &Map<String, Value>) -> Self {
        Self {
            reference: text_field(raw.get("ref")),
            note: text_field(raw.get("note")),
            confidence: Confidence::from_value(raw.get("confidence")),
        }
    }
}

/// One timestamped, typed observation about the incident.
///
/// `t_rel_s` is seconds relative to impact (impact = 0). `None` means the time
/// is unknown, which is not the same as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub t_rel_s: Option<f64>,
    #[serde(rename = "type")]
    pub kind: String,
    pub actor: String,
    pub data: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,
}

impl Event {
    pub fn new(t_rel_s: Option<f64>, kind: &str, actor: &str, data: Value) -> Self {
        let data = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            t_rel_s,
            kind: kind.to_string(),
            actor: actor.to_string(),
            data,
            source: None,
        }
    }

    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.source = Some(source);
        self
    }

    pub fn is_timed(&self) -> bool {
        self.t_rel_s.is_some()
    }

    /// Type-family membership by literal prefix on the dotted type string.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.kind.starts_with(prefix)
    }

    /// Best-effort conversion of one raw event record.
    ///
    /// Returns `None` only when the record is not a JSON object.
    pub fn from_value(raw: &Value) -> Option<Self> {
        let raw = raw.as_object()?;
        let data = match raw.get("data") {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        };
        let source = match raw.get("source") {
            Some(Value::Object(map)) => Some(SourceRef::from_object(map)),
            _ => None,
        };
        Some(Self {
            t_rel_s: float_or_none(raw.get("t_rel_s")),
            kind: text_field(raw.get("type")),
            actor: text_field(raw.get("actor")),
            data,
            source,
        })
    }
}

/// A loaded log document, kept as raw JSON so it can be re-saved untouched.
#[derive(Debug, Clone)]
pub struct MinimalLog {
    raw: Value,
}

impl MinimalLog {
    pub fn from_value(raw: Value) -> Result<Self> {
        if !raw.is_object() {
            return Err(anyhow!("input JSON must be an object"));
        }
        Ok(Self { raw })
    }

    pub fn parse(text: &str) -> Result<Self> {
        let raw: Value = serde_json::from_str(text)?;
        Self::from_value(raw)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn schema(&self) -> &str {
        self.raw.get("schema").and_then(Value::as_str).unwrap_or("")
    }

    pub fn generated_at(&self) -> Option<&str> {
        self.raw.get("generated_at").and_then(Value::as_str)
    }

    pub fn case(&self) -> Option<&Map<String, Value>> {
        self.raw.get("case").and_then(Value::as_object)
    }

    pub fn case_id(&self) -> String {
        self.case()
            .and_then(|case| case.get("case_id"))
            .and_then(Value::as_str)
            .filter(|id| !id.trim().is_empty())
            .unwrap_or(UNKNOWN_CASE_ID)
            .to_string()
    }

    pub fn case_title(&self) -> Option<String> {
        self.case()
            .and_then(|case| case.get("title"))
            .and_then(Value::as_str)
            .filter(|title| !title.trim().is_empty())
            .map(str::to_string)
    }

    /// Events in document order. Non-object entries are skipped.
    pub fn events(&self) -> Vec<Event> {
        let Some(raw_events) = self.raw.get("events").and_then(Value::as_array) else {
            return Vec::new();
        };
        raw_events
            .iter()
            .enumerate()
            .filter_map(|(index, raw)| {
                let event = Event::from_value(raw);
                if event.is_none() {
                    tracing::warn!(index, "skipping event entry that is not a JSON object");
                }
                event
            })
            .collect()
    }
}

fn float_or_none(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|seconds| seconds.is_finite())
}

fn text_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
