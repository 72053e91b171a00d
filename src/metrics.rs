//! Numeric facts read directly off event timestamps and payloads.
use crate::schema::Event;
use serde::Serialize;
use serde_json::Value;

const DETECT_PREFIX: &str = "perception.detect";
const GAZE_PREFIX: &str = "human.attention";
const STEER_PREFIX: &str = "human.control_input";
const IMPACT_TYPE: &str = "impact";

/// Derived metrics. Every field is `None` when it cannot be derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub lead_time_detection_s: Option<f64>,
    pub lead_time_operator_gaze_to_road_s: Option<f64>,
    pub lead_time_operator_steer_s: Option<f64>,
    pub gap_detect_to_gaze_s: Option<f64>,
    pub gap_gaze_to_steer_s: Option<f64>,
    pub impact_speed_mph: Option<Value>,
    pub impact_speed_kmh: Option<Value>,
}

impl DerivedMetrics {
    /// `(name, rendered value)` pairs in serialization order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let seconds = |value: Option<f64>| Value::from(value).to_string();
        let payload = |value: &Option<Value>| {
            value
                .as_ref()
                .map_or_else(|| "null".to_string(), Value::to_string)
        };
        vec![
            ("lead_time_detection_s", seconds(self.lead_time_detection_s)),
            (
                "lead_time_operator_gaze_to_road_s",
                seconds(self.lead_time_operator_gaze_to_road_s),
            ),
            (
                "lead_time_operator_steer_s",
                seconds(self.lead_time_operator_steer_s),
            ),
            ("gap_detect_to_gaze_s", seconds(self.gap_detect_to_gaze_s)),
            ("gap_gaze_to_steer_s", seconds(self.gap_gaze_to_steer_s)),
            ("impact_speed_mph", payload(&self.impact_speed_mph)),
            ("impact_speed_kmh", payload(&self.impact_speed_kmh)),
        ]
    }
}

/// Derive lead times, gaps and impact speed from `events`.
pub fn derive(events: &[Event]) -> DerivedMetrics {
    let detect = earliest_time(events, DETECT_PREFIX);
    let gaze = earliest_time(events, GAZE_PREFIX);
    let steer = earliest_time(events, STEER_PREFIX);
    let impact = events.iter().find(|event| event.kind == IMPACT_TYPE);
    let speed = |field: &str| {
        impact
            .and_then(|event| event.data.get(field))
            .filter(|value| !value.is_null())
            .cloned()
    };
    DerivedMetrics {
        lead_time_detection_s: detect,
        lead_time_operator_gaze_to_road_s: gaze,
        lead_time_operator_steer_s: steer,
        gap_detect_to_gaze_s: gap(detect, gaze),
        gap_gaze_to_steer_s: gap(gaze, steer),
        impact_speed_mph: speed("speed_mph"),
        impact_speed_kmh: speed("speed_kmh"),
    }
}

/// Minimum timestamp among events whose type starts with `prefix`.
fn earliest_time(events: &[Event], prefix: &str) -> Option<f64> {
    events
        .iter()
        .filter(|event| event.has_prefix(prefix))
        .filter_map(|event| event.t_rel_s)
        .reduce(f64::min)
}

/// Signed difference `to - from`, only when both ends are known.
fn gap(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    Some(to? - from?)
}
