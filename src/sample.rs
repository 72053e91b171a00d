//! Built-in sample logs assembled from public incident summaries.
use crate::schema::{Confidence, Event, MinimalLog, SourceRef, SCHEMA_VERSION};
use anyhow::{anyhow, Result};
use serde_json::json;

/// Sample used when neither an input file nor a sample name is given.
pub const DEFAULT_SAMPLE: &str = "uber_atg_ntsb_2018";

type SampleBuilder = fn() -> Result<MinimalLog>;

const SAMPLES: [(&str, SampleBuilder); 1] = [(DEFAULT_SAMPLE, uber_atg_ntsb_2018)];

pub fn sample_names() -> Vec<&'static str> {
    SAMPLES.iter().map(|(name, _)| *name).collect()
}

pub fn load_sample(name: &str) -> Result<MinimalLog> {
    let (_, build) = SAMPLES
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .ok_or_else(|| {
            anyhow!(
                "unknown sample '{name}'. Available: {}",
                sample_names().join(", ")
            )
        })?;
    build()
}

/// UTC now as `YYYY-MM-DDTHH:MM:SSZ`.
pub fn iso_now() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string()
}

/// Uber ATG, Tempe 2018, from the public NTSB HWY18MH010 summary.
fn uber_atg_ntsb_2018() -> Result<MinimalLog> {
    let src = SourceRef::new(
        "NTSB HWY18MH010 summary (public)",
        "Summary: ADS detected pedestrian 5.6s before impact; never classified as pedestrian; \
         never predicted path; emergency braking precluded; operator gaze; steering at -0.02s; \
         speed 39 mph at impact.",
        Confidence::High,
    );
    let events = vec![
        Event::new(
            None,
            "time.base",
            "system",
            json!({
                "time_reference": "t_rel_s (impact=0)",
                "impact_definition": "first contact with pedestrian",
                "t_abs_iso_if_known": null,
                "notes": "Public summary only."
            }),
        ),
        Event::new(
            None,
            "authority.mode",
            "ads",
            json!({"mode": "autonomous_active", "notes": "ADS controlled at crash time."}),
        ),
        Event::new(
            None,
            "vehicle.state",
            "ads",
            json!({
                "speed_mph_near_collision_site": 45.0,
                "lane": "right lane",
                "notes": "Approached at 45 mph (exact t not disclosed)."
            }),
        ),
        Event::new(
            Some(-5.6),
            "perception.detect",
            "ads",
            json!({
                "object": {"type": "pedestrian_with_bicycle", "id": "obj1"},
                "detected": true,
                "distance_m": null,
                "notes": "Detected 5.6 s before impact."
            }),
        ),
        Event::new(
            None,
            "perception.classification",
            "ads",
            json!({
                "object_id": "obj1",
                "classified_as": "unstable",
                "confidence": null,
                "notes": "Never accurately classified as pedestrian."
            }),
        ),
        Event::new(
            None,
            "prediction.path",
            "ads",
            json!({
                "object_id": "obj1",
                "predicted_path_available": false,
                "ttc_s": null,
                "notes": "Never predicted her path."
            }),
        ),
        Event::new(
            None,
            "risk.collision_imminent",
            "ads",
            json!({"imminent_determined": true, "ttc_s": null, "notes": "Timing not disclosed."}),
        ),
        Event::new(
            None,
            "control.aeb_policy",
            "ads",
            json!({
                "aeb_armed": null,
                "aeb_triggered": null,
                "emergency_braking_precluded_by_design": true,
                "notes": "Design precluded emergency braking."
            }),
        ),
        Event::new(
            Some(-1.0),
            "human.attention",
            "operator",
            json!({
                "gaze_to_road": true,
                "hands_on_wheel": null,
                "notes": "Gaze to road about 1 s before impact."
            }),
        ),
        Event::new(
            Some(-0.02),
            "human.control_input",
            "operator",
            json!({
                "steering": "left",
                "brake": null,
                "throttle": null,
                "notes": "Steering left 0.02 s before impact."
            }),
        ),
        Event::new(
            Some(0.0),
            "impact",
            "vehicle",
            json!({
                "impact_with": "pedestrian",
                "speed_mph": 39.0,
                "speed_kmh": null,
                "notes": "Impact speed 39 mph."
            }),
        ),
    ];
    let events: Vec<Event> = events
        .into_iter()
        .map(|event| event.with_source(src.clone()))
        .collect();

    MinimalLog::from_value(json!({
        "schema": SCHEMA_VERSION,
        "generated_at": iso_now(),
        "case": {
            "case_id": "uber_atg_tempe_2018_ntsb_public",
            "title": "Uber ATG Tempe 2018 (public summary based minimal log)",
            "jurisdiction": "USA (Arizona)",
            "odds": {
                "system_level": "developmental ADS test (operator present)",
                "public_mode": "autonomous mode"
            },
            "public_sources": [src],
        },
        "events": events,
    }))
}
