//! End-to-end runs of `sia-audit` against the built-in sample and input files.

mod common;

use common::{read_json, AuditFixture};
use serde_json::json;

const REFERENCE_CASE: &str = "uber_atg_tempe_2018_ntsb_public";

#[test]
fn reference_sample_writes_log_and_report() {
    let fixture = AuditFixture::new().expect("fixture");
    let result = fixture
        .audit_into_out_dir(&["--sample", "uber_atg_ntsb_2018"])
        .expect("run sia-audit");
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("C-score=12.5%"), "{}", result.stdout);
    assert!(result.stdout.contains("unanswerable=6/7"));
    assert!(result.stdout.contains("[Wrote]"));

    let log_path = fixture
        .out_dir()
        .join(format!("{REFERENCE_CASE}_sia_minimal.json"));
    let report_path = fixture
        .out_dir()
        .join(format!("{REFERENCE_CASE}_sia_audit_report.md"));
    let saved = read_json(&log_path).expect("saved log");
    assert_eq!(saved["schema"], "sia_audit_minimal_v0_public");
    assert_eq!(saved["events"].as_array().map(Vec::len), Some(11));

    let report = std::fs::read_to_string(report_path).expect("report");
    assert!(report.contains("**Unanswerable key questions**: 6/7"));
    assert!(report.contains("does not assign blame"));
}

#[test]
fn default_run_uses_reference_sample() {
    let fixture = AuditFixture::new().expect("fixture");
    let result = fixture.run(&["audit", "--no-files"]).expect("run sia-audit");
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.contains(&format!("CASE: {REFERENCE_CASE}")));
    assert!(!result.stdout.contains("[Wrote]"));
    assert!(!fixture.out_dir().exists());
}

#[test]
fn json_mode_emits_parseable_report() {
    let fixture = AuditFixture::new().expect("fixture");
    let result = fixture
        .run(&["audit", "--no-files", "--json"])
        .expect("run sia-audit");
    assert!(result.success, "stderr: {}", result.stderr);
    let report: serde_json::Value = serde_json::from_str(&result.stdout).expect("json stdout");
    assert_eq!(report["case_id"], REFERENCE_CASE);
    assert_eq!(report["scores"]["c_score"], 0.125);
    assert_eq!(report["unanswerable"].as_array().map(Vec::len), Some(6));
    assert_eq!(report["coverage"]["perception.object_timeline"]["status"], "ok");
    assert_eq!(report["coverage"]["control.command_timeline"]["status"], "partial");
    assert_eq!(report["metrics"]["lead_time_detection_s"], -5.6);
}

#[test]
fn input_file_is_scored_and_resaved() {
    let fixture = AuditFixture::new().expect("fixture");
    let input = fixture
        .write_input(
            "case.json",
            &json!({
                "schema": "custom_schema",
                "generated_at": "2024-01-01T00:00:00Z",
                "case": {"case_id": "saturated", "title": "Everything logged"},
                "events": [
                    {"t_rel_s": 0.0, "type": "impact", "data": {"speed_mph": 12.0}},
                    {"t_rel_s": -10.0, "type": "authority.mode"},
                    {"t_rel_s": -5.6, "type": "perception.detect"},
                    {"t_rel_s": null, "type": "perception.classification"},
                    {"t_rel_s": "-4.0", "type": "risk.ttc"},
                    {"t_rel_s": -3.0, "type": "planning.selected"},
                    {"t_rel_s": -2.0, "type": "control.brake"},
                    {"t_rel_s": -1.0, "type": "human.attention"},
                    {"type": "software.version_manifest"},
                    {"type": "integrity.signature"}
                ]
            }),
        )
        .expect("write input");
    let input = input.to_str().expect("utf-8 path");
    let result = fixture
        .audit_into_out_dir(&["--input", input])
        .expect("run sia-audit");
    assert!(result.success, "stderr: {}", result.stderr);
    assert!(result.stdout.contains("A-score=100.0%"), "{}", result.stdout);
    assert!(result.stdout.contains("unanswerable=0/7"));
    assert!(!result.stdout.contains("[Unanswerable questions]"));

    let saved = read_json(&fixture.out_dir().join("saturated_sia_minimal.json")).expect("saved");
    assert_eq!(saved["schema"], "custom_schema");
    assert_eq!(saved["events"][4]["t_rel_s"], "-4.0");
    let report = std::fs::read_to_string(fixture.out_dir().join("saturated_sia_audit_report.md"))
        .expect("report");
    assert!(report.contains("- None (all key questions are answerable)"));
    assert!(report.contains("- impact_speed_mph: 12.0"));
}

#[test]
fn empty_event_log_scores_zero() {
    let fixture = AuditFixture::new().expect("fixture");
    let input = fixture
        .write_input("empty.json", &json!({"case": {"case_id": "empty"}, "events": []}))
        .expect("write input");
    let input = input.to_str().expect("utf-8 path");
    let result = fixture
        .run(&["audit", "--input", input, "--no-files", "--json"])
        .expect("run sia-audit");
    assert!(result.success, "stderr: {}", result.stderr);
    let report: serde_json::Value = serde_json::from_str(&result.stdout).expect("json stdout");
    for key in ["a_score", "c_score", "core", "supply"] {
        assert_eq!(report["scores"][key], 0.0, "{key}");
    }
    assert_eq!(report["unanswerable"].as_array().map(Vec::len), Some(7));
    let metrics = report["metrics"].as_object().expect("metrics");
    assert!(metrics.values().all(serde_json::Value::is_null));
}

#[test]
fn rejects_non_object_input_and_unknown_sample() {
    let fixture = AuditFixture::new().expect("fixture");
    let input = fixture
        .write_input("list.json", &json!([1, 2, 3]))
        .expect("write input");
    let input = input.to_str().expect("utf-8 path");
    let result = fixture
        .run(&["audit", "--input", input, "--no-files"])
        .expect("run sia-audit");
    assert!(!result.success);
    assert!(result.stderr.contains("must be an object"), "{}", result.stderr);

    let result = fixture
        .run(&["audit", "--sample", "nope", "--no-files"])
        .expect("run sia-audit");
    assert!(!result.success);
    assert!(result.stderr.contains("uber_atg_ntsb_2018"), "{}", result.stderr);
}

#[test]
fn input_and_sample_conflict() {
    let fixture = AuditFixture::new().expect("fixture");
    let result = fixture
        .run(&["audit", "--input", "a.json", "--sample", "uber_atg_ntsb_2018"])
        .expect("run sia-audit");
    assert!(!result.success);
}

#[test]
fn samples_command_lists_default() {
    let fixture = AuditFixture::new().expect("fixture");
    let result = fixture.run(&["samples"]).expect("run sia-audit");
    assert!(result.success, "stderr: {}", result.stderr);
    assert_eq!(result.stdout.trim(), "uber_atg_ntsb_2018 (default)");
}
