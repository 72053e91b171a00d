//! Audit report assembly and rendering.
//!
//! `AuditReport::evaluate` runs one full scoring pass over a log. The pass is
//! pure: evaluating the same log twice yields the same report apart from the
//! inputs it copies.
mod console;
mod markdown;

pub use console::render_console;
pub use markdown::render_markdown;

use crate::coverage::{self, Coverage};
use crate::metrics::{self, DerivedMetrics};
use crate::questions::{self, UnansweredQuestion};
use crate::schema::{MinimalLog, SourceRef};
use crate::scores::Scores;
use crate::units::QUESTIONS;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub case_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub schema: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    pub event_count: usize,
    pub scores: Scores,
    pub question_count: usize,
    pub unanswerable: Vec<UnansweredQuestion>,
    pub coverage: Coverage,
    pub metrics: DerivedMetrics,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
}

impl AuditReport {
    pub fn evaluate(log: &MinimalLog) -> Self {
        let events = log.events();
        let coverage = coverage::classify(&events);
        let scores = Scores::from_coverage(&coverage);
        let unanswerable = questions::unanswerable(&coverage);
        let metrics = metrics::derive(&events);

        let mut sources: Vec<SourceRef> = Vec::new();
        for source in events.iter().filter_map(|event| event.source.as_ref()) {
            if !sources
                .iter()
                .any(|seen| seen.reference == source.reference)
            {
                sources.push(source.clone());
            }
        }

        let case_id = log.case_id();
        tracing::info!(
            case_id = %case_id,
            events = events.len(),
            a_score = scores.a_score,
            c_score = scores.c_score,
            unanswerable = unanswerable.len(),
            "evaluated audit report"
        );

        Self {
            case_id,
            title: log.case_title(),
            schema: log.schema().to_string(),
            generated_at: log.generated_at().map(str::to_string),
            event_count: events.len(),
            scores,
            question_count: QUESTIONS.len(),
            unanswerable,
            coverage,
            metrics,
            sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{load_sample, DEFAULT_SAMPLE};
    use crate::units::{self, Status};
    use serde_json::json;

    fn close(actual: f64, expected: f64) -> bool {
        (actual - expected).abs() < 1e-9
    }

    fn reference_report() -> AuditReport {
        AuditReport::evaluate(&load_sample(DEFAULT_SAMPLE).expect("default sample"))
    }

    #[test]
    fn reference_case_statuses() {
        let report = reference_report();
        let status = |key: &str| report.coverage.get(key).expect("classified unit").status;
        assert_eq!(status(units::TIME_BASE), Status::Ok);
        assert_eq!(status(units::AUTHORITY), Status::Partial);
        assert_eq!(status(units::PERCEPTION), Status::Ok);
        assert_eq!(status(units::PREDICTION), Status::Partial);
        assert_eq!(status(units::PLANNING), Status::Missing);
        assert_eq!(status(units::CONTROL), Status::Partial);
        assert_eq!(status(units::HUMAN), Status::Ok);
        assert_eq!(status(units::VERSION), Status::Missing);
        assert_eq!(status(units::INTEGRITY), Status::Missing);
    }

    #[test]
    fn reference_case_scores_and_questions() {
        let report = reference_report();
        assert_eq!(report.scores.c_score, 0.125);
        assert!(close(report.scores.a_score, 0.5));
        assert!(close(report.scores.core, 0.6));
        assert_eq!(report.scores.supply, 0.0);
        let ids: Vec<&str> = report.unanswerable.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec!["Q1", "Q3", "Q4", "Q5", "Q6", "Q7"]);
        assert_eq!(report.question_count, 7);
    }

    #[test]
    fn reference_case_metrics() {
        let metrics = reference_report().metrics;
        assert_eq!(metrics.lead_time_detection_s, Some(-5.6));
        assert_eq!(metrics.lead_time_operator_gaze_to_road_s, Some(-1.0));
        assert_eq!(metrics.lead_time_operator_steer_s, Some(-0.02));
        assert_eq!(metrics.gap_detect_to_gaze_s, Some(-1.0 - (-5.6)));
        assert_eq!(metrics.gap_gaze_to_steer_s, Some(-0.02 - (-1.0)));
        assert_eq!(metrics.impact_speed_mph, Some(json!(39.0)));
        assert_eq!(metrics.impact_speed_kmh, None);
    }

    #[test]
    fn reference_case_sources_deduplicated() {
        let report = reference_report();
        assert_eq!(report.sources.len(), 1);
        assert_eq!(report.sources[0].reference, "NTSB HWY18MH010 summary (public)");
    }

    #[test]
    fn empty_log_scores_zero_everywhere() {
        let log = MinimalLog::from_value(json!({"events": []})).expect("object log");
        let report = AuditReport::evaluate(&log);
        assert_eq!(
            report.scores,
            Scores {
                a_score: 0.0,
                c_score: 0.0,
                core: 0.0,
                supply: 0.0
            }
        );
        assert_eq!(report.unanswerable.len(), 7);
        assert_eq!(report.metrics, DerivedMetrics::default());
        assert_eq!(report.case_id, "unknown_case");
    }

    #[test]
    fn saturated_log_scores_one_everywhere() {
        let log = MinimalLog::from_value(json!({
            "events": [
                {"t_rel_s": 0.0, "type": "impact"},
                {"t_rel_s": -10.0, "type": "authority.mode"},
                {"t_rel_s": -5.6, "type": "perception.detect"},
                {"t_rel_s": null, "type": "perception.classification"},
                {"t_rel_s": -4.0, "type": "prediction.path"},
                {"t_rel_s": -3.0, "type": "planning.selected"},
                {"t_rel_s": -2.0, "type": "control.brake"},
                {"t_rel_s": -1.0, "type": "human.attention"},
                {"t_rel_s": null, "type": "software.version_manifest"},
                {"t_rel_s": null, "type": "integrity.signature"}
            ]
        }))
        .expect("object log");
        let report = AuditReport::evaluate(&log);
        assert_eq!(
            report.scores,
            Scores {
                a_score: 1.0,
                c_score: 1.0,
                core: 1.0,
                supply: 1.0
            }
        );
        assert!(report.unanswerable.is_empty());
    }

    #[test]
    fn independent_logs_evaluate_in_parallel() {
        let reference = load_sample(DEFAULT_SAMPLE).expect("default sample");
        let empty = MinimalLog::from_value(json!({"events": []})).expect("object log");
        let (a, b) = std::thread::scope(|scope| {
            let a = scope.spawn(|| AuditReport::evaluate(&reference));
            let b = scope.spawn(|| AuditReport::evaluate(&empty));
            (
                a.join().expect("reference worker"),
                b.join().expect("empty worker"),
            )
        });
        assert_eq!(a.scores, reference_report().scores);
        assert_eq!(a.unanswerable.len(), 6);
        assert_eq!(b.unanswerable.len(), 7);
    }

    #[test]
    fn json_report_keeps_unit_order_and_nulls() {
        let value = serde_json::to_value(reference_report()).expect("serialize report");
        let coverage_keys: Vec<&str> = value["coverage"]
            .as_object()
            .expect("coverage object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(coverage_keys, units::all_unit_keys());
        assert!(value["metrics"]["impact_speed_kmh"].is_null());
        assert_eq!(value["scores"]["c_score"], 0.125);
    }
}
