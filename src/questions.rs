//! Accountability questions that the current evidence cannot answer.
use crate::coverage::Coverage;
use crate::units::{Status, QUESTIONS};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnansweredQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub backing_unit: &'static str,
    pub status: Status,
    pub evidence: String,
}

/// Questions whose backing unit is not `ok`, in fixed question order.
///
/// A backing unit absent from `coverage` is reported as missing.
pub fn unanswerable(coverage: &Coverage) -> Vec<UnansweredQuestion> {
    QUESTIONS
        .iter()
        .filter_map(|question| {
            let (status, evidence) = match coverage.get(question.unit) {
                Some(entry) => (entry.status, entry.evidence.clone()),
                None => (Status::Missing, "unit not classified".to_string()),
            };
            if status == Status::Ok {
                return None;
            }
            Some(UnansweredQuestion {
                id: question.id,
                text: question.text,
                backing_unit: question.unit,
                status,
                evidence,
            })
        })
        .collect()
}
