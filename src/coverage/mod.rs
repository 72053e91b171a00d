//! Evidence coverage classification.
//!
//! `classify` is total: any event sequence, including an empty one, yields an
//! entry for every evidence unit.
mod rules;

use crate::schema::Event;
use crate::units::{Status, EVIDENCE_UNITS};
use serde::ser::{Serialize, Serializer};

/// Classification result for a single evidence unit.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CoverageEntry {
    #[serde(skip)]
    pub key: &'static str,
    pub title: &'static str,
    pub status: Status,
    pub score: f64,
    pub icon: &'static str,
    pub evidence: String,
    pub rationale: &'static str,
}

/// Coverage for all evidence units, in unit declaration order.
#[derive(Debug, Clone)]
pub struct Coverage {
    entries: Vec<CoverageEntry>,
}

impl Coverage {
    pub fn entries(&self) -> &[CoverageEntry] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&CoverageEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Build a coverage map with explicit statuses (unit metadata filled in).
    #[cfg(test)]
    pub(crate) fn from_statuses(statuses: &[(&'static str, Status)]) -> Self {
        let entries = statuses
            .iter()
            .map(|(key, status)| {
                let unit = EVIDENCE_UNITS
                    .iter()
                    .find(|unit| unit.key == *key)
                    .expect("known unit key");
                entry(unit.key, unit.title, unit.rationale, *status, String::new())
            })
            .collect();
        Self { entries }
    }
}

impl Serialize for Coverage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|entry| (entry.key, entry)))
    }
}

/// Classify the event sequence against every evidence unit.
pub fn classify(events: &[Event]) -> Coverage {
    let entries = EVIDENCE_UNITS
        .iter()
        .zip(rules::RULES.iter())
        .map(|(unit, (rule_key, rule))| {
            debug_assert_eq!(unit.key, *rule_key, "rule table out of order");
            let verdict = rule(events);
            tracing::debug!(
                unit = unit.key,
                status = %verdict.status,
                evidence = %verdict.evidence,
                "classified evidence unit"
            );
            entry(
                unit.key,
                unit.title,
                unit.rationale,
                verdict.status,
                verdict.evidence,
            )
        })
        .collect();
    Coverage { entries }
}

fn entry(
    key: &'static str,
    title: &'static str,
    rationale: &'static str,
    status: Status,
    evidence: String,
) -> CoverageEntry {
    CoverageEntry {
        key,
        title,
        status,
        score: status.score(),
        icon: status.icon(),
        evidence,
        rationale,
    }
}
