//! Fixed evidence units, weight tables and accountability questions.
//!
//! All tables are compile-time constants. Unit order here is the order used
//! for coverage output and rendering.
use serde::Serialize;
use std::fmt;

pub const TIME_BASE: &str = "time.base";
pub const AUTHORITY: &str = "authority.mode_timeline";
pub const PERCEPTION: &str = "perception.object_timeline";
pub const PREDICTION: &str = "prediction.risk_timeline";
pub const PLANNING: &str = "planning.choice_timeline";
pub const CONTROL: &str = "control.command_timeline";
pub const HUMAN: &str = "human.input_attention";
pub const VERSION: &str = "software.version_manifest";
pub const INTEGRITY: &str = "integrity.tamper_evidence";

/// Three-level support status for an evidence unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Missing,
    Partial,
    Ok,
}

impl Status {
    pub fn score(self) -> f64 {
        match self {
            Status::Missing => 0.0,
            Status::Partial => 0.5,
            Status::Ok => 1.0,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Status::Missing => "❌",
            Status::Partial => "⚠️",
            Status::Ok => "✅",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Missing => "missing",
            Status::Partial => "partial",
            Status::Ok => "ok",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category of operational evidence backing an accountability question.
#[derive(Debug, Clone, Copy)]
pub struct EvidenceUnit {
    pub key: &'static str,
    pub title: &'static str,
    pub rationale: &'static str,
}

pub const EVIDENCE_UNITS: [EvidenceUnit; 9] = [
    EvidenceUnit {
        key: TIME_BASE,
        title: "Time base",
        rationale: "Needed to argue about event order and latency (timeline consistency).",
    },
    EvidenceUnit {
        key: AUTHORITY,
        title: "Mode / authority boundary timeline",
        rationale: "Needed to establish who held final authority at the time of the crash.",
    },
    EvidenceUnit {
        key: PERCEPTION,
        title: "Perception: object detection/classification timeline",
        rationale: "Separates 'seen but not stopped for' from 'never seen'.",
    },
    EvidenceUnit {
        key: PREDICTION,
        title: "Prediction: future path / TTC / risk over time",
        rationale: "Shows whether the object was perceived but not judged dangerous.",
    },
    EvidenceUnit {
        key: PLANNING,
        title: "Planning: candidate plans and selection rationale",
        rationale: "Separates a violated safety constraint from having no viable candidate.",
    },
    EvidenceUnit {
        key: CONTROL,
        title: "Control: commands and actual response",
        rationale: "Separates 'tried to stop and could not' from 'never asked to stop'.",
    },
    EvidenceUnit {
        key: HUMAN,
        title: "Human: input / attention (gaze) / intervention",
        rationale: "Needed for takeover, monitoring duty and interface discontinuity questions.",
    },
    EvidenceUnit {
        key: VERSION,
        title: "Software version / update history",
        rationale: "Fixes reproducibility and the scope of supplier, operator and update responsibility.",
    },
    EvidenceUnit {
        key: INTEGRITY,
        title: "Tamper evidence",
        rationale: "Keeps the discussion from collapsing under conveniently cropped logs.",
    },
];

/// Units whose completeness most directly gates responsibility determination.
pub const CRITICAL_UNITS: [&str; 4] = [PLANNING, CONTROL, VERSION, INTEGRITY];

/// On-scene responsibility weights. Supply-chain units are scored separately.
pub const CORE_WEIGHTS: [(&str, f64); 7] = [
    (TIME_BASE, 0.15),
    (AUTHORITY, 0.25),
    (PERCEPTION, 0.15),
    (PREDICTION, 0.10),
    (PLANNING, 0.15),
    (CONTROL, 0.15),
    (HUMAN, 0.05),
];

/// Supplier / operator / update responsibility weights.
pub const SUPPLY_WEIGHTS: [(&str, f64); 2] = [(VERSION, 0.70), (INTEGRITY, 0.30)];

/// A fixed accountability question and the unit that must be `ok` to answer it.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub unit: &'static str,
}

pub const QUESTIONS: [Question; 7] = [
    Question {
        id: "Q1",
        text: "Who held final authority?",
        unit: AUTHORITY,
    },
    Question {
        id: "Q2",
        text: "Did the system detect and track the object?",
        unit: PERCEPTION,
    },
    Question {
        id: "Q3",
        text: "Did the system assess the (collision) risk?",
        unit: PREDICTION,
    },
    Question {
        id: "Q4",
        text: "What did the system choose (candidates and rationale)?",
        unit: PLANNING,
    },
    Question {
        id: "Q5",
        text: "Did the system command braking/avoidance, and did the vehicle respond?",
        unit: CONTROL,
    },
    Question {
        id: "Q6",
        text: "Which software version and update history was running (reproducibility / supply responsibility)?",
        unit: VERSION,
    },
    Question {
        id: "Q7",
        text: "Is the log tamper-evident (integrity)?",
        unit: INTEGRITY,
    },
];

pub fn all_unit_keys() -> Vec<&'static str> {
    EVIDENCE_UNITS.iter().map(|unit| unit.key).collect()
}
