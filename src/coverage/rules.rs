//! Per-unit classification rules.
//!
//! Every rule sees the full event sequence and never assumes chronological
//! order. Type families are matched by literal prefix on the type string.
use crate::schema::Event;
use crate::units::{self, Status};

/// Rule output before unit metadata is attached.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Verdict {
    pub(super) status: Status,
    pub(super) evidence: String,
}

impl Verdict {
    fn new(status: Status, evidence: impl Into<String>) -> Self {
        Self {
            status,
            evidence: evidence.into(),
        }
    }
}

pub(super) type Rule = fn(&[Event]) -> Verdict;

/// Rules in the same order as `units::EVIDENCE_UNITS`.
pub(super) const RULES: [(&str, Rule); 9] = [
    (units::TIME_BASE, time_base),
    (units::AUTHORITY, authority_mode),
    (units::PERCEPTION, perception_objects),
    (units::PREDICTION, prediction_risk),
    (units::PLANNING, planning_choice),
    (units::CONTROL, control_commands),
    (units::HUMAN, human_input),
    (units::VERSION, software_version),
    (units::INTEGRITY, integrity_evidence),
];

const IMPACT_TYPE: &str = "impact";
const AEB_POLICY_TYPE: &str = "control.aeb_policy";
const CONTROL_COMMAND_PREFIXES: [&str; 7] = [
    "control.command",
    "control.brake",
    "control.steer",
    "control.longitudinal",
    "control.lateral",
    "control.actuator",
    "control.response",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    present: usize,
    timed: usize,
}

impl Tally {
    fn of(events: &[Event], matches: impl Fn(&Event) -> bool) -> Self {
        events
            .iter()
            .filter(|event| matches(event))
            .fold(Tally::default(), |mut tally, event| {
                tally.present += 1;
                if event.is_timed() {
                    tally.timed += 1;
                }
                tally
            })
    }

    fn prefixed(events: &[Event], prefixes: &[&str]) -> Self {
        Self::of(events, |event| {
            prefixes.iter().any(|prefix| event.has_prefix(prefix))
        })
    }

    fn exact(events: &[Event], kind: &str) -> Self {
        Self::of(events, |event| event.kind == kind)
    }

    fn any(self) -> bool {
        self.present > 0
    }

    fn any_timed(self) -> bool {
        self.timed > 0
    }

    fn describe(self, family: &str) -> String {
        format!("{family} x{} ({} timed)", self.present, self.timed)
    }
}

fn time_base(events: &[Event]) -> Verdict {
    let impact = Tally::exact(events, IMPACT_TYPE);
    let timed = events.iter().filter(|event| event.is_timed()).count();
    if impact.any() && timed >= 2 {
        Verdict::new(
            Status::Ok,
            format!("impact present + {timed} timed events"),
        )
    } else if impact.any() {
        Verdict::new(
            Status::Partial,
            format!("impact present but only {timed} timed event(s) for context"),
        )
    } else {
        Verdict::new(
            Status::Missing,
            format!("no impact event ({timed} timed events overall)"),
        )
    }
}

/// Shared ladder: timed member ⇒ ok, untimed member ⇒ partial, none ⇒ missing.
fn timed_family(events: &[Event], prefixes: &[&str], family: &str) -> Verdict {
    let tally = Tally::prefixed(events, prefixes);
    if tally.any_timed() {
        Verdict::new(
            Status::Ok,
            format!("{} with timestamp present", tally.describe(family)),
        )
    } else if tally.any() {
        Verdict::new(
            Status::Partial,
            format!("{} present, no timestamp", tally.describe(family)),
        )
    } else {
        Verdict::new(Status::Missing, format!("no {family} event"))
    }
}

fn authority_mode(events: &[Event]) -> Verdict {
    timed_family(events, &["authority.mode"], "authority.mode")
}

fn perception_objects(events: &[Event]) -> Verdict {
    let detect = Tally::prefixed(events, &["perception.detect"]);
    let classification = Tally::prefixed(events, &["perception.classification"]);
    let basis = format!(
        "{} + {}",
        detect.describe("perception.detect"),
        classification.describe("perception.classification")
    );
    if detect.any_timed() && classification.any() {
        Verdict::new(Status::Ok, format!("{basis}: timed detect + classification"))
    } else if detect.any() || classification.any() {
        Verdict::new(
            Status::Partial,
            format!("{basis}: perception present but timeline incomplete"),
        )
    } else {
        Verdict::new(
            Status::Missing,
            "no perception.detect or perception.classification event",
        )
    }
}

fn prediction_risk(events: &[Event]) -> Verdict {
    timed_family(events, &["prediction.", "risk."], "prediction.*/risk.*")
}

fn planning_choice(events: &[Event]) -> Verdict {
    timed_family(events, &["planning."], "planning.*")
}

fn control_commands(events: &[Event]) -> Verdict {
    let commands = Tally::prefixed(events, &CONTROL_COMMAND_PREFIXES);
    let policy = Tally::exact(events, AEB_POLICY_TYPE);
    let control = Tally::prefixed(events, &["control."]);
    if commands.any_timed() {
        Verdict::new(
            Status::Ok,
            format!(
                "{}: timed command/response timeline present",
                commands.describe("control command/response")
            ),
        )
    } else if commands.any() {
        Verdict::new(
            Status::Partial,
            format!(
                "{}: commands present but none timed",
                commands.describe("control command/response")
            ),
        )
    } else if policy.any() || control.any() {
        let basis = if policy.any() {
            "control.aeb_policy present"
        } else {
            "control.* present"
        };
        Verdict::new(
            Status::Partial,
            format!(
                "{basis} ({} control.* events) but no command/response timeline",
                control.present
            ),
        )
    } else {
        Verdict::new(Status::Missing, "no control.* event")
    }
}

fn human_input(events: &[Event]) -> Verdict {
    timed_family(events, &["human."], "human.*")
}

/// Presence alone is enough; these units have no partial tier.
fn present_or_missing(events: &[Event], prefix: &str, family: &str) -> Verdict {
    let tally = Tally::prefixed(events, &[prefix]);
    if tally.any() {
        Verdict::new(
            Status::Ok,
            format!("{} present", tally.describe(family)),
        )
    } else {
        Verdict::new(Status::Missing, format!("no {family} event"))
    }
}

fn software_version(events: &[Event]) -> Verdict {
    present_or_missing(events, "software.version", "software.version*")
}

fn integrity_evidence(events: &[Event]) -> Verdict {
    present_or_missing(events, "integrity.", "integrity.*")
}
