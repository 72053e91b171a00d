use super::AuditReport;
use crate::scores::pct;

/// Render the full Markdown audit report.
pub fn render_markdown(report: &AuditReport) -> String {
    let mut out = String::new();
    append_header(&mut out, report);
    append_scores_section(&mut out, report);
    append_questions_section(&mut out, report);
    append_coverage_section(&mut out, report);
    append_metrics_section(&mut out, report);
    append_next_requests_section(&mut out);
    append_sources_section(&mut out, report);
    out.push_str(
        "> Note: This report does not assign blame. It quantifies what cannot be determined \
         without missing logs.\n",
    );
    out
}

fn append_header(out: &mut String, report: &AuditReport) {
    out.push_str(&format!(
        "# SIA Public Audit Report (Quant): {}\n\n",
        report.case_id
    ));
    if let Some(title) = report.title.as_deref() {
        out.push_str(&format!("- Case: {}\n", escape_cell(title)));
    }
    out.push_str(&format!(
        "- Generated at: {}\n",
        report.generated_at.as_deref().unwrap_or("unknown")
    ));
    out.push_str(&format!("- Schema: {}\n", report.schema));
    out.push_str(&format!("- Events: {}\n\n", report.event_count));
}

fn append_scores_section(out: &mut String, report: &AuditReport) {
    let scores = &report.scores;
    out.push_str("## 1. Quantifying \"cannot determine responsibility due to missing logs\"\n\n");
    out.push_str(&format!(
        "- **Auditability Score (A-score)**: {}  (all 9 units, OK=1 / Partial=0.5 / Missing=0)\n",
        pct(scores.a_score)
    ));
    out.push_str(&format!(
        "- **Accountability-Critical Score (C-score)**: {}  (planning + control + version + integrity)\n",
        pct(scores.c_score)
    ));
    out.push_str(&format!(
        "- **Responsibility Determinability (core)**: {}  (time/authority/perception/prediction/planning/control/human)\n",
        pct(scores.core)
    ));
    out.push_str(&format!(
        "- **Supply-chain Determinability**: {}  (version + integrity)\n",
        pct(scores.supply)
    ));
    out.push_str(&format!(
        "- **Unanswerable key questions**: {}/{}\n\n",
        report.unanswerable.len(),
        report.question_count
    ));
    out.push_str("Interpretation guide (practical, conservative):\n");
    out.push_str("- ≥80%: likely determinable (assuming integrity is OK)\n");
    out.push_str("- 50–79%: partially determinable (multiple narratives remain plausible)\n");
    out.push_str("- <50%: not determinable (responsibility attribution will be disputed)\n\n");
}

fn append_questions_section(out: &mut String, report: &AuditReport) {
    out.push_str("## 2. Missing questions (what you cannot answer today)\n\n");
    if report.unanswerable.is_empty() {
        out.push_str("- None (all key questions are answerable)\n\n");
        return;
    }
    for question in &report.unanswerable {
        out.push_str(&format!(
            "- {} [{}]: {}  (unit={}, evidence={})\n",
            question.id, question.status, question.text, question.backing_unit, question.evidence
        ));
    }
    out.push('\n');
}

fn append_coverage_section(out: &mut String, report: &AuditReport) {
    out.push_str("## 3. Evidence coverage by unit\n\n");
    out.push_str("| Unit | Status | Evidence | Why it matters |\n");
    out.push_str("|---|---:|---|---|\n");
    for entry in report.coverage.entries() {
        out.push_str(&format!(
            "| {} (`{}`) | {} {} | {} | {} |\n",
            escape_cell(entry.title),
            entry.key,
            entry.icon,
            entry.status,
            escape_cell(&entry.evidence),
            escape_cell(entry.rationale)
        ));
    }
    out.push('\n');
}

fn append_metrics_section(out: &mut String, report: &AuditReport) {
    out.push_str("## 4. Derived metrics (only from available public evidence)\n\n");
    for (name, value) in report.metrics.rows() {
        out.push_str(&format!("- {name}: {value}\n"));
    }
    out.push('\n');
}

fn append_next_requests_section(out: &mut String) {
    out.push_str("## 5. What to request next (minimal additions that raise C-score fastest)\n\n");
    out.push_str("To raise Accountability-Critical Score (C-score), you typically need:\n");
    out.push_str(
        "- planning: candidate plans + chosen plan + rationale (even a compact reason code helps)\n",
    );
    out.push_str(
        "- control: brake/steer commands AND actuator response (actual decel / speed trace)\n",
    );
    out.push_str("- version: stack/map/model versions + update history around the incident\n");
    out.push_str("- integrity: tamper-evident hash/signature for the extracted log segment\n\n");
}

fn append_sources_section(out: &mut String, report: &AuditReport) {
    if report.sources.is_empty() {
        return;
    }
    out.push_str("## 6. Sources cited by events\n\n");
    for source in &report.sources {
        out.push_str(&format!(
            "- {} (confidence: {})",
            source.reference,
            source.confidence.as_str()
        ));
        if !source.note.is_empty() {
            out.push_str(&format!(": {}", source.note));
        }
        out.push('\n');
    }
    out.push('\n');
}

/// Pipes and newlines would break a Markdown table row.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
