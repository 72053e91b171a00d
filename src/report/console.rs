use super::AuditReport;
use crate::schema::SCHEMA_VERSION;
use crate::scores::pct;

const RULE_WIDTH: usize = 80;

/// Render the short console summary printed after every audit.
pub fn render_console(report: &AuditReport) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let scores = &report.scores;
    let mut out = String::new();
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("SIA Public Audit (Quant) [{SCHEMA_VERSION}]\n"));
    out.push_str(&format!("CASE: {}\n", report.case_id));
    if let Some(title) = report.title.as_deref() {
        out.push_str(&format!("TITLE: {title}\n"));
    }
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "[Scores] A-score={} | C-score={} | core={} | supply={} | unanswerable={}/{}\n\n",
        pct(scores.a_score),
        pct(scores.c_score),
        pct(scores.core),
        pct(scores.supply),
        report.unanswerable.len(),
        report.question_count
    ));
    for entry in report.coverage.entries() {
        out.push_str(&format!(
            "  - {} {:7} {}: {}\n",
            entry.icon,
            entry.status.as_str(),
            entry.key,
            entry.evidence
        ));
    }
    if !report.unanswerable.is_empty() {
        out.push_str("\n[Unanswerable questions]\n");
        for question in &report.unanswerable {
            out.push_str(&format!(
                "  - {} {}: {} (unit={})\n",
                question.id, question.status, question.text, question.backing_unit
            ));
        }
    }
    out.push_str(&format!("{rule}\n"));
    out
}
