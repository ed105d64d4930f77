//! Rendering dispatch reports into chat replies.

use crate::domain::entities::{CategoryReport, MixedReport};

/// At most this many failure reasons are listed per category; the rest are
/// summarized with a count.
const MAX_REASONS_SHOWN: usize = 5;

/// Renders a [`MixedReport`] into the reply sent back to the user.
///
/// Categories with zero attempts are omitted; when both are empty the
/// fallback "no valid link" line is shown instead, so the user always gets
/// an answer.
pub fn render_report(report: &MixedReport) -> String {
    let mut out = String::from("Processing summary:");

    let has_share = report.share.attempted() > 0;
    let has_offline = report.offline.attempted() > 0;

    if has_share {
        out.push_str("\n\n[Share links]");
        render_category(&mut out, &report.share, "saved", "failed");
    }

    if has_offline {
        out.push_str("\n\n[Offline downloads]");
        render_category(&mut out, &report.offline, "added", "failed");
    }

    if !has_share && !has_offline {
        out.push_str("\nno valid link found in the message");
    }

    out
}

fn render_category(out: &mut String, report: &CategoryReport, ok_verb: &str, fail_verb: &str) {
    out.push_str(&format!("\n{ok_verb}: {}", report.success));

    if report.failure > 0 {
        out.push_str(&format!("\n{fail_verb}: {}", report.failure));
        if !report.reasons.is_empty() {
            out.push_str("\nreasons:");
            for reason in report.reasons.iter().take(MAX_REASONS_SHOWN) {
                out.push_str(&format!("\n- {reason}"));
            }
            if report.reasons.len() > MAX_REASONS_SHOWN {
                out.push_str(&format!(
                    "\n…and {} reasons in total",
                    report.reasons.len()
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OperationOutcome;

    #[test]
    fn test_render_empty_report() {
        let rendered = render_report(&MixedReport::default());
        assert!(rendered.contains("no valid link found"));
    }

    #[test]
    fn test_render_share_only() {
        let mut report = MixedReport::default();
        report.share.record_item("a", OperationOutcome::ok());
        report.share.record_item("b", OperationOutcome::ok());

        let rendered = render_report(&report);
        assert!(rendered.contains("[Share links]"));
        assert!(rendered.contains("saved: 2"));
        assert!(!rendered.contains("[Offline downloads]"));
        assert!(!rendered.contains("no valid link"));
    }

    #[test]
    fn test_render_failures_list_reasons() {
        let mut report = MixedReport::default();
        report
            .offline
            .record_item("magnet:?xt=a", OperationOutcome::fail("quota"));
        report.offline.record_item("magnet:?xt=b", OperationOutcome::ok());

        let rendered = render_report(&report);
        assert!(rendered.contains("added: 1"));
        assert!(rendered.contains("failed: 1"));
        assert!(rendered.contains("- magnet:?xt=a: quota"));
    }

    #[test]
    fn test_render_caps_reason_list() {
        let mut report = MixedReport::default();
        for i in 0..8 {
            report
                .offline
                .record_item(&format!("link{i}"), OperationOutcome::fail("down"));
        }

        let rendered = render_report(&report);
        assert_eq!(rendered.matches("\n- ").count(), 5);
        assert!(rendered.contains("…and 8 reasons in total"));
    }

    #[test]
    fn test_render_both_categories() {
        let mut report = MixedReport::default();
        report.share.record_item("s", OperationOutcome::ok());
        report.offline.record_item("m", OperationOutcome::ok());

        let rendered = render_report(&report);
        let share_pos = rendered.find("[Share links]").unwrap();
        let offline_pos = rendered.find("[Offline downloads]").unwrap();
        assert!(share_pos < offline_pos);
    }
}
