// src/notify/format.rs
//
// Release + change reason → notification text. No I/O; the clock is an argument.
//
// Layout:
//   <headline>: <version>
//   📅 <release date>            (only when a fragment carries the date label)
//
//   🔍 Highlights:               (only when something qualifies)
//   • <up to 2 one-line highlights>
//
//   🔗 <source url>
//   ⏰ <timestamp>

use chrono::{DateTime, Utc};

use crate::config::consts::{
    DATE_LABEL, HIGHLIGHT_COUNT, HIGHLIGHT_MIN_LEN, HIGHLIGHT_WIDTH, PRODUCT, TIMESTAMP_FMT,
};
use crate::core::sanitize::{flatten_line, truncate_display};
use crate::detect::ChangeReason;
use crate::release::Release;
use super::{Notification, Priority};

pub fn timestamp(now: DateTime<Utc>) -> String {
    now.format(TIMESTAMP_FMT).to_string()
}

/// Text after the date label in the first fragment that has one.
pub fn release_date(release: &Release) -> Option<String> {
    release
        .content
        .iter()
        .find(|c| c.contains(DATE_LABEL))
        .and_then(|c| c.rsplit(DATE_LABEL).next())
        .map(|d| s!(d.trim()))
        .filter(|d| !d.is_empty())
}

/// Up to `HIGHLIGHT_COUNT` fragments worth showing: not the date line,
/// longer than `HIGHLIGHT_MIN_LEN` once trimmed, one line, width-capped.
pub fn highlights(release: &Release) -> Vec<String> {
    release
        .content
        .iter()
        .filter(|c| !c.contains(DATE_LABEL))
        .filter(|c| c.trim().chars().count() > HIGHLIGHT_MIN_LEN)
        .take(HIGHLIGHT_COUNT)
        .map(|c| truncate_display(&flatten_line(c), HIGHLIGHT_WIDTH))
        .collect()
}

pub fn title(release: &Release, reason: &ChangeReason) -> String {
    format!("{}: {}", headline(reason), release.version)
}

fn headline(reason: &ChangeReason) -> String {
    if reason.is_new_release() {
        format!("New {PRODUCT} Release")
    } else {
        format!("Updated {PRODUCT} Release Notes")
    }
}

fn icon(reason: &ChangeReason) -> &'static str {
    if reason.is_new_release() { "🎉" } else { "📝" }
}

/// Full message body for a detected change.
pub fn format_release(
    release: &Release,
    reason: &ChangeReason,
    source_url: &str,
    now: DateTime<Utc>,
) -> String {
    let mut msg = format!("{} {}", icon(reason), title(release, reason));
    if let Some(date) = release_date(release) {
        msg.push_str("\n📅 ");
        msg.push_str(&date);
    }
    msg.push('\n');

    let hl = highlights(release);
    if !hl.is_empty() {
        msg.push_str("\n🔍 Highlights:\n");
        for h in &hl {
            let line = h.strip_prefix("• ").unwrap_or(h);
            msg.push_str(&join!("• ", line, "\n"));
        }
    }

    msg.push_str(&format!("\n🔗 {source_url}\n⏰ {}", timestamp(now)));
    msg
}

/// Ready-to-send notification for a detected change.
pub fn release_notification(
    release: &Release,
    reason: &ChangeReason,
    source_url: &str,
    now: DateTime<Utc>,
) -> Notification {
    Notification::new(
        title(release, reason),
        format_release(release, reason, source_url, now),
        Priority::High,
    )
    .tags(&["package", PRODUCT])
}

pub fn error_notification() -> Notification {
    Notification::new(
        format!("{PRODUCT} Monitor Error"),
        format!("Failed to fetch {PRODUCT} releases"),
        Priority::Urgent,
    )
    .tags(&["error"])
}

pub fn test_notification(now: DateTime<Utc>) -> Notification {
    Notification::new(
        format!("{PRODUCT} Monitor Test"),
        format!("Test from {PRODUCT} monitor\n⏰ {}", timestamp(now)),
        Priority::Default,
    )
    .tags(&["test"])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-05-05T14:07:00Z").unwrap().with_timezone(&Utc)
    }

    fn rel(content: &[&str]) -> Release {
        Release::new("1.92.0", content.iter().map(|s| s.to_string()), now())
    }

    const URL: &str = "https://docs.n8n.io/release-notes";

    #[test]
    fn new_release_message_layout() {
        let r = rel(&[
            "View the commits for this version.Release date: 2025-05-05",
            "This release contains new features and bug fixes.",
            "• Added a Think tool for AI agents.",
            "• Third item is never shown.",
        ]);
        let msg = format_release(&r, &ChangeReason::VersionChanged(s!("1.91.0"), s!("1.92.0")), URL, now());
        assert_eq!(
            msg,
            "🎉 New n8n Release: 1.92.0\n📅 2025-05-05\n\
             \n🔍 Highlights:\n\
             • This release contains new features and bug fixes.\n\
             • Added a Think tool for AI agents.\n\
             \n🔗 https://docs.n8n.io/release-notes\n⏰ 2025-05-05 14:07 UTC"
        );
    }

    #[test]
    fn content_change_framing() {
        let r = rel(&["Corrected wording of the notes."]);
        let reason = ChangeReason::ContentChanged(s!("1.92.0"));
        let msg = format_release(&r, &reason, URL, now());
        assert!(msg.starts_with("📝 Updated n8n Release Notes: 1.92.0\n"));
        assert_eq!(title(&r, &reason), "Updated n8n Release Notes: 1.92.0");
        assert_eq!(title(&r, &ChangeReason::FirstRun), "New n8n Release: 1.92.0");
        // only new releases get the "New" framing
        assert_eq!(title(&r, &ChangeReason::NoChange), "Updated n8n Release Notes: 1.92.0");
    }

    #[test]
    fn no_date_no_date_line() {
        let r = rel(&["Plenty of characters here."]);
        let msg = format_release(&r, &ChangeReason::FirstRun, URL, now());
        assert!(!msg.contains("📅"));
        assert!(msg.contains("• Plenty of characters here."));
    }

    #[test]
    fn short_fragments_are_not_highlights() {
        // exactly 10 chars trimmed is still too short
        let r = rel(&["0123456789", "  tiny  ", "Release date: 2025-01-01"]);
        assert!(highlights(&r).is_empty());
        let msg = format_release(&r, &ChangeReason::FirstRun, URL, now());
        assert!(!msg.contains("Highlights"));
        assert!(msg.ends_with("🔗 https://docs.n8n.io/release-notes\n⏰ 2025-05-05 14:07 UTC"));
    }

    #[test]
    fn highlights_are_flattened_and_capped() {
        let long = format!("line one\nline two {}", "x".repeat(120));
        let r = rel(&[long.as_str()]);
        let hl = highlights(&r);
        assert_eq!(hl.len(), 1);
        assert!(!hl[0].contains('\n'));
        assert_eq!(hl[0].chars().count(), 80);
        assert!(hl[0].starts_with("line one line two"));
        assert!(hl[0].ends_with("..."));
    }

    #[test]
    fn highlights_look_past_short_items() {
        let r = rel(&["short", "tiny", "x", "y", "This is the first long one", "And a second long one"]);
        assert_eq!(highlights(&r), vec!["This is the first long one", "And a second long one"]);
    }

    #[test]
    fn date_is_text_after_label() {
        assert_eq!(release_date(&rel(&["Release date: 2025-04-28"])).as_deref(), Some("2025-04-28"));
        assert_eq!(release_date(&rel(&["Release date:"])), None);
        assert_eq!(release_date(&rel(&["released on 2025-04-28"])), None);
    }

    #[test]
    fn canned_notifications() {
        let r = rel(&["Something long enough to show"]);
        let n = release_notification(&r, &ChangeReason::FirstRun, URL, now());
        assert_eq!(n.priority, Priority::High);
        assert_eq!(n.tags, vec!["package", "n8n"]);
        assert_eq!(n.title, "New n8n Release: 1.92.0");

        let e = error_notification();
        assert_eq!((e.title.as_str(), e.message.as_str()), ("n8n Monitor Error", "Failed to fetch n8n releases"));
        assert_eq!(e.priority.level(), 5);

        let t = test_notification(now());
        assert_eq!(t.message, "Test from n8n monitor\n⏰ 2025-05-05 14:07 UTC");
        assert_eq!(t.tags, vec!["test"]);
    }
}
