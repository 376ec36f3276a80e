// src/core/sanitize.rs

/// Heading text → version id.
/// Drops permalink markers (`#`, `¶`), trims, then cuts everything up to
/// and including the marker token: "n8n@1.2.0 #" → "1.2.0".
pub fn normalize_version(heading: &str, marker: &str) -> String {
    let cleaned: String = heading.chars().filter(|c| !matches!(c, '#' | '¶')).collect();
    let cleaned = cleaned.trim();
    let tail = match cleaned.find(marker) {
        Some(at) if !marker.is_empty() => &cleaned[at + marker.len()..],
        _ => cleaned,
    };
    s!(tail.trim())
}

/// Collapse a multi-line fragment into one line.
pub fn flatten_line(s: &str) -> String {
    s.replace(['\r', '\n'], " ").trim().to_string()
}

/// Cut to `width` chars, replacing the tail with "..." when it doesn't fit.
/// Counts chars, not bytes.
pub fn truncate_display(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s!(s);
    }
    let keep = width.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Monitor key → safe file stem.
pub fn sanitize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut last_us = false;
    for ch in key.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' { out.push(ch); last_us = false; }
        else if !last_us { out.push('_'); last_us = true; }
    }
    let out = out.trim_matches(|c| c == '_' || c == '.').to_string();
    if out.is_empty() { s!("latest") } else { out }
}
