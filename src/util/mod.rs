//
//  jira-cli
//  util/mod.rs
//

//! # Utility Module
//!
//! Small helpers shared across the CLI: timestamp formatting for table
//! columns, string truncation, and launching the system browser.

use anyhow::Result;
use chrono::DateTime;

/// Formats a server timestamp for compact table display.
///
/// Jira reports timestamps as RFC 3339 / ISO 8601 strings (for example
/// `2026-08-12T09:30:00.000+0200`). These are rendered in the local
/// timezone as `YYYY-MM-DD HH:MM`. A timestamp that does not parse is
/// returned unchanged rather than dropped.
pub fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.3f%z"))
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

/// Truncates a string to a maximum length, adding an ellipsis if needed.
///
/// # Notes
///
/// - If the string is already within `max_len`, it is returned unchanged.
/// - When `max_len` is 3 or less, the string is simply cut (no room for
///   the ellipsis).
/// - Lengths are byte counts, but the cut always lands on a character
///   boundary; multi-byte names come out a little shorter rather than
///   split mid-codepoint.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let keep = if max_len > 3 { max_len - 3 } else { max_len };
    let mut cut = keep;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    if max_len > 3 {
        format!("{}...", &s[..cut])
    } else {
        s[..cut].to_string()
    }
}

/// Opens a URL in the user's default web browser.
///
/// Spawns the platform launcher (`open`, `xdg-open`, or `cmd /c start`)
/// and returns without waiting for the browser to close.
pub fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", "", url])
            .spawn()?;
    }

    Ok(())
}
