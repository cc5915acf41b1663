//! Timestamp formatting for feeds.
//!
//! RSS and Atom mandate different date grammars:
//!
//! - **RSS 2.0**: RFC 822, `02 Jan 06 15:04 MST`
//! - **Atom 1.0**: RFC 3339, `2006-01-02T15:04:05Z07:00`
//!
//! Both formatters are total. An absent timestamp formats as the empty
//! string, and renderers drop the element instead of writing it empty.
//!
//! # Examples
//!
//! ```ignore
//! let dt = parse_rfc3339("2025-01-01T12:00:00Z").unwrap();
//! assert_eq!(format_rfc822(Some(&dt)), "01 Jan 25 12:00 UTC");
//! assert_eq!(format_rfc3339(Some(&dt)), "2025-01-01T12:00:00Z");
//! ```

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Timestamp type used throughout the feed model.
///
/// Any `DateTime<Utc>` converts into it with `.into()`.
pub type Timestamp = DateTime<FixedOffset>;

/// Format as RFC 822 for RSS.
///
/// Fixed offsets carry no zone abbreviation, so a zero offset prints `UTC`
/// and any other offset prints its numeric `-0700` form.
pub fn format_rfc822(time: Option<&Timestamp>) -> String {
    let Some(time) = time else {
        return String::new();
    };

    let zone = if time.offset().local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        time.format("%z").to_string()
    };
    format!("{} {zone}", time.format("%d %b %y %H:%M"))
}

/// Format as RFC 3339 for Atom, whole seconds, `Z` for UTC.
pub fn format_rfc3339(time: Option<&Timestamp>) -> String {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
        .unwrap_or_default()
}

/// Parse an RFC 3339 timestamp, keeping its offset.
pub fn parse_rfc3339(s: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(s.trim()).ok()
}

// ============================================================================
// Clock
// ============================================================================

/// Source of "now" for default build dates.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().into()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
