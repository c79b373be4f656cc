//! Timezone resolution and timestamp display formatting.
//!
//! Task timestamps are stored in UTC and only converted to a user's zone when
//! a page is rendered. Users pick their zone from the IANA database names
//! exposed by [`available_zones`]; accounts without a choice fall back to
//! [`DEFAULT_TIMEZONE`].

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Zone applied when a user never picked one.
pub const DEFAULT_TIMEZONE: &str = "Europe/London";

/// Display format for task timestamps.
const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Returns every IANA zone name, sorted, for the profile dropdown.
#[must_use]
pub fn available_zones() -> Vec<String> {
    let mut zones: Vec<String> = chrono_tz::TZ_VARIANTS
        .iter()
        .map(|zone| zone.name().to_string())
        .collect();
    zones.sort_unstable();
    zones
}

/// Resolves an optional zone name, falling back to [`DEFAULT_TIMEZONE`].
///
/// Unknown names also fall back rather than fail: a stale stored zone must
/// never make a page unrenderable.
#[must_use]
pub fn resolve_zone(name: Option<&str>) -> Tz {
    name.and_then(|value| value.parse::<Tz>().ok())
        .unwrap_or(chrono_tz::Europe::London)
}

/// Formats a UTC instant in the given zone for display.
#[must_use]
pub fn format_in_zone(instant: DateTime<Utc>, zone_name: Option<&str>) -> String {
    let zone = resolve_zone(zone_name);
    instant
        .with_timezone(&zone)
        .format(CREATED_FORMAT)
        .to_string()
}

// =============================================================================
// Tests
// =============================================================================
