use std::time::Duration;

use base64::{prelude::BASE64_STANDARD, Engine};

pub fn to_base64(input: &[u8]) -> String {
    BASE64_STANDARD.encode(input)
}

pub fn from_base64(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64_STANDARD.decode(encoded)
}

// Month and year lengths are averages, matching what people expect from "3 months ago".
const UNITS: [(&str, u64); 7] = [
    ("year", 31_557_600_000),
    ("month", 2_629_800_000),
    ("week", 604_800_000),
    ("day", 86_400_000),
    ("hour", 3_600_000),
    ("minute", 60_000),
    ("second", 1_000),
];

fn plural(count: u64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Renders a duration with at most `largest` units, e.g. `"2 hours, 5 minutes"`.
/// The smallest shown unit is rounded.
pub fn humanize_duration(duration: Duration, largest: usize) -> String {
    let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
    let largest = largest.max(1);

    let first = UNITS
        .iter()
        .position(|(_, unit)| millis >= *unit)
        .unwrap_or(UNITS.len() - 1);
    let smallest = (first + largest - 1).min(UNITS.len() - 1);
    let (smallest_name, smallest_unit) = UNITS[smallest];

    let rounded = (millis as f64 / smallest_unit as f64).round() as u64;
    let mut remaining = rounded.saturating_mul(smallest_unit);
    if remaining == 0 {
        return plural(0, smallest_name);
    }

    let mut parts = Vec::with_capacity(largest);
    for (name, unit) in &UNITS[..=smallest] {
        let count = remaining / unit;
        remaining %= unit;
        if count > 0 && parts.len() < largest {
            parts.push(plural(count, name));
        }
    }
    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_largest_units_with_rounding() {
        let duration = Duration::from_secs(2 * 3600 + 5 * 60 + 20);
        assert_eq!(humanize_duration(duration, 2), "2 hours, 5 minutes");

        let duration = Duration::from_secs(3 * 86_400 + 12 * 3600 + 40 * 60);
        assert_eq!(humanize_duration(duration, 2), "3 days, 13 hours");
    }

    #[test]
    fn skips_empty_units() {
        assert_eq!(humanize_duration(Duration::from_secs(3600), 2), "1 hour");
        assert_eq!(
            humanize_duration(Duration::from_secs(90), 2),
            "1 minute, 30 seconds"
        );
    }

    #[test]
    fn rounding_carries_into_larger_unit() {
        assert_eq!(humanize_duration(Duration::from_millis(59_600), 1), "1 minute");
    }

    #[test]
    fn sub_second_durations() {
        assert_eq!(humanize_duration(Duration::from_millis(400), 2), "0 seconds");
        assert_eq!(humanize_duration(Duration::from_millis(500), 2), "1 second");
    }
}
