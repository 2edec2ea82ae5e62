//! ISO 8601 durations as used for hours and estimates (`PT1H30M`).

use chrono::Duration;

/// Parse an ISO 8601 duration.
///
/// Supports weeks, days, hours, minutes and seconds, with a fractional last
/// component (`PT1.5H`). Years and months have no fixed length and are
/// rejected.
pub fn parse(input: &str) -> Option<Duration> {
    let (negative, rest) = match input.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, input),
    };
    let rest = rest.strip_prefix('P')?;
    if rest.is_empty() {
        return None;
    }

    let (date_part, time_part) = match rest.split_once('T') {
        Some((_, "")) => return None,
        Some((date, time)) => (date, Some(time)),
        None => (rest, None),
    };

    let mut millis = 0.0_f64;
    for (value, unit) in components(date_part)? {
        millis += value
            * match unit {
                'W' => 7.0 * 86_400_000.0,
                'D' => 86_400_000.0,
                _ => return None,
            };
    }
    if let Some(time) = time_part {
        for (value, unit) in components(time)? {
            millis += value
                * match unit {
                    'H' => 3_600_000.0,
                    'M' => 60_000.0,
                    'S' => 1_000.0,
                    _ => return None,
                };
        }
    }

    let duration = Duration::milliseconds(millis.round() as i64);
    Some(if negative { -duration } else { duration })
}

/// Format a duration as `PT<h>H<m>M<s>S`, omitting zero components.
pub fn format(duration: Duration) -> String {
    let negative = duration < Duration::zero();
    let total = duration.num_seconds().abs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    let mut out = String::from(if negative { "-PT" } else { "PT" });
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if seconds > 0 || total == 0 {
        out.push_str(&format!("{seconds}S"));
    }
    out
}

fn components(part: &str) -> Option<Vec<(f64, char)>> {
    let mut out = Vec::new();
    let mut number = String::new();
    for c in part.chars() {
        if c.is_ascii_digit() || c == '.' || c == ',' {
            number.push(if c == ',' { '.' } else { c });
        } else {
            if number.is_empty() {
                return None;
            }
            out.push((number.parse().ok()?, c));
            number.clear();
        }
    }
    // Trailing digits without a unit designator.
    if !number.is_empty() {
        return None;
    }
    Some(out)
}
