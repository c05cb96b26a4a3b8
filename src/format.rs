//! Time display helpers.
//!
//! All inputs are seconds as `f64`. Negative and non-finite values format as
//! zero; display code should never have to guard against them.

use crate::error::{EditorError, Result};

fn clamp_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    }
}

/// Split into (whole seconds, milliseconds) with the millisecond carry applied.
fn split_millis(seconds: f64) -> (u64, u64) {
    let total_ms = (clamp_seconds(seconds) * 1000.0).round() as u64;
    (total_ms / 1000, total_ms % 1000)
}

/// Format seconds as MM:SS, truncating the fractional part
pub fn format_time(seconds: f64) -> String {
    let total = clamp_seconds(seconds).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Format seconds as MM:SS.mmm
pub fn format_time_with_millis(seconds: f64) -> String {
    let (total, millis) = split_millis(seconds);
    format!("{:02}:{:02}.{:03}", total / 60, total % 60, millis)
}

/// Format seconds as H:MM:SS when at least an hour long, otherwise M:SS
pub fn format_duration(seconds: f64) -> String {
    let total = clamp_seconds(seconds).floor() as u64;
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Same as [`format_duration`] with a `.mmm` suffix
pub fn format_duration_with_millis(seconds: f64) -> String {
    let (total, millis) = split_millis(seconds);
    let hours = total / 3600;
    let mins = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, mins, secs, millis)
    } else {
        format!("{}:{:02}.{:03}", mins, secs, millis)
    }
}

/// Timestamp shown next to transcript sentences
pub fn format_timestamp(seconds: f64, show_millis: bool) -> String {
    if show_millis {
        format_time_with_millis(seconds)
    } else {
        format_time(seconds)
    }
}

/// Parse `MM:SS` or `MM:SS.mmm` into seconds
pub fn parse_time_string(input: &str) -> Result<f64> {
    let invalid = || EditorError::InvalidTimeFormat(input.to_string());

    let (minutes, seconds) = input.trim().split_once(':').ok_or_else(invalid)?;
    if seconds.contains(':') {
        return Err(invalid());
    }

    let minutes: u64 = minutes.parse().map_err(|_| invalid())?;

    let (whole, fraction) = match seconds.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (seconds, None),
    };

    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(whole) || !fraction.map_or(true, is_digits) {
        return Err(invalid());
    }

    let whole: u64 = whole.parse().map_err(|_| invalid())?;
    let fraction: f64 = match fraction {
        Some(digits) => format!("0.{}", digits).parse().map_err(|_| invalid())?,
        None => 0.0,
    };

    Ok(round_to_millisecond(
        (minutes * 60 + whole) as f64 + fraction,
    ))
}

/// Round to three decimal places
pub fn round_to_millisecond(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

/// Duration between two timestamps, rounded to the millisecond
pub fn calculate_duration(start: f64, end: f64) -> f64 {
    round_to_millisecond(end - start)
}

pub fn has_millisecond_precision(seconds: f64) -> bool {
    seconds.fract() != 0.0
}

/// Position of `current` within `total` as a percentage in `0..=100`
pub fn time_to_percentage(current: f64, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    (current / total * 100.0).clamp(0.0, 100.0)
}

pub fn percentage_to_time(percentage: f64, total: f64) -> f64 {
    percentage / 100.0 * total
}
