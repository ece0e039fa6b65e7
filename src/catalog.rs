//! Fixed lookup tables for course attributes and the schedule format check.

use crate::error::{AulaError, Result};

pub const CATEGORIES: &[&str] = &[
    "Computación",
    "Matemáticas",
    "Física",
    "Química",
    "Biología",
    "Economía",
    "Deporte",
    "Literatura",
    "Filosofía",
    "Historia",
    "Otro",
];

pub const LEVELS: &[&str] = &["Preparatoria", "Licenciatura", "Posgrado"];

pub const PLATFORMS: &[&str] = &["Meet", "Zoom", "Jitsi", "Skype"];

/// Earliest hour a course may start.
pub const FIRST_HOUR: u32 = 7;
/// Latest hour a course may end.
pub const LAST_HOUR: u32 = 21;

/// Case-insensitive, whitespace-trimmed membership test.
///
/// Works on the fixed catalogs and on a professor's own level or category list.
pub fn is_valid_value<S: AsRef<str>>(value: &str, table: &[S]) -> bool {
    let wanted = value.trim().to_lowercase();
    table
        .iter()
        .any(|entry| entry.as_ref().trim().to_lowercase() == wanted)
}

/// Returns the table's own spelling of `value`, if present.
pub fn canonical_value<'t>(value: &str, table: &[&'t str]) -> Option<&'t str> {
    let wanted = value.trim().to_lowercase();
    table.iter().copied().find(|entry| entry.to_lowercase() == wanted)
}

/// Check a `"HH:MM-HH:MM"` schedule.
///
/// Only the hour component is range checked; minutes must be numeric.
pub fn validate_schedule(text: &str) -> Result<()> {
    let bounds: Vec<&str> = text.split('-').collect();
    if bounds.len() != 2 {
        return Err(AulaError::InvalidData(format!(
            "invalid schedule format '{}', expected HH:MM-HH:MM",
            text
        )));
    }

    let start = parse_hour(bounds[0])?;
    let end = parse_hour(bounds[1])?;

    if start < FIRST_HOUR || end > LAST_HOUR || start >= end {
        return Err(AulaError::InvalidData(format!(
            "schedule '{}' must lie between {}:00 and {}:00 and start before it ends",
            text, FIRST_HOUR, LAST_HOUR
        )));
    }

    Ok(())
}

fn parse_hour(token: &str) -> Result<u32> {
    let invalid = || AulaError::InvalidData(format!("invalid hour: {}", token));

    let (hour, minute) = token.trim().split_once(':').ok_or_else(invalid)?;
    if minute.contains(':') {
        return Err(invalid());
    }
    minute.parse::<u32>().map_err(|_| invalid())?;
    hour.parse::<u32>().map_err(|_| invalid())
}
