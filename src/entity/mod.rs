mod course;
mod professor;
mod student;

pub use course::{Course, CourseDraft, CourseUpdate, CourseWindow};
pub use professor::{Professor, ProfessorUpdate, TeachingPolicy};
pub use student::{Student, StudentUpdate, MAX_COURSES};

use crate::error::{AulaError, Result};

/// Field separator of the persisted line format.
pub const FIELD_SEPARATOR: char = '|';

/// Separator for list-valued fields (levels, categories, roster ids).
pub const LIST_SEPARATOR: char = ',';

/// An entity that lives in a repository and persists as one text line.
pub trait Record {
    fn id(&self) -> u32;

    /// Encode as a single `|`-delimited line without trailing newline.
    fn to_line(&self) -> String;
}

/// Make free text safe to embed as one field of a line.
pub(crate) fn sanitize(text: &str) -> String {
    text.replace(FIELD_SEPARATOR, "/").replace(['\n', '\r'], " ")
}

/// Split a line into fields, requiring at least `min` of them.
pub(crate) fn split_fields<'a>(line: &'a str, min: usize, kind: &str) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < min {
        return Err(AulaError::InvalidFormat(format!(
            "{} line needs at least {} fields: {}",
            kind, min, line
        )));
    }
    Ok(fields)
}

pub(crate) fn parse_number<T: std::str::FromStr>(field: &str, kind: &str, line: &str) -> Result<T> {
    field
        .trim()
        .parse()
        .map_err(|_| {
            AulaError::InvalidFormat(format!("bad number '{}' in {} line: {}", field, kind, line))
        })
}

/// Parse a comma-separated list, dropping blank entries.
pub(crate) fn split_list(field: &str) -> Vec<String> {
    field
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

pub(crate) fn join_list(items: &[String]) -> String {
    items
        .iter()
        .map(|s| sanitize(s.trim()).replace(LIST_SEPARATOR, " "))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_separator_and_newlines() {
        assert_eq!(sanitize("a|b\nc"), "a/b c");
    }

    #[test]
    fn test_split_fields_enforces_minimum() {
        assert_eq!(split_fields("1|2|3", 3, "test").unwrap(), vec!["1", "2", "3"]);
        assert!(matches!(split_fields("1|2", 3, "test"), Err(AulaError::InvalidFormat(_))));
    }

    #[test]
    fn test_list_helpers() {
        assert_eq!(split_list(" Física, ,Química "), vec!["Física", "Química"]);
        assert!(split_list("").is_empty());
        let values = ["Física".to_string(), " ".to_string(), "Otro".to_string()];
        assert_eq!(join_list(&values), "Física,Otro");
    }
}
