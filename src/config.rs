//! Session configuration.
//!
//! Read from `aula.toml` inside the data directory. Every key is optional;
//! missing keys fall back to the defaults below.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::entity::TeachingPolicy;
use crate::error::Result;

pub const CONFIG_FILE: &str = "aula.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub files: FileSettings,
    #[serde(default)]
    pub capacity: CapacitySettings,
    #[serde(default)]
    pub rules: RuleSettings,
}

/// Data file names, relative to the data directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSettings {
    #[serde(default = "default_students_file")]
    pub students: PathBuf,
    #[serde(default = "default_professors_file")]
    pub professors: PathBuf,
    #[serde(default = "default_courses_file")]
    pub courses: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySettings {
    #[serde(default = "default_student_capacity")]
    pub students: usize,
    #[serde(default = "default_professor_capacity")]
    pub professors: usize,
    #[serde(default = "default_course_capacity")]
    pub courses: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSettings {
    /// How a professor with no levels or categories is treated.
    #[serde(default)]
    pub empty_sets: TeachingPolicy,
    /// Which boundary closes professor reassignment.
    #[serde(default)]
    pub reassign_cutoff: ReassignCutoff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReassignCutoff {
    /// Reassignment closes on the first day of classes.
    #[default]
    Started,
    /// Reassignment stays open until the course has ended.
    Ended,
}

impl std::fmt::Display for ReassignCutoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReassignCutoff::Started => write!(f, "started"),
            ReassignCutoff::Ended => write!(f, "ended"),
        }
    }
}

fn default_students_file() -> PathBuf {
    PathBuf::from("alumnos.txt")
}

fn default_professors_file() -> PathBuf {
    PathBuf::from("profesores.txt")
}

fn default_courses_file() -> PathBuf {
    PathBuf::from("cursos.txt")
}

fn default_student_capacity() -> usize {
    200
}

fn default_professor_capacity() -> usize {
    100
}

fn default_course_capacity() -> usize {
    100
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            students: default_students_file(),
            professors: default_professors_file(),
            courses: default_courses_file(),
        }
    }
}

impl Default for CapacitySettings {
    fn default() -> Self {
        Self {
            students: default_student_capacity(),
            professors: default_professor_capacity(),
            courses: default_course_capacity(),
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Load `aula.toml` from the data directory, or defaults if it is absent.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        tracing::debug!(path = %path.display(), "reading config");
        Self::from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AulaError;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.files.students, PathBuf::from("alumnos.txt"));
        assert_eq!(config.capacity.students, 200);
        assert_eq!(config.capacity.courses, 100);
        assert_eq!(config.rules.empty_sets, TeachingPolicy::Permissive);
        assert_eq!(config.rules.reassign_cutoff, ReassignCutoff::Started);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [capacity]
            courses = 3

            [rules]
            empty_sets = "restrictive"
            reassign_cutoff = "ended"
            "#,
        )
        .unwrap();

        assert_eq!(config.capacity.courses, 3);
        assert_eq!(config.capacity.students, 200);
        assert_eq!(config.files, FileSettings::default());
        assert_eq!(config.rules.empty_sets, TeachingPolicy::Restrictive);
        assert_eq!(config.rules.reassign_cutoff, ReassignCutoff::Ended);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = Config::from_toml("[rules]\nempty_sets = \"sometimes\"\n");
        assert!(matches!(result, Err(AulaError::Config(_))));
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(Config::load(tmp.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "[files]\ncourses = \"c.txt\"\n").unwrap();
        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.files.courses, PathBuf::from("c.txt"));
    }
}
