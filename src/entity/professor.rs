use serde::{Deserialize, Serialize};

use super::{join_list, parse_number, sanitize, split_fields, split_list, Record};
use crate::catalog::{self, CATEGORIES, LEVELS};
use crate::error::{AulaError, Result};

/// How an empty level or category set is read when checking eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeachingPolicy {
    /// An empty set places no restriction.
    #[default]
    Permissive,
    /// An empty set matches nothing.
    Restrictive,
}

impl std::fmt::Display for TeachingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeachingPolicy::Permissive => write!(f, "permissive"),
            TeachingPolicy::Restrictive => write!(f, "restrictive"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Professor {
    employee_id: u32,
    pub full_name: String,
    pub levels: Vec<String>,
    pub categories: Vec<String>,
    pub title: String,
    pub title_year: i32,
}

/// Update payload for a professor
#[derive(Debug, Default)]
pub struct ProfessorUpdate {
    pub full_name: Option<String>,
    pub levels: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub title: Option<String>,
    pub title_year: Option<i32>,
}

impl Professor {
    pub fn new(
        employee_id: u32,
        full_name: impl Into<String>,
        title: impl Into<String>,
        title_year: i32,
    ) -> Self {
        Self {
            employee_id,
            full_name: full_name.into(),
            levels: Vec::new(),
            categories: Vec::new(),
            title: title.into(),
            title_year,
        }
    }

    pub fn with_levels(mut self, levels: &[&str]) -> Self {
        self.levels = levels.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn employee_id(&self) -> u32 {
        self.employee_id
    }

    pub fn can_teach(&self, level: &str, category: &str, policy: TeachingPolicy) -> bool {
        allows(&self.levels, level, policy) && allows(&self.categories, category, policy)
    }

    /// Check every level and category against the catalogs, normalizing spelling.
    pub fn normalize_catalog_values(&mut self) -> Result<()> {
        self.levels = canonical_list(&self.levels, LEVELS, "level")?;
        self.categories = canonical_list(&self.categories, CATEGORIES, "category")?;
        Ok(())
    }

    pub fn from_line(line: &str) -> Result<Self> {
        // The older four-field layout has no levels or categories.
        let fields = split_fields(line, 4, "professor")?;
        let mut professor = Self::new(
            parse_number(fields[0], "professor", line)?,
            fields[1],
            fields[2],
            parse_number(fields[3], "professor", line)?,
        );
        if let Some(levels) = fields.get(4) {
            professor.levels = split_list(levels);
        }
        if let Some(categories) = fields.get(5) {
            professor.categories = split_list(categories);
        }
        Ok(professor)
    }
}

impl Record for Professor {
    fn id(&self) -> u32 {
        self.employee_id
    }

    fn to_line(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}|{}",
            self.employee_id,
            sanitize(&self.full_name),
            sanitize(&self.title),
            self.title_year,
            join_list(&self.levels),
            join_list(&self.categories)
        )
    }
}

fn allows(set: &[String], value: &str, policy: TeachingPolicy) -> bool {
    if set.is_empty() {
        return policy == TeachingPolicy::Permissive;
    }
    catalog::is_valid_value(value, set)
}

fn canonical_list(values: &[String], table: &[&'static str], what: &str) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let canonical = catalog::canonical_value(value, table)
            .ok_or_else(|| AulaError::InvalidData(format!("invalid {}: {}", what, value.trim())))?;
        if !out.iter().any(|v| v == canonical) {
            out.push(canonical.to_string());
        }
    }
    Ok(out)
}
