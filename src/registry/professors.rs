use super::Registry;
use crate::entity::{Course, Professor, ProfessorUpdate, Record};
use crate::error::{AulaError, Result};

impl Registry {
    /// Levels and categories must come from the catalogs.
    pub fn register_professor(&mut self, mut professor: Professor) -> Result<()> {
        if professor.full_name.trim().is_empty() {
            return Err(AulaError::InvalidData("professor name is required".to_string()));
        }
        if self.professors.contains(professor.id()) {
            return Err(AulaError::InvalidData(format!(
                "a professor with employee number {} already exists",
                professor.id()
            )));
        }
        professor.normalize_catalog_values()?;

        let id = professor.id();
        self.professors.add(professor)?;
        tracing::debug!(professor = id, "registered professor");
        Ok(())
    }

    pub fn find_professor(&self, employee_id: u32) -> Result<&Professor> {
        self.professors.find_by_id(employee_id)
    }

    pub fn list_professors(&self) -> &[Professor] {
        self.professors.all()
    }

    pub fn courses_taught_by(&self, employee_id: u32) -> Vec<&Course> {
        self.courses
            .all()
            .iter()
            .filter(|c| c.professor() == Some(employee_id))
            .collect()
    }

    pub fn update_professor(
        &mut self,
        employee_id: u32,
        update: ProfessorUpdate,
    ) -> Result<&Professor> {
        let mut professor = self.professors.find_by_id(employee_id)?.clone();

        if let Some(name) = update.full_name {
            if name.trim().is_empty() {
                return Err(AulaError::InvalidData("professor name is required".to_string()));
            }
            professor.full_name = name;
        }
        if let Some(levels) = update.levels {
            professor.levels = levels;
        }
        if let Some(categories) = update.categories {
            professor.categories = categories;
        }
        if let Some(title) = update.title {
            professor.title = title;
        }
        if let Some(year) = update.title_year {
            professor.title_year = year;
        }
        professor.normalize_catalog_values()?;

        self.professors.replace(professor)?;
        self.professors.find_by_id(employee_id)
    }

    /// Blocked while the professor is assigned to any course.
    pub fn delete_professor(&mut self, employee_id: u32) -> Result<Professor> {
        self.professors.find_by_id(employee_id)?;

        if let Some(course) = self.courses_taught_by(employee_id).first() {
            return Err(AulaError::DeletionNotAllowed(format!(
                "professor {} is assigned to course {}",
                employee_id,
                course.id()
            )));
        }

        let removed = self.professors.remove_by_id(employee_id)?;
        tracing::debug!(professor = employee_id, "deleted professor");
        Ok(removed)
    }
}
