use super::Registry;
use crate::entity::{Record, Student, StudentUpdate};
use crate::error::{AulaError, Result};

impl Registry {
    pub fn register_student(&mut self, student: Student) -> Result<()> {
        if student.full_name.trim().is_empty() {
            return Err(AulaError::InvalidData("student name is required".to_string()));
        }
        if self.students.contains(student.id()) {
            return Err(AulaError::InvalidData(format!(
                "a student with account number {} already exists",
                student.id()
            )));
        }
        let id = student.id();
        self.students.add(student)?;
        tracing::debug!(student = id, "registered student");
        Ok(())
    }

    pub fn find_student(&self, account_id: u32) -> Result<&Student> {
        self.students.find_by_id(account_id)
    }

    pub fn list_students(&self) -> &[Student] {
        self.students.all()
    }

    pub fn update_student(&mut self, account_id: u32, update: StudentUpdate) -> Result<&Student> {
        if let Some(name) = &update.full_name {
            if name.trim().is_empty() {
                return Err(AulaError::InvalidData("student name is required".to_string()));
            }
        }

        let student = self.students.find_by_id_mut(account_id)?;
        if let Some(name) = update.full_name {
            student.full_name = name;
        }
        if let Some(age) = update.age {
            student.age = age;
        }
        if let Some(school) = update.school {
            student.school = school;
        }
        Ok(student)
    }

    /// Blocked while any course roster still lists the student.
    pub fn delete_student(&mut self, account_id: u32) -> Result<Student> {
        self.students.find_by_id(account_id)?;

        if let Some(course) = self.courses.all().iter().find(|c| c.has_student(account_id)) {
            return Err(AulaError::DeletionNotAllowed(format!(
                "student {} is enrolled in course {}",
                account_id,
                course.id()
            )));
        }

        let removed = self.students.remove_by_id(account_id)?;
        tracing::debug!(student = account_id, "deleted student");
        Ok(removed)
    }
}
