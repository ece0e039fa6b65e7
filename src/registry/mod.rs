//! Business rules for courses, professors and students.
//!
//! The [`Registry`] owns one repository per entity type and is the only place
//! entities are mutated after creation. Links between entities are ids: a
//! course holds its professor's employee number and its roster of account
//! numbers, and each student keeps back-links to its course ids.

mod courses;
mod professors;
mod students;

use std::path::Path;

use crate::config::{CapacitySettings, RuleSettings};
use crate::entity::{Course, Professor, Student};
use crate::error::Result;
use crate::storage::Repository;

pub struct Registry {
    courses: Repository<Course>,
    students: Repository<Student>,
    professors: Repository<Professor>,
    rules: RuleSettings,
}

impl Registry {
    pub fn new(capacity: &CapacitySettings, rules: RuleSettings) -> Self {
        Self {
            courses: Repository::new("course", capacity.courses, Course::from_line),
            students: Repository::new("student", capacity.students, Student::from_line),
            professors: Repository::new("professor", capacity.professors, Professor::from_line),
            rules,
        }
    }

    pub fn courses(&self) -> &Repository<Course> {
        &self.courses
    }

    pub fn students(&self) -> &Repository<Student> {
        &self.students
    }

    pub fn professors(&self) -> &Repository<Professor> {
        &self.professors
    }

    pub fn load_students(&mut self, path: &Path) -> Result<usize> {
        self.students.load_all(path)
    }

    pub fn load_professors(&mut self, path: &Path) -> Result<usize> {
        self.professors.load_all(path)
    }

    pub fn load_courses(&mut self, path: &Path) -> Result<usize> {
        self.courses.load_all(path)
    }

    /// Resolve the ids stored on courses against the loaded repositories.
    ///
    /// Unknown professors and students are dropped, duplicate roster entries
    /// collapse, rosters are cut to capacity, and student back-links are rebuilt.
    /// Dates are not re-checked. Returns how many references were dropped.
    pub fn relink(&mut self) -> usize {
        let Self {
            courses,
            students,
            professors,
            ..
        } = self;
        let mut dropped = 0;

        for student in students.iter_mut() {
            student.clear_courses();
        }

        for course in courses.iter_mut() {
            if let Some(employee_id) = course.professor() {
                if !professors.contains(employee_id) {
                    tracing::warn!(
                        course = course.id(),
                        professor = employee_id,
                        "unknown professor, unassigning"
                    );
                    course.set_professor(None);
                    dropped += 1;
                }
            }

            let saved = course.roster().to_vec();
            let capacity = course.max_students() as usize;
            let mut kept: Vec<u32> = Vec::with_capacity(saved.len());

            for account_id in saved {
                if kept.contains(&account_id) {
                    dropped += 1;
                    continue;
                }
                if kept.len() >= capacity {
                    tracing::warn!(
                        course = course.id(),
                        student = account_id,
                        "roster over capacity, dropping"
                    );
                    dropped += 1;
                    continue;
                }
                match students.find_by_id_mut(account_id) {
                    Ok(student) => {
                        student.add_course(course.id());
                        kept.push(account_id);
                    }
                    Err(_) => {
                        tracing::warn!(
                            course = course.id(),
                            student = account_id,
                            "unknown student, dropping"
                        );
                        dropped += 1;
                    }
                }
            }

            *course.roster_mut() = kept;
        }

        dropped
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(&CapacitySettings::default(), RuleSettings::default())
    }
}
