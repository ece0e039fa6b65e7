use serde::Serialize;

use super::{parse_number, sanitize, split_fields, Record};
use crate::error::Result;

/// Most courses a student may be enrolled in at once.
pub const MAX_COURSES: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Student {
    account_id: u32,
    pub full_name: String,
    pub age: u32,
    pub school: String,
    /// Back-links to the courses this student is enrolled in. The course roster is
    /// the record of truth; these are kept for display and the course limit.
    courses: Vec<u32>,
}

/// Update payload for a student
#[derive(Debug, Default)]
pub struct StudentUpdate {
    pub full_name: Option<String>,
    pub age: Option<u32>,
    pub school: Option<String>,
}

impl Student {
    pub fn new(
        account_id: u32,
        full_name: impl Into<String>,
        age: u32,
        school: impl Into<String>,
    ) -> Self {
        Self {
            account_id,
            full_name: full_name.into(),
            age,
            school: school.into(),
            courses: Vec::new(),
        }
    }

    pub fn account_id(&self) -> u32 {
        self.account_id
    }

    pub fn courses(&self) -> &[u32] {
        &self.courses
    }

    pub fn can_enroll_another(&self) -> bool {
        self.courses.len() < MAX_COURSES
    }

    pub fn is_enrolled_in(&self, course_id: u32) -> bool {
        self.courses.contains(&course_id)
    }

    /// No-op when full or already linked.
    pub(crate) fn add_course(&mut self, course_id: u32) {
        if self.can_enroll_another() && !self.is_enrolled_in(course_id) {
            self.courses.push(course_id);
        }
    }

    pub(crate) fn remove_course(&mut self, course_id: u32) {
        self.courses.retain(|&id| id != course_id);
    }

    pub(crate) fn clear_courses(&mut self) {
        self.courses.clear();
    }

    pub fn from_line(line: &str) -> Result<Self> {
        let fields = split_fields(line, 4, "student")?;
        Ok(Self::new(
            parse_number(fields[0], "student", line)?,
            fields[1],
            parse_number(fields[2], "student", line)?,
            fields[3],
        ))
    }
}

impl Record for Student {
    fn id(&self) -> u32 {
        self.account_id
    }

    fn to_line(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.account_id,
            sanitize(&self.full_name),
            self.age,
            sanitize(&self.school)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AulaError;

    #[test]
    fn test_line_round_trip() {
        let student = Student::new(3141, "Ana López", 19, "Prepa 6");
        let line = student.to_line();
        assert_eq!(line, "3141|Ana López|19|Prepa 6");
        assert_eq!(Student::from_line(&line).unwrap(), student);
    }

    #[test]
    fn test_pipes_in_text_are_replaced() {
        let student = Student::new(1, "Ana|Bea", 20, "CCH|Sur");
        assert_eq!(student.to_line(), "1|Ana/Bea|20|CCH/Sur");
    }

    #[test]
    fn test_from_line_rejects_malformed() {
        assert!(matches!(Student::from_line("1|Ana|20"), Err(AulaError::InvalidFormat(_))));
        assert!(matches!(Student::from_line("x|Ana|20|Prepa"), Err(AulaError::InvalidFormat(_))));
        assert!(matches!(
            Student::from_line("1|Ana|veinte|Prepa"),
            Err(AulaError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_course_links_are_capped() {
        let mut student = Student::new(1, "Ana", 20, "Prepa");
        for id in 0..10 {
            student.add_course(id);
        }
        assert_eq!(student.courses().len(), MAX_COURSES);
        assert!(!student.can_enroll_another());

        student.remove_course(2);
        assert_eq!(student.courses(), &[0, 1, 3, 4, 5]);
        assert!(student.can_enroll_another());
    }

    #[test]
    fn test_add_course_ignores_duplicates() {
        let mut student = Student::new(1, "Ana", 20, "Prepa");
        student.add_course(7);
        student.add_course(7);
        assert_eq!(student.courses(), &[7]);
    }
}
