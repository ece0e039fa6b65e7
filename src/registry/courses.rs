use super::Registry;
use crate::config::ReassignCutoff;
use crate::date::Date;
use crate::entity::{Course, CourseUpdate, Student, TeachingPolicy};
use crate::error::{AulaError, Result};

impl Registry {
    pub fn register_course(&mut self, course: Course) -> Result<()> {
        if self.courses.contains(course.id()) {
            return Err(AulaError::InvalidData(format!(
                "a course with id {} already exists",
                course.id()
            )));
        }
        let id = course.id();
        self.courses.add(course)?;
        tracing::debug!(course = id, "registered course");
        Ok(())
    }

    pub fn find_course(&self, course_id: u32) -> Result<&Course> {
        self.courses.find_by_id(course_id)
    }

    pub fn list_courses(&self) -> &[Course] {
        self.courses.all()
    }

    /// Students on a course's roster, in enrollment order.
    pub fn course_roster(&self, course_id: u32) -> Result<Vec<&Student>> {
        let course = self.courses.find_by_id(course_id)?;
        Ok(course
            .roster()
            .iter()
            .filter_map(|&id| self.students.find_by_id(id).ok())
            .collect())
    }

    /// Full edit of a course; only allowed while `can_be_fully_edited` holds.
    pub fn update_course(
        &mut self,
        course_id: u32,
        update: CourseUpdate,
        today: Date,
    ) -> Result<&Course> {
        let course = self.courses.find_by_id(course_id)?;
        if !course.can_be_fully_edited(today) {
            return Err(AulaError::EditNotAllowed(format!(
                "course {} must be outside its class period and have more than 3 students",
                course_id
            )));
        }

        let edited = course.updated(update)?;
        self.courses.replace(edited)?;
        tracing::debug!(course = course_id, "updated course");
        self.courses.find_by_id(course_id)
    }

    /// Only empty or finished courses can be deleted. Students lose their link to it.
    pub fn delete_course(&mut self, course_id: u32, today: Date) -> Result<Course> {
        let course = self.courses.find_by_id(course_id)?;
        if !course.can_be_deleted(today) {
            return Err(AulaError::DeletionNotAllowed(format!(
                "course {} has students and has not ended",
                course_id
            )));
        }

        let removed = self.courses.remove_by_id(course_id)?;
        for student in self.students.iter_mut() {
            student.remove_course(course_id);
        }
        tracing::debug!(course = course_id, "deleted course");
        Ok(removed)
    }

    pub fn assign_professor(
        &mut self,
        course_id: u32,
        employee_id: u32,
        today: Date,
    ) -> Result<()> {
        let course = self.courses.find_by_id_mut(course_id)?;
        let professor = self.professors.find_by_id(employee_id)?;

        if course.has_started(today) {
            return Err(AulaError::Assignment(format!("course {} has already started", course_id)));
        }
        if let Some(current) = course.professor() {
            return Err(AulaError::Assignment(format!(
                "course {} already has professor {}",
                course_id, current
            )));
        }
        if !professor.can_teach(course.level(), course.category(), self.rules.empty_sets) {
            return Err(ineligible(employee_id, course, self.rules.empty_sets));
        }

        course.set_professor(Some(employee_id));
        tracing::debug!(course = course_id, professor = employee_id, "assigned professor");
        Ok(())
    }

    /// Replaces any current assignment. The cutoff date comes from the rule settings.
    pub fn reassign_professor(
        &mut self,
        course_id: u32,
        employee_id: u32,
        today: Date,
    ) -> Result<()> {
        let course = self.courses.find_by_id_mut(course_id)?;
        let professor = self.professors.find_by_id(employee_id)?;

        let closed = match self.rules.reassign_cutoff {
            ReassignCutoff::Started => course.has_started(today),
            ReassignCutoff::Ended => course.has_ended(today),
        };
        if closed {
            return Err(AulaError::Assignment(format!(
                "course {} can no longer change professor (cutoff: {})",
                course_id, self.rules.reassign_cutoff
            )));
        }
        if !professor.can_teach(course.level(), course.category(), self.rules.empty_sets) {
            return Err(ineligible(employee_id, course, self.rules.empty_sets));
        }

        course.set_professor(Some(employee_id));
        tracing::debug!(course = course_id, professor = employee_id, "reassigned professor");
        Ok(())
    }

    pub fn enroll_student_in_course(
        &mut self,
        course_id: u32,
        account_id: u32,
        today: Date,
    ) -> Result<()> {
        let course = self.courses.find_by_id_mut(course_id)?;
        let student = self.students.find_by_id_mut(account_id)?;
        course.enroll(student, today)?;
        tracing::debug!(course = course_id, student = account_id, "enrolled student");
        Ok(())
    }

    pub fn unenroll_student_from_course(
        &mut self,
        course_id: u32,
        account_id: u32,
        today: Date,
    ) -> Result<()> {
        let course = self.courses.find_by_id_mut(course_id)?;
        let student = self.students.find_by_id_mut(account_id)?;
        course.unenroll(student, today)?;
        tracing::debug!(course = course_id, student = account_id, "unenrolled student");
        Ok(())
    }
}

fn ineligible(employee_id: u32, course: &Course, policy: TeachingPolicy) -> AulaError {
    AulaError::Assignment(format!(
        "professor {} cannot teach {} / {} (empty sets: {})",
        employee_id,
        course.level(),
        course.category(),
        policy
    ))
}
