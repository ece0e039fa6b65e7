use serde::Serialize;

use super::{parse_number, sanitize, split_fields, Record, Student, LIST_SEPARATOR, MAX_COURSES};
use crate::catalog::{self, CATEGORIES, LEVELS, PLATFORMS};
use crate::date::Date;
use crate::error::{AulaError, Result};

/// Professor field value written when no professor is assigned.
const NO_PROFESSOR: i64 = -1;

/// The four dates that drive a course's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CourseWindow {
    pub enroll_open: Date,
    pub enroll_close: Date,
    pub start: Date,
    pub end: Date,
}

impl CourseWindow {
    pub fn new(enroll_open: Date, enroll_close: Date, start: Date, end: Date) -> Self {
        Self {
            enroll_open,
            enroll_close,
            start,
            end,
        }
    }

    /// Enrollment closes no earlier than it opens, classes start strictly after
    /// enrollment closes, and end no earlier than they start.
    pub fn validate(&self) -> Result<()> {
        if self.enroll_close < self.enroll_open {
            return Err(AulaError::InvalidData(
                "enrollment cannot close before it opens".to_string(),
            ));
        }
        if self.start <= self.enroll_close {
            return Err(AulaError::InvalidData(
                "course must start after enrollment closes".to_string(),
            ));
        }
        if self.end < self.start {
            return Err(AulaError::InvalidData(
                "course cannot end before it starts".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything needed to create a course.
#[derive(Debug, Clone)]
pub struct CourseDraft {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub level: String,
    pub schedule: String,
    pub platform: String,
    pub max_students: u32,
    pub description: String,
    pub window: CourseWindow,
}

/// Update payload for a course. Dates change together.
#[derive(Debug, Default)]
pub struct CourseUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub level: Option<String>,
    pub schedule: Option<String>,
    pub platform: Option<String>,
    pub description: Option<String>,
    pub window: Option<CourseWindow>,
}

impl CourseUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.level.is_none()
            && self.schedule.is_none()
            && self.platform.is_none()
            && self.description.is_none()
            && self.window.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Course {
    id: u32,
    name: String,
    category: String,
    level: String,
    schedule: String,
    platform: String,
    max_students: u32,
    description: String,
    #[serde(flatten)]
    window: CourseWindow,
    professor: Option<u32>,
    roster: Vec<u32>,
}

impl Course {
    pub fn new(draft: CourseDraft) -> Result<Self> {
        let mut course = Self {
            id: draft.id,
            name: draft.name,
            category: draft.category,
            level: draft.level,
            schedule: draft.schedule,
            platform: draft.platform,
            max_students: draft.max_students,
            description: draft.description,
            window: draft.window,
            professor: None,
            roster: Vec::new(),
        };
        course.validate()?;
        Ok(course)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn schedule(&self) -> &str {
        &self.schedule
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn max_students(&self) -> u32 {
        self.max_students
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn window(&self) -> &CourseWindow {
        &self.window
    }

    pub fn professor(&self) -> Option<u32> {
        self.professor
    }

    pub fn roster(&self) -> &[u32] {
        &self.roster
    }

    pub fn enrolled_count(&self) -> usize {
        self.roster.len()
    }

    pub fn is_full(&self) -> bool {
        self.roster.len() >= self.max_students as usize
    }

    pub fn has_student(&self, account_id: u32) -> bool {
        self.roster.contains(&account_id)
    }

    pub fn is_open_for_enrollment(&self, today: Date) -> bool {
        today.is_between(&self.window.enroll_open, &self.window.enroll_close)
    }

    pub fn has_started(&self, today: Date) -> bool {
        !today.is_before(&self.window.start)
    }

    pub fn has_ended(&self, today: Date) -> bool {
        today.is_after(&self.window.end)
    }

    pub fn is_in_session(&self, today: Date) -> bool {
        today.is_between(&self.window.start, &self.window.end)
    }

    /// Only courses outside their class period with more than three students.
    pub fn can_be_fully_edited(&self, today: Date) -> bool {
        !self.is_in_session(today) && self.enrolled_count() > 3
    }

    pub fn can_be_deleted(&self, today: Date) -> bool {
        self.roster.is_empty() || self.has_ended(today)
    }

    pub fn enroll(&mut self, student: &mut Student, today: Date) -> Result<()> {
        if self.has_started(today) {
            return Err(AulaError::Enrollment(format!("course {} has already started", self.id)));
        }
        if !self.is_open_for_enrollment(today) {
            return Err(AulaError::Enrollment(format!(
                "enrollment for course {} is not open",
                self.id
            )));
        }
        if self.is_full() {
            return Err(AulaError::Enrollment(format!("course {} is full", self.id)));
        }
        if !student.can_enroll_another() {
            return Err(AulaError::Enrollment(format!(
                "student {} already has {} courses",
                student.account_id(),
                MAX_COURSES
            )));
        }
        if self.has_student(student.account_id()) {
            return Err(AulaError::Enrollment(format!(
                "student {} is already enrolled in course {}",
                student.account_id(),
                self.id
            )));
        }

        self.roster.push(student.account_id());
        student.add_course(self.id);
        Ok(())
    }

    pub fn unenroll(&mut self, student: &mut Student, today: Date) -> Result<()> {
        if self.has_ended(today) {
            return Err(AulaError::Enrollment(format!("course {} has already ended", self.id)));
        }
        let position = self
            .roster
            .iter()
            .position(|&id| id == student.account_id())
            .ok_or_else(|| {
                AulaError::Enrollment(format!(
                    "student {} is not enrolled in course {}",
                    student.account_id(),
                    self.id
                ))
            })?;

        // Vec::remove shifts the tail left, keeping roster order.
        self.roster.remove(position);
        student.remove_course(self.id);
        Ok(())
    }

    /// Apply an update, returning the edited copy only if every value is valid.
    pub fn updated(&self, update: CourseUpdate) -> Result<Course> {
        let mut course = self.clone();
        if let Some(name) = update.name {
            course.name = name;
        }
        if let Some(category) = update.category {
            course.category = category;
        }
        if let Some(level) = update.level {
            course.level = level;
        }
        if let Some(schedule) = update.schedule {
            course.schedule = schedule;
        }
        if let Some(platform) = update.platform {
            course.platform = platform;
        }
        if let Some(description) = update.description {
            course.description = description;
        }
        if let Some(window) = update.window {
            course.window = window;
        }
        course.validate()?;
        Ok(course)
    }

    pub(crate) fn set_professor(&mut self, professor: Option<u32>) {
        self.professor = professor;
    }

    pub(crate) fn roster_mut(&mut self) -> &mut Vec<u32> {
        &mut self.roster
    }

    fn validate(&mut self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AulaError::InvalidData("course name is required".to_string()));
        }
        self.category = catalog_value(&self.category, CATEGORIES, "category")?;
        self.level = catalog_value(&self.level, LEVELS, "level")?;
        self.platform = catalog_value(&self.platform, PLATFORMS, "platform")?;
        if self.max_students == 0 {
            return Err(AulaError::InvalidData(
                "maximum students must be greater than zero".to_string(),
            ));
        }
        catalog::validate_schedule(&self.schedule)?;
        self.window.validate()
    }

    pub fn from_line(line: &str) -> Result<Self> {
        let fields = split_fields(line, 12, "course")?;
        let max_students: u32 = parse_number(fields[6], "course", line)?;
        let date = |field: &str| {
            field
                .parse::<Date>()
                .map_err(|e| AulaError::InvalidFormat(format!("{} in course line: {}", e, line)))
        };

        let professor = match fields.get(12) {
            Some(field) if !field.trim().is_empty() => {
                let id: i64 = parse_number(field, "course", line)?;
                u32::try_from(id).ok()
            }
            _ => None,
        };

        let mut roster = Vec::new();
        if let Some(field) = fields.get(13) {
            for raw in field.split(LIST_SEPARATOR).map(str::trim).filter(|s| !s.is_empty()) {
                if roster.len() >= max_students as usize {
                    tracing::warn!(
                        course = fields[0],
                        "roster longer than capacity, extra ids dropped"
                    );
                    break;
                }
                match raw.parse::<u32>() {
                    Ok(id) => roster.push(id),
                    Err(_) => {
                        tracing::warn!(course = fields[0], id = raw, "ignoring malformed roster id")
                    }
                }
            }
        }

        Ok(Self {
            id: parse_number(fields[0], "course", line)?,
            name: fields[1].to_string(),
            category: fields[2].to_string(),
            level: fields[3].to_string(),
            schedule: fields[4].to_string(),
            platform: fields[5].to_string(),
            max_students,
            description: fields[7].to_string(),
            window: CourseWindow::new(
                date(fields[8])?,
                date(fields[9])?,
                date(fields[10])?,
                date(fields[11])?,
            ),
            professor,
            roster,
        })
    }
}

impl Record for Course {
    fn id(&self) -> u32 {
        self.id
    }

    fn to_line(&self) -> String {
        let professor = self.professor.map_or(NO_PROFESSOR, i64::from);
        let roster = self
            .roster
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
            self.id,
            sanitize(&self.name),
            self.category,
            self.level,
            sanitize(&self.schedule),
            self.platform,
            self.max_students,
            sanitize(&self.description),
            self.window.enroll_open,
            self.window.enroll_close,
            self.window.start,
            self.window.end,
            professor,
            roster
        )
    }
}

fn catalog_value(value: &str, table: &[&'static str], what: &str) -> Result<String> {
    catalog::canonical_value(value, table)
        .map(String::from)
        .ok_or_else(|| AulaError::InvalidData(format!("invalid course {}: {}", what, value)))
}
