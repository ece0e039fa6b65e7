use std::path::PathBuf;

use crate::catalog::{CATEGORIES, LEVELS, PLATFORMS};
use crate::date::Date;
use crate::entity::{
    Course, CourseDraft, CourseUpdate, CourseWindow, Professor, ProfessorUpdate, Student,
    StudentUpdate,
};
use crate::error::{AulaError, Result};
use crate::session::Session;

use super::commands::CourseDates;

/// Values shared by every command.
pub struct Context {
    pub data_dir: PathBuf,
    pub today: Date,
}

impl Context {
    pub fn new(data_dir: PathBuf, today: Option<String>) -> Result<Self> {
        let today = match today {
            Some(text) => parse_date("--today", &text)?,
            None => Date::today(),
        };
        Ok(Self { data_dir, today })
    }
}

/// Open the session, reporting load problems without failing.
fn open_session(ctx: &Context) -> Result<Session> {
    let session = Session::open(&ctx.data_dir)?;
    for advisory in session.advisories() {
        eprintln!("Warning: {}", advisory);
    }
    Ok(session)
}

/// A date typed on the command line. Bad input is invalid data, not a corrupt file.
fn parse_date(flag: &str, text: &str) -> Result<Date> {
    text.parse()
        .map_err(|_| AulaError::InvalidData(format!("{} expects D-M-YYYY, got '{}'", flag, text)))
}

fn parse_window(dates: CourseDates) -> Result<Option<CourseWindow>> {
    match (dates.enroll_open, dates.enroll_close, dates.start, dates.end) {
        (None, None, None, None) => Ok(None),
        (Some(open), Some(close), Some(start), Some(end)) => Ok(Some(CourseWindow::new(
            parse_date("--enroll-open", &open)?,
            parse_date("--enroll-close", &close)?,
            parse_date("--start", &start)?,
            parse_date("--end", &end)?,
        ))),
        _ => Err(AulaError::InvalidData(
            "--enroll-open, --enroll-close, --start and --end must be given together".to_string(),
        )),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_student(student: &Student) -> String {
    format!(
        "{:>8}  {} ({} years, {}) - {} course(s)",
        student.account_id(),
        student.full_name,
        student.age,
        student.school,
        student.courses().len()
    )
}

fn format_professor(professor: &Professor) -> String {
    let or_any = |items: &[String]| {
        if items.is_empty() {
            "any".to_string()
        } else {
            items.join(", ")
        }
    };
    format!(
        "{:>8}  {} - {} ({}) - levels: {} - categories: {}",
        professor.employee_id(),
        professor.full_name,
        professor.title,
        professor.title_year,
        or_any(&professor.levels),
        or_any(&professor.categories)
    )
}

fn format_course(course: &Course) -> String {
    let professor = course
        .professor()
        .map_or_else(|| "unassigned".to_string(), |id| format!("professor {}", id));
    format!(
        "{:>8}  {} [{} / {}] {} on {} - {}/{} students - {}",
        course.id(),
        course.name(),
        course.category(),
        course.level(),
        course.schedule(),
        course.platform(),
        course.enrolled_count(),
        course.max_students(),
        professor
    )
}

fn course_status(course: &Course, today: Date) -> &'static str {
    if course.has_ended(today) {
        "ended"
    } else if course.is_in_session(today) {
        "in session"
    } else if course.is_open_for_enrollment(today) {
        "open for enrollment"
    } else {
        "not yet open"
    }
}

// Students

pub fn handle_student_add(
    ctx: &Context,
    id: u32,
    name: String,
    age: u32,
    school: String,
    json: bool,
) -> Result<()> {
    let mut session = open_session(ctx)?;
    let student = Student::new(id, name, age, school);
    session.registry_mut().register_student(student.clone())?;
    session.save()?;

    if json {
        print_json(&student)?;
    } else {
        println!("Registered student {} - {}", student.account_id(), student.full_name);
    }
    Ok(())
}

pub fn handle_student_list(ctx: &Context, json: bool) -> Result<()> {
    let session = open_session(ctx)?;
    let students = session.registry().list_students();

    if json {
        return print_json(students);
    }
    if students.is_empty() {
        println!("No students registered.");
    }
    for student in students {
        println!("{}", format_student(student));
    }
    Ok(())
}

pub fn handle_student_get(ctx: &Context, id: u32, json: bool) -> Result<()> {
    let session = open_session(ctx)?;
    let registry = session.registry();
    let student = registry.find_student(id)?;

    if json {
        return print_json(student);
    }
    println!("{}", format_student(student));
    for course_id in student.courses() {
        if let Ok(course) = registry.find_course(*course_id) {
            println!("  - {} {}", course.id(), course.name());
        }
    }
    Ok(())
}

pub fn handle_student_update(
    ctx: &Context,
    id: u32,
    name: Option<String>,
    age: Option<u32>,
    school: Option<String>,
    json: bool,
) -> Result<()> {
    let mut session = open_session(ctx)?;
    let update = StudentUpdate {
        full_name: name,
        age,
        school,
    };
    let student = session.registry_mut().update_student(id, update)?.clone();
    session.save()?;

    if json {
        print_json(&student)?;
    } else {
        println!("Updated student {}", format_student(&student).trim_start());
    }
    Ok(())
}

pub fn handle_student_delete(ctx: &Context, id: u32) -> Result<()> {
    let mut session = open_session(ctx)?;
    let removed = session.registry_mut().delete_student(id)?;
    session.save()?;
    println!("Deleted student {} - {}", removed.account_id(), removed.full_name);
    Ok(())
}

// Professors

#[allow(clippy::too_many_arguments)]
pub fn handle_professor_add(
    ctx: &Context,
    id: u32,
    name: String,
    title: String,
    year: i32,
    levels: Vec<String>,
    categories: Vec<String>,
    json: bool,
) -> Result<()> {
    let mut session = open_session(ctx)?;
    let mut professor = Professor::new(id, name, title, year);
    professor.levels = levels;
    professor.categories = categories;
    session.registry_mut().register_professor(professor)?;
    session.save()?;

    let professor = session.registry().find_professor(id)?;
    if json {
        print_json(professor)?;
    } else {
        println!("Registered professor {} - {}", professor.employee_id(), professor.full_name);
    }
    Ok(())
}

pub fn handle_professor_list(ctx: &Context, json: bool) -> Result<()> {
    let session = open_session(ctx)?;
    let professors = session.registry().list_professors();

    if json {
        return print_json(professors);
    }
    if professors.is_empty() {
        println!("No professors registered.");
    }
    for professor in professors {
        println!("{}", format_professor(professor));
    }
    Ok(())
}

pub fn handle_professor_get(ctx: &Context, id: u32, json: bool) -> Result<()> {
    let session = open_session(ctx)?;
    let registry = session.registry();
    let professor = registry.find_professor(id)?;

    if json {
        return print_json(professor);
    }
    println!("{}", format_professor(professor));
    for course in registry.courses_taught_by(id) {
        println!("  - {} {}", course.id(), course.name());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_professor_update(
    ctx: &Context,
    id: u32,
    name: Option<String>,
    title: Option<String>,
    year: Option<i32>,
    levels: Option<Vec<String>>,
    categories: Option<Vec<String>>,
    json: bool,
) -> Result<()> {
    let mut session = open_session(ctx)?;
    let update = ProfessorUpdate {
        full_name: name,
        levels,
        categories,
        title,
        title_year: year,
    };
    let professor = session.registry_mut().update_professor(id, update)?.clone();
    session.save()?;

    if json {
        print_json(&professor)?;
    } else {
        println!("Updated professor {}", format_professor(&professor).trim_start());
    }
    Ok(())
}

pub fn handle_professor_delete(ctx: &Context, id: u32) -> Result<()> {
    let mut session = open_session(ctx)?;
    let removed = session.registry_mut().delete_professor(id)?;
    session.save()?;
    println!("Deleted professor {} - {}", removed.employee_id(), removed.full_name);
    Ok(())
}

// Courses

#[allow(clippy::too_many_arguments)]
pub fn handle_course_add(
    ctx: &Context,
    id: u32,
    name: String,
    category: String,
    level: String,
    schedule: String,
    platform: String,
    max_students: u32,
    description: String,
    dates: CourseDates,
    json: bool,
) -> Result<()> {
    let window = parse_window(dates)?.ok_or_else(|| {
        AulaError::InvalidData(
            "a course needs --enroll-open, --enroll-close, --start and --end".to_string(),
        )
    })?;
    let course = Course::new(CourseDraft {
        id,
        name,
        category,
        level,
        schedule,
        platform,
        max_students,
        description,
        window,
    })?;

    let mut session = open_session(ctx)?;
    session.registry_mut().register_course(course.clone())?;
    session.save()?;

    if json {
        print_json(&course)?;
    } else {
        println!("Registered course {} - {}", course.id(), course.name());
    }
    Ok(())
}

pub fn handle_course_list(ctx: &Context, json: bool) -> Result<()> {
    let session = open_session(ctx)?;
    let courses = session.registry().list_courses();

    if json {
        return print_json(courses);
    }
    if courses.is_empty() {
        println!("No courses registered.");
    }
    for course in courses {
        println!("{}", format_course(course));
    }
    Ok(())
}

pub fn handle_course_get(ctx: &Context, id: u32, json: bool) -> Result<()> {
    let session = open_session(ctx)?;
    let course = session.registry().find_course(id)?;

    if json {
        return print_json(course);
    }
    let window = course.window();
    println!("{}", format_course(course));
    println!("  enrollment: {} to {}", window.enroll_open, window.enroll_close);
    println!("  classes:    {} to {}", window.start, window.end);
    println!("  status:     {}", course_status(course, ctx.today));
    if !course.description().is_empty() {
        println!("  {}", course.description());
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_course_update(
    ctx: &Context,
    id: u32,
    name: Option<String>,
    category: Option<String>,
    level: Option<String>,
    schedule: Option<String>,
    platform: Option<String>,
    description: Option<String>,
    dates: CourseDates,
    json: bool,
) -> Result<()> {
    let update = CourseUpdate {
        name,
        category,
        level,
        schedule,
        platform,
        description,
        window: parse_window(dates)?,
    };
    if update.is_empty() {
        return Err(AulaError::InvalidData("nothing to update".to_string()));
    }

    let mut session = open_session(ctx)?;
    let course = session
        .registry_mut()
        .update_course(id, update, ctx.today)?
        .clone();
    session.save()?;

    if json {
        print_json(&course)?;
    } else {
        println!("Updated course {}", format_course(&course).trim_start());
    }
    Ok(())
}

pub fn handle_course_delete(ctx: &Context, id: u32) -> Result<()> {
    let mut session = open_session(ctx)?;
    let removed = session.registry_mut().delete_course(id, ctx.today)?;
    session.save()?;
    println!("Deleted course {} - {}", removed.id(), removed.name());
    Ok(())
}

pub fn handle_course_assign(ctx: &Context, course_id: u32, professor_id: u32) -> Result<()> {
    let mut session = open_session(ctx)?;
    session
        .registry_mut()
        .assign_professor(course_id, professor_id, ctx.today)?;
    session.save()?;
    println!("Assigned professor {} to course {}", professor_id, course_id);
    Ok(())
}

pub fn handle_course_reassign(ctx: &Context, course_id: u32, professor_id: u32) -> Result<()> {
    let mut session = open_session(ctx)?;
    session
        .registry_mut()
        .reassign_professor(course_id, professor_id, ctx.today)?;
    session.save()?;
    println!("Reassigned course {} to professor {}", course_id, professor_id);
    Ok(())
}

pub fn handle_course_enroll(ctx: &Context, course_id: u32, student_id: u32) -> Result<()> {
    let mut session = open_session(ctx)?;
    session
        .registry_mut()
        .enroll_student_in_course(course_id, student_id, ctx.today)?;
    session.save()?;
    println!("Enrolled student {} in course {}", student_id, course_id);
    Ok(())
}

pub fn handle_course_unenroll(ctx: &Context, course_id: u32, student_id: u32) -> Result<()> {
    let mut session = open_session(ctx)?;
    session
        .registry_mut()
        .unenroll_student_from_course(course_id, student_id, ctx.today)?;
    session.save()?;
    println!("Removed student {} from course {}", student_id, course_id);
    Ok(())
}

pub fn handle_course_roster(ctx: &Context, course_id: u32, json: bool) -> Result<()> {
    let session = open_session(ctx)?;
    let registry = session.registry();
    let course = registry.find_course(course_id)?;
    let students = registry.course_roster(course_id)?;

    if json {
        return print_json(&students);
    }
    println!(
        "{} - {}/{} students",
        course.name(),
        course.enrolled_count(),
        course.max_students()
    );
    for student in students {
        println!("{}", format_student(student));
    }
    Ok(())
}

// Catalogs

pub fn handle_catalog(json: bool) -> Result<()> {
    if json {
        return print_json(&serde_json::json!({
            "categories": CATEGORIES,
            "levels": LEVELS,
            "platforms": PLATFORMS,
        }));
    }
    println!("Categories: {}", CATEGORIES.join(", "));
    println!("Levels:     {}", LEVELS.join(", "));
    println!("Platforms:  {}", PLATFORMS.join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates(
        open: Option<&str>,
        close: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> CourseDates {
        CourseDates {
            enroll_open: open.map(String::from),
            enroll_close: close.map(String::from),
            start: start.map(String::from),
            end: end.map(String::from),
        }
    }

    #[test]
    fn test_parse_window_all_or_nothing() {
        assert_eq!(parse_window(dates(None, None, None, None)).unwrap(), None);

        let window = parse_window(dates(
            Some("1-3-2025"),
            Some("5-3-2025"),
            Some("6-3-2025"),
            Some("10-3-2025"),
        ))
        .unwrap()
        .unwrap();
        assert_eq!(window.start, Date::new(6, 3, 2025));

        assert!(matches!(
            parse_window(dates(Some("1-3-2025"), None, None, None)),
            Err(AulaError::InvalidData(_))
        ));
        match parse_window(dates(
            Some("x"),
            Some("5-3-2025"),
            Some("6-3-2025"),
            Some("10-3-2025"),
        )) {
            Err(AulaError::InvalidData(msg)) => assert!(msg.contains("--enroll-open")),
            other => panic!("expected invalid data, got {:?}", other),
        }
    }

    #[test]
    fn test_context_today_override() {
        let ctx = Context::new(PathBuf::from("."), Some("7-3-2025".to_string())).unwrap();
        assert_eq!(ctx.today, Date::new(7, 3, 2025));
        assert!(matches!(
            Context::new(PathBuf::from("."), Some("ayer".to_string())),
            Err(AulaError::InvalidData(_))
        ));
    }
}
