use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "aula")]
#[command(version, about = "Manage courses, professors and student enrollment")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the data files and aula.toml
    #[arg(long, global = true, env = "AULA_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Evaluate date rules as of this day (D-M-YYYY) instead of today
    #[arg(long, global = true, value_name = "DATE")]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage students
    Student(StudentCommand),

    /// Manage professors
    Professor(ProfessorCommand),

    /// Manage courses, assignments and enrollment
    Course(CourseCommand),

    /// Show the allowed categories, levels and platforms
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct StudentCommand {
    #[command(subcommand)]
    pub action: StudentAction,
}

#[derive(Subcommand, Debug)]
pub enum StudentAction {
    /// Register a new student
    Add {
        /// Account number
        id: u32,

        /// Full name
        name: String,

        /// Age in years
        #[arg(long)]
        age: u32,

        /// School of origin
        #[arg(long)]
        school: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all students
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one student and the courses they are enrolled in
    Get {
        /// Account number
        id: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a student's details
    Update {
        /// Account number
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        school: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a student who is not enrolled anywhere
    Delete {
        /// Account number
        id: u32,
    },
}

#[derive(Args, Debug)]
pub struct ProfessorCommand {
    #[command(subcommand)]
    pub action: ProfessorAction,
}

#[derive(Subcommand, Debug)]
pub enum ProfessorAction {
    /// Register a new professor
    Add {
        /// Employee number
        id: u32,

        /// Full name
        name: String,

        /// Degree title
        #[arg(long)]
        title: String,

        /// Year the degree was obtained
        #[arg(long)]
        year: i32,

        /// Levels taught (repeat or comma-separate)
        #[arg(long = "level", short = 'l', value_delimiter = ',')]
        levels: Vec<String>,

        /// Categories taught (repeat or comma-separate)
        #[arg(long = "category", short = 'c', value_delimiter = ',')]
        categories: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all professors
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one professor and their courses
    Get {
        /// Employee number
        id: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a professor's details
    Update {
        /// Employee number
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        year: Option<i32>,

        /// Replace the levels taught
        #[arg(long = "level", short = 'l', value_delimiter = ',')]
        levels: Option<Vec<String>>,

        /// Replace the categories taught
        #[arg(long = "category", short = 'c', value_delimiter = ',')]
        categories: Option<Vec<String>>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a professor with no course assignment
    Delete {
        /// Employee number
        id: u32,
    },
}

#[derive(Args, Debug)]
pub struct CourseCommand {
    #[command(subcommand)]
    pub action: CourseAction,
}

/// The four course dates, all D-M-YYYY.
#[derive(Args, Debug)]
pub struct CourseDates {
    /// First day of enrollment
    #[arg(long)]
    pub enroll_open: Option<String>,

    /// Last day of enrollment
    #[arg(long)]
    pub enroll_close: Option<String>,

    /// First day of classes
    #[arg(long)]
    pub start: Option<String>,

    /// Last day of classes
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CourseAction {
    /// Register a new course
    Add {
        /// Course id
        id: u32,

        /// Course name
        name: String,

        #[arg(long)]
        category: String,

        #[arg(long)]
        level: String,

        /// Schedule as HH:MM-HH:MM between 7 and 21
        #[arg(long)]
        schedule: String,

        #[arg(long)]
        platform: String,

        /// Maximum number of students
        #[arg(long = "max")]
        max_students: u32,

        #[arg(long, default_value = "")]
        description: String,

        #[command(flatten)]
        dates: CourseDates,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all courses
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one course
    Get {
        /// Course id
        id: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit a course (outside its class period, more than 3 students)
    Update {
        /// Course id
        id: u32,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        level: Option<String>,

        #[arg(long)]
        schedule: Option<String>,

        #[arg(long)]
        platform: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Dates must be given all four together
        #[command(flatten)]
        dates: CourseDates,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a course with no students or one that has ended
    Delete {
        /// Course id
        id: u32,
    },

    /// Assign a professor to a course that has none
    Assign {
        course_id: u32,
        professor_id: u32,
    },

    /// Replace the professor of a course
    Reassign {
        course_id: u32,
        professor_id: u32,
    },

    /// Enroll a student in a course
    Enroll {
        course_id: u32,
        student_id: u32,
    },

    /// Remove a student from a course
    Unenroll {
        course_id: u32,
        student_id: u32,
    },

    /// List the students enrolled in a course
    Roster {
        course_id: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
