mod commands;
mod handlers;

pub use commands::{
    Cli, CourseAction, CourseCommand, CourseDates, Commands, ProfessorAction, ProfessorCommand,
    StudentAction, StudentCommand,
};
pub use handlers::{
    handle_catalog, handle_course_add, handle_course_assign, handle_course_delete,
    handle_course_enroll, handle_course_get, handle_course_list, handle_course_reassign,
    handle_course_roster, handle_course_unenroll, handle_course_update, handle_professor_add,
    handle_professor_delete, handle_professor_get, handle_professor_list, handle_professor_update,
    handle_student_add, handle_student_delete, handle_student_get, handle_student_list,
    handle_student_update, Context,
};
