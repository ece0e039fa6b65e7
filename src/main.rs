use clap::Parser;
use aula::cli::{
    handle_catalog, handle_course_add, handle_course_assign, handle_course_delete,
    handle_course_enroll, handle_course_get, handle_course_list, handle_course_reassign,
    handle_course_roster, handle_course_unenroll, handle_course_update, handle_professor_add,
    handle_professor_delete, handle_professor_get, handle_professor_list, handle_professor_update,
    handle_student_add, handle_student_delete, handle_student_get, handle_student_list,
    handle_student_update, Cli, Commands, Context, CourseAction, ProfessorAction, StudentAction,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let ctx = match Context::new(cli.data_dir, cli.today) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Student(student_cmd) => match student_cmd.action {
            StudentAction::Add {
                id,
                name,
                age,
                school,
                json,
            } => handle_student_add(&ctx, id, name, age, school, json),
            StudentAction::List { json } => handle_student_list(&ctx, json),
            StudentAction::Get { id, json } => handle_student_get(&ctx, id, json),
            StudentAction::Update {
                id,
                name,
                age,
                school,
                json,
            } => handle_student_update(&ctx, id, name, age, school, json),
            StudentAction::Delete { id } => handle_student_delete(&ctx, id),
        },
        Commands::Professor(professor_cmd) => match professor_cmd.action {
            ProfessorAction::Add {
                id,
                name,
                title,
                year,
                levels,
                categories,
                json,
            } => handle_professor_add(&ctx, id, name, title, year, levels, categories, json),
            ProfessorAction::List { json } => handle_professor_list(&ctx, json),
            ProfessorAction::Get { id, json } => handle_professor_get(&ctx, id, json),
            ProfessorAction::Update {
                id,
                name,
                title,
                year,
                levels,
                categories,
                json,
            } => handle_professor_update(&ctx, id, name, title, year, levels, categories, json),
            ProfessorAction::Delete { id } => handle_professor_delete(&ctx, id),
        },
        Commands::Course(course_cmd) => match course_cmd.action {
            CourseAction::Add {
                id,
                name,
                category,
                level,
                schedule,
                platform,
                max_students,
                description,
                dates,
                json,
            } => handle_course_add(
                &ctx,
                id,
                name,
                category,
                level,
                schedule,
                platform,
                max_students,
                description,
                dates,
                json,
            ),
            CourseAction::List { json } => handle_course_list(&ctx, json),
            CourseAction::Get { id, json } => handle_course_get(&ctx, id, json),
            CourseAction::Update {
                id,
                name,
                category,
                level,
                schedule,
                platform,
                description,
                dates,
                json,
            } => handle_course_update(
                &ctx,
                id,
                name,
                category,
                level,
                schedule,
                platform,
                description,
                dates,
                json,
            ),
            CourseAction::Delete { id } => handle_course_delete(&ctx, id),
            CourseAction::Assign {
                course_id,
                professor_id,
            } => handle_course_assign(&ctx, course_id, professor_id),
            CourseAction::Reassign {
                course_id,
                professor_id,
            } => handle_course_reassign(&ctx, course_id, professor_id),
            CourseAction::Enroll {
                course_id,
                student_id,
            } => handle_course_enroll(&ctx, course_id, student_id),
            CourseAction::Unenroll {
                course_id,
                student_id,
            } => handle_course_unenroll(&ctx, course_id, student_id),
            CourseAction::Roster { course_id, json } => handle_course_roster(&ctx, course_id, json),
        },
        Commands::Catalog { json } => handle_catalog(json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
