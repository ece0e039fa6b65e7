use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn aula_cmd(data_dir: &Path, today: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_aula"));
    cmd.arg("--data-dir")
        .arg(data_dir)
        .args(["--today", today])
        .env_remove("AULA_DATA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

fn run(data_dir: &Path, today: &str, args: &[&str]) -> Output {
    aula_cmd(data_dir, today).args(args).output().unwrap()
}

fn run_ok(data_dir: &Path, today: &str, args: &[&str]) -> String {
    let output = run(data_dir, today, args);
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn run_err(data_dir: &Path, today: &str, args: &[&str]) -> String {
    let output = run(data_dir, today, args);
    assert!(!output.status.success(), "{:?} unexpectedly succeeded", args);
    assert_eq!(output.status.code(), Some(1));
    String::from_utf8_lossy(&output.stderr).to_string()
}

const COURSE_DATES: [&str; 8] = [
    "--enroll-open",
    "1-3-2025",
    "--enroll-close",
    "5-3-2025",
    "--start",
    "6-3-2025",
    "--end",
    "10-3-2025",
];

fn add_course(data_dir: &Path, today: &str, id: &str, max: &str) -> Output {
    let mut args = vec![
        "course",
        "add",
        id,
        "Cálculo I",
        "--category",
        "matemáticas",
        "--level",
        "Licenciatura",
        "--schedule",
        "08:00-10:00",
        "--platform",
        "Zoom",
        "--max",
        max,
    ];
    args.extend_from_slice(&COURSE_DATES);
    run(data_dir, today, &args)
}

#[test]
fn test_empty_directory_lists_nothing() {
    let tmp = TempDir::new().unwrap();

    let stdout = run_ok(tmp.path(), "1-1-2025", &["student", "list"]);
    assert!(stdout.contains("No students registered."));

    let stdout = run_ok(tmp.path(), "1-1-2025", &["course", "list", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 0);
}

#[test]
fn test_full_enrollment_workflow() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    let day = "2-3-2025";

    let output = add_course(dir, day, "101", "2");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    run_ok(dir, day, &["student", "add", "1", "Ana López", "--age", "19", "--school", "Prepa 6"]);
    run_ok(dir, day, &["student", "add", "2", "Beto Ruiz", "--age", "20", "--school", "CCH Sur"]);
    run_ok(dir, day, &["student", "add", "3", "Carla Díaz", "--age", "18", "--school", "Prepa 2"]);

    let stdout = run_ok(dir, day, &["course", "enroll", "101", "1"]);
    assert!(stdout.contains("Enrolled student 1 in course 101"));
    run_ok(dir, day, &["course", "enroll", "101", "2"]);

    let stderr = run_err(dir, day, &["course", "enroll", "101", "3"]);
    assert!(stderr.contains("is full"));

    let stderr = run_err(dir, day, &["course", "enroll", "101", "1"]);
    assert!(stderr.contains("is full") || stderr.contains("already enrolled"));

    let stdout = run_ok(dir, day, &["course", "roster", "101", "--json"]);
    let roster: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let ids: Vec<u64> = roster
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["account_id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);

    run_ok(dir, day, &["course", "unenroll", "101", "1"]);
    let stdout = run_ok(dir, day, &["student", "get", "1", "--json"]);
    let student: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(student["courses"].as_array().unwrap().len(), 0);

    // Classes have started.
    let stderr = run_err(dir, "7-3-2025", &["course", "enroll", "101", "1"]);
    assert!(stderr.contains("already started"));

    let files = fs::read_to_string(dir.join("cursos.txt")).unwrap();
    assert!(files.starts_with("101|Cálculo I|Matemáticas|Licenciatura|"));
    assert!(dir.join("alumnos.txt").exists());
    assert!(dir.join("profesores.txt").exists());
}

#[test]
fn test_enrolled_student_cannot_be_deleted() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    let day = "2-3-2025";

    assert!(add_course(dir, day, "101", "10").status.success());
    run_ok(dir, day, &["student", "add", "1", "Ana", "--age", "19", "--school", "Prepa 6"]);
    run_ok(dir, day, &["course", "enroll", "101", "1"]);

    let stderr = run_err(dir, day, &["student", "delete", "1"]);
    assert!(stderr.contains("Deletion not allowed"));

    let stderr = run_err(dir, day, &["course", "delete", "101"]);
    assert!(stderr.contains("Deletion not allowed"));

    // Once the course is over it can go, and the student is free again.
    run_ok(dir, "11-3-2025", &["course", "delete", "101"]);
    let stdout = run_ok(dir, "11-3-2025", &["student", "delete", "1"]);
    assert!(stdout.contains("Deleted student 1"));
}

#[test]
fn test_professor_assignment() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    let day = "2-3-2025";

    assert!(add_course(dir, day, "101", "10").status.success());
    run_ok(
        dir,
        day,
        &[
            "professor", "add", "7", "Laura Méndez", "--title", "Actuaria", "--year", "2010",
            "-l", "Licenciatura", "-c", "Matemáticas,Física",
        ],
    );
    run_ok(
        dir,
        day,
        &[
            "professor", "add", "8", "Raúl Soto", "--title", "Historiador", "--year", "2005",
            "-l", "Preparatoria", "-c", "Historia",
        ],
    );

    let stderr = run_err(dir, day, &["course", "assign", "101", "8"]);
    assert!(stderr.contains("cannot teach"));

    let stdout = run_ok(dir, day, &["course", "assign", "101", "7"]);
    assert!(stdout.contains("Assigned professor 7 to course 101"));

    let stderr = run_err(dir, day, &["course", "assign", "101", "7"]);
    assert!(stderr.contains("already has professor"));

    let stderr = run_err(dir, day, &["professor", "delete", "7"]);
    assert!(stderr.contains("Deletion not allowed"));

    let stderr = run_err(dir, "6-3-2025", &["course", "reassign", "101", "7"]);
    assert!(stderr.contains("Assignment rejected"));

    let stdout = run_ok(dir, day, &["course", "get", "101", "--json"]);
    let course: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(course["professor"].as_u64(), Some(7));
}

#[test]
fn test_invalid_course_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();

    let mut args = vec![
        "course", "add", "5", "Nocturno", "--category", "Otro", "--level", "Posgrado",
        "--schedule", "20:00-22:00", "--platform", "Meet", "--max", "10",
    ];
    args.extend_from_slice(&COURSE_DATES);
    let stderr = run_err(dir, "1-1-2025", &args);
    assert!(stderr.contains("Invalid data"));

    let stderr = run_err(
        dir,
        "1-1-2025",
        &[
            "course", "add", "5", "Sin fechas", "--category", "Otro", "--level", "Posgrado",
            "--schedule", "08:00-09:00", "--platform", "Meet", "--max", "10",
        ],
    );
    assert!(stderr.contains("--enroll-open"));

    assert!(!dir.join("cursos.txt").exists());
}

#[test]
fn test_missing_records_are_not_found() {
    let tmp = TempDir::new().unwrap();

    let stderr = run_err(tmp.path(), "1-1-2025", &["student", "get", "42"]);
    assert!(stderr.contains("Not found"));

    let stderr = run_err(tmp.path(), "1-1-2025", &["course", "enroll", "1", "1"]);
    assert!(stderr.contains("Not found"));
}

#[test]
fn test_malformed_data_file_is_reported_and_kept() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("alumnos.txt"), "esto no es un alumno\n").unwrap();

    let output = run(
        tmp.path(),
        "1-1-2025",
        &["professor", "add", "1", "Ana", "--title", "Lic", "--year", "2000"],
    );
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Warning: could not load students"));

    let contents = fs::read_to_string(tmp.path().join("alumnos.txt")).unwrap();
    assert_eq!(contents, "esto no es un alumno\n");
}

#[test]
fn test_bad_students_file_leaves_rosters_alone() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path();
    let day = "2-3-2025";

    assert!(add_course(dir, day, "101", "10").status.success());
    run_ok(dir, day, &["student", "add", "1", "Ana", "--age", "19", "--school", "Prepa 6"]);
    run_ok(dir, day, &["student", "add", "2", "Beto", "--age", "20", "--school", "CCH Sur"]);
    run_ok(dir, day, &["course", "enroll", "101", "1"]);
    run_ok(dir, day, &["course", "enroll", "101", "2"]);
    let courses = fs::read_to_string(dir.join("cursos.txt")).unwrap();

    fs::write(dir.join("alumnos.txt"), "1|Ana|19|Prepa 6\n2|Beto\n").unwrap();
    let output = run(
        dir,
        day,
        &["professor", "add", "7", "Laura", "--title", "Actuaria", "--year", "2010"],
    );
    assert!(output.status.success());

    assert_eq!(fs::read_to_string(dir.join("cursos.txt")).unwrap(), courses);
    assert!(courses.trim_end().ends_with("|1,2"));
}

#[test]
fn test_bad_today_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let stderr = run_err(tmp.path(), "mañana", &["student", "list"]);
    assert!(stderr.contains("Invalid data"));
    assert!(stderr.contains("--today"));
}

#[test]
fn test_catalog_json() {
    let tmp = TempDir::new().unwrap();
    let stdout = run_ok(tmp.path(), "1-1-2025", &["catalog", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["levels"].as_array().unwrap().len(), 3);
    assert_eq!(parsed["platforms"][1], "Zoom");
}
