//! Integration tests for the `registrar` CLI binary.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn registrar() -> Command {
    let mut cmd = Command::cargo_bin("registrar").unwrap();
    cmd.env_remove("REGISTRAR_DATABASE");
    cmd
}

/// Helper: fresh database path unique to this process and test.
fn temp_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "registrar-cli-{}-{}.sqlite3",
        std::process::id(),
        name
    ));
    let _ = std::fs::remove_file(&path);
    path
}

/// Helper: run a database command and return trimmed stdout.
fn run(db: &PathBuf, args: &[&str]) -> String {
    let output = registrar()
        .arg("--db")
        .arg(db)
        .args(args)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap().trim().to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Pure commands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn parse_prints_canonical_form() {
    registrar()
        .args(["parse", "wed/mon 2:00pm-3:30pm"])
        .assert()
        .success()
        .stdout("Mon/Wed 14:00-15:30\n");
}

#[test]
fn parse_json_lists_days_and_minutes() {
    let output = registrar()
        .args(["parse", "Tue/Thu 09:00-10:15", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["days"], serde_json::json!(["Tue", "Thu"]));
    assert_eq!(value["start_minute"], 540);
    assert_eq!(value["end_minute"], 615);
}

#[test]
fn parse_rejects_malformed_time() {
    registrar()
        .args(["parse", "sometime next week"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse course time"));
}

#[test]
fn check_reports_clear() {
    registrar()
        .args([
            "check",
            "Mon 11:30-12:30",
            "--against",
            "Algorithms=Mon/Wed 10:00-11:30",
        ])
        .assert()
        .success()
        .stdout("clear\n");
}

#[test]
fn check_reports_conflict_with_exit_code() {
    registrar()
        .args([
            "check",
            "Wed 11:00-12:00",
            "--against",
            "Databases=Tue 11:00-12:00",
            "--against",
            "Algorithms=Mon/Wed 10:00-11:30",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "conflict: Algorithms (Mon/Wed 10:00-11:30)",
        ));
}

#[test]
fn check_treats_unparseable_candidate_as_clear() {
    registrar()
        .args(["check", "TBA", "--against", "Algorithms=Mon 10:00-11:00"])
        .assert()
        .success()
        .stdout("clear\n");
}

#[test]
fn check_rejects_entry_without_label() {
    registrar()
        .args(["check", "Mon 10:00-11:00", "--against", "Mon 10:00-11:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("LABEL=TIME"));
}

#[test]
fn grade_converts_numbers_and_passes_letters() {
    registrar().args(["grade", "87"]).assert().success().stdout("A-\n");
    registrar().args(["grade", "B+"]).assert().success().stdout("B+\n");
    registrar().args(["grade", "49.9"]).assert().success().stdout("F\n");
}

// ─────────────────────────────────────────────────────────────────────────────
// Database workflows
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn registration_workflow_end_to_end() {
    let db = temp_db("workflow");

    assert_eq!(run(&db, &["init"]), "initialized");
    let student = run(&db, &["add-student", "Ada", "Lovelace"]);
    let teacher = run(&db, &["add-staff", "Grace", "Hopper"]);
    let algo = run(
        &db,
        &[
            "add-course",
            "Algorithms",
            "--teacher",
            &teacher,
            "--time",
            "mon/wed 10:00-11:30",
        ],
    );
    let databases = run(&db, &["add-course", "Databases", "--time", "Wed 11:00-12:00"]);

    assert!(run(&db, &["courses"]).contains("Mon/Wed 10:00-11:30"));
    assert_eq!(run(&db, &["register", &student, &algo]), "registered");

    registrar()
        .arg("--db")
        .arg(&db)
        .args(["register", student.as_str(), databases.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("conflicts with \"Algorithms\""));

    assert_eq!(
        run(&db, &["set-grade", &student, &algo, "92", "--as-teacher", &teacher]),
        "A"
    );
    assert_eq!(run(&db, &["grades", &student]), "Algorithms\tA");

    let timetable = run(&db, &["timetable", &student]);
    assert!(timetable.contains("10:00 AM"));
    assert!(timetable.contains("Algorithms"));

    assert_eq!(run(&db, &["audit", &student]), "no conflicts");
    assert_eq!(run(&db, &["set-grade", &student, &algo]), "cleared");
    assert_eq!(run(&db, &["unregister", &student, &algo]), "unregistered");

    let _ = std::fs::remove_file(&db);
}

#[test]
fn teacher_cannot_be_double_booked() {
    let db = temp_db("double-booked");
    let teacher = run(&db, &["add-staff", "Grace", "Hopper"]);
    run(
        &db,
        &["add-course", "Algorithms", "--teacher", &teacher, "--time", "Mon 10:00-11:00"],
    );

    registrar()
        .arg("--db")
        .arg(&db)
        .args([
            "add-course",
            "Compilers",
            "--teacher",
            teacher.as_str(),
            "--time",
            "Mon 10:30-11:30",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Time conflict"));

    let _ = std::fs::remove_file(&db);
}

#[test]
fn other_teacher_cannot_grade() {
    let db = temp_db("other-teacher");
    let student = run(&db, &["add-student", "Ada", "Lovelace"]);
    let owner = run(&db, &["add-staff", "Grace", "Hopper"]);
    let other = run(&db, &["add-staff", "Alan", "Turing"]);
    let course = run(&db, &["add-course", "Algorithms", "--teacher", &owner]);
    run(&db, &["register", &student, &course]);

    registrar()
        .arg("--db")
        .arg(&db)
        .args([
            "set-grade",
            student.as_str(),
            course.as_str(),
            "90",
            "--as-teacher",
            other.as_str(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not teach"));

    let _ = std::fs::remove_file(&db);
}

#[test]
fn unknown_staff_role_is_rejected() {
    let db = temp_db("bad-role");
    registrar()
        .arg("--db")
        .arg(&db)
        .args(["add-staff", "Root", "User", "--role", "janitor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown staff role"));

    let _ = std::fs::remove_file(&db);
}

#[test]
fn database_path_can_come_from_environment() {
    let db = temp_db("from-env");
    registrar()
        .env("REGISTRAR_DATABASE", &db)
        .args(["add-student", "Ada", "Lovelace"])
        .assert()
        .success()
        .stdout("1\n");
    assert!(db.exists());

    let _ = std::fs::remove_file(&db);
}

#[test]
fn config_file_supplies_timetable_grid() {
    let db = temp_db("config");
    let config = db.with_extension("json");
    std::fs::write(
        &config,
        r#"{"timetable": {"first_minute": 540, "last_minute": 600, "slot_minutes": 60}}"#,
    )
    .unwrap();

    let student = run(&db, &["add-student", "Ada", "Lovelace"]);
    let timetable = registrar()
        .arg("--db")
        .arg(&db)
        .arg("--config")
        .arg(&config)
        .args(["timetable", student.as_str()])
        .output()
        .unwrap();
    assert!(timetable.status.success());
    let text = String::from_utf8(timetable.stdout).unwrap();
    assert!(text.contains("9:00 AM"));
    assert!(!text.contains("10:00 AM"));

    let _ = std::fs::remove_file(&config);
    let _ = std::fs::remove_file(&db);
}
