//! `registrar` CLI: check course times, convert grades, and run the
//! registration workflows against a SQLite database.
//!
//! ## Usage
//!
//! ```sh
//! # Normalize a course time
//! registrar parse "wed/mon 2:00pm-3:30pm"        # Mon/Wed 14:00-15:30
//!
//! # Check a candidate time against a schedule (exit code 1 on conflict)
//! registrar check "Wed 11:00-12:00" --against "Algorithms=Mon/Wed 10:00-11:30"
//!
//! # Convert a score
//! registrar grade 87                              # A-
//!
//! # Database workflows
//! registrar --db school.sqlite3 add-student Ada Lovelace
//! registrar --db school.sqlite3 add-course Algorithms --time "Mon/Wed 10:00-11:30"
//! registrar --db school.sqlite3 register 1 1
//! registrar --db school.sqlite3 set-grade 1 1 92
//! registrar --db school.sqlite3 timetable 1
//! ```
//!
//! The database path comes from `--db`, then `REGISTRAR_DATABASE` (a `.env`
//! file is honored), then the `--config` file, then `registrar.sqlite3`.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use course_time::timetable::slot_labels;
use course_time::{
    check_schedule_conflict, convert_score_to_grade, parse_time_spec, ConflictResult,
    ScheduleEntry, TimeSpec,
};
use registrar::{
    Actor, CourseDraft, GradeOutcome, Registrar, RegistrarConfig, SqliteStore, StaffRole,
};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "registrar",
    version,
    about = "Course time conflicts, registration and grading"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database (overrides config and environment)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log workflow decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a course time and print its canonical form
    Parse {
        time: String,
        /// Print the parsed structure as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check a candidate time against LABEL=TIME entries
    Check {
        time: String,
        #[arg(long = "against", value_name = "LABEL=TIME")]
        against: Vec<String>,
    },
    /// Convert a numeric score to a letter grade (other input passes through)
    Grade { input: String },
    /// Create the database schema
    Init,
    AddStudent {
        first_name: String,
        last_name: String,
        #[arg(long)]
        email: Option<String>,
    },
    AddStaff {
        first_name: String,
        last_name: String,
        #[arg(long)]
        email: Option<String>,
        /// teacher or admin
        #[arg(long, default_value = "teacher")]
        role: String,
    },
    AddCourse {
        name: String,
        #[arg(long)]
        teacher: Option<i64>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        time: Option<String>,
    },
    /// Replace every field of a course
    UpdateCourse {
        course_id: i64,
        name: String,
        #[arg(long)]
        teacher: Option<i64>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        time: Option<String>,
    },
    DeleteCourse { course_id: i64 },
    /// List all courses
    Courses,
    Register { student_id: i64, course_id: i64 },
    Unregister { student_id: i64, course_id: i64 },
    /// Record a grade; omit GRADE (or pass "") to clear it
    SetGrade {
        student_id: i64,
        course_id: i64,
        grade: Option<String>,
        /// Act as this teacher instead of as an admin
        #[arg(long, value_name = "STAFF_ID")]
        as_teacher: Option<i64>,
    },
    /// Show a student's grade report
    Grades {
        student_id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Render a student's weekly timetable
    Timetable { student_id: i64 },
    /// List overlapping courses in a student's schedule
    Audit { student_id: i64 },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .init();

    match &cli.command {
        Commands::Parse { time, json } => {
            let spec: TimeSpec = time
                .parse()
                .with_context(|| format!("Failed to parse course time {:?}", time))?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&spec)?);
            } else {
                println!("{}", spec);
            }
        }
        Commands::Check { time, against } => {
            let existing = against
                .iter()
                .map(|raw| parse_entry(raw))
                .collect::<Result<Vec<_>>>()?;
            match check_schedule_conflict(parse_time_spec(time).as_ref(), &existing) {
                ConflictResult::Clear => println!("clear"),
                ConflictResult::Conflict { label, time } => {
                    println!("conflict: {} ({})", label, time);
                    process::exit(1);
                }
            }
        }
        Commands::Grade { input } => println!("{}", convert_score_to_grade(input)),
        _ => run_database_command(&cli)?,
    }

    Ok(())
}

fn run_database_command(cli: &Cli) -> Result<()> {
    let registrar = open_registrar(cli)?;
    let store = registrar.store();

    match &cli.command {
        Commands::Init => println!("initialized"),
        Commands::AddStudent {
            first_name,
            last_name,
            email,
        } => {
            let id = store.add_student(first_name, last_name, email.as_deref())?;
            println!("{}", id);
        }
        Commands::AddStaff {
            first_name,
            last_name,
            email,
            role,
        } => {
            let role: StaffRole = role.parse()?;
            let id = store.add_staff(first_name, last_name, email.as_deref(), role)?;
            println!("{}", id);
        }
        Commands::AddCourse {
            name,
            teacher,
            location,
            time,
        } => {
            let id = registrar.create_course(&draft(name, *teacher, location, time))?;
            println!("{}", id);
        }
        Commands::UpdateCourse {
            course_id,
            name,
            teacher,
            location,
            time,
        } => {
            registrar.update_course(*course_id, &draft(name, *teacher, location, time))?;
            println!("updated");
        }
        Commands::DeleteCourse { course_id } => {
            registrar.delete_course(*course_id)?;
            println!("deleted");
        }
        Commands::Courses => {
            for course in store.list_courses()? {
                println!(
                    "{}\t{}\t{}\t{}",
                    course.course_id,
                    course.course_name,
                    course.time.as_deref().unwrap_or("-"),
                    course.location.as_deref().unwrap_or("-"),
                );
            }
        }
        Commands::Register {
            student_id,
            course_id,
        } => {
            registrar.register(*student_id, *course_id)?;
            println!("registered");
        }
        Commands::Unregister {
            student_id,
            course_id,
        } => {
            registrar.unregister(*student_id, *course_id)?;
            println!("unregistered");
        }
        Commands::SetGrade {
            student_id,
            course_id,
            grade,
            as_teacher,
        } => {
            let actor = as_teacher.map_or(Actor::Admin, Actor::Teacher);
            match registrar.set_grade(actor, *student_id, *course_id, grade.as_deref())? {
                GradeOutcome::Cleared => println!("cleared"),
                GradeOutcome::Recorded { letter, .. } => println!("{}", letter),
            }
        }
        Commands::Grades { student_id, json } => {
            let rows = registrar.student_grades(*student_id)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                for row in rows {
                    println!("{}\t{}", row.course_name, row.grade.as_deref().unwrap_or("-"));
                }
            }
        }
        Commands::Timetable { student_id } => {
            let placements = registrar.student_timetable(*student_id)?;
            print!("{}", render_timetable(&registrar, &placements));
        }
        Commands::Audit { student_id } => {
            let conflicts = registrar.audit_student_schedule(*student_id)?;
            if conflicts.is_empty() {
                println!("no conflicts");
            }
            for c in conflicts {
                println!(
                    "{} overlaps {} on {} ({} min)",
                    c.entry_a.label, c.entry_b.label, c.shared_days, c.overlap_minutes
                );
            }
        }
        Commands::Parse { .. } | Commands::Check { .. } | Commands::Grade { .. } => {}
    }

    Ok(())
}

fn open_registrar(cli: &Cli) -> Result<Registrar<SqliteStore>> {
    let mut config = RegistrarConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if let Some(db) = &cli.db {
        config.database = db.clone();
    }
    let store = SqliteStore::open(&config.database)
        .with_context(|| format!("Failed to open database: {}", config.database.display()))?;
    Ok(Registrar::with_config(store, &config))
}

/// Split a `LABEL=TIME` argument.
fn parse_entry(raw: &str) -> Result<ScheduleEntry> {
    let (label, time) = raw
        .split_once('=')
        .with_context(|| format!("Expected LABEL=TIME, got {:?}", raw))?;
    Ok(ScheduleEntry::new(label.trim(), Some(time.trim())))
}

fn draft(
    name: &str,
    teacher: Option<i64>,
    location: &Option<String>,
    time: &Option<String>,
) -> CourseDraft {
    CourseDraft {
        course_name: name.to_string(),
        staff_id: teacher,
        location: location.clone(),
        time: time.clone(),
    }
}

/// Plain-text grid: one row per slot, one column per day.
fn render_timetable(
    registrar: &Registrar<SqliteStore>,
    placements: &[course_time::Placement],
) -> String {
    let grid = registrar.grid();
    let columns = grid.columns();
    let width = placements
        .iter()
        .map(|p| p.label.len())
        .chain(std::iter::once(3))
        .max()
        .unwrap_or(3);

    let mut out = format!("{:>8}", "");
    for day in &columns {
        out.push_str(&format!(" | {:<width$}", day.to_string()));
    }
    out.push('\n');

    for (row, label) in slot_labels(grid).iter().enumerate() {
        out.push_str(&format!("{:>8}", label));
        for day in &columns {
            let cell = placements
                .iter()
                .find(|p| p.day == *day && (p.slot_index..p.slot_index + p.slot_span).contains(&row))
                .map_or("", |p| p.label.as_str());
            out.push_str(&format!(" | {:<width$}", cell));
        }
        out.push('\n');
    }
    out
}
