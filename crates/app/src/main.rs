use std::fmt;

use course_core::model::{AreaOfInterest, LoginDraft, RegistrationDraft};
use services::{AppServices, AuthError, CourseSnapshot, LookupMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidArea { raw: String },
    InvalidLesson { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidArea { raw } => {
                write!(f, "invalid --area value (expected ia, cloud or quantum): {raw}")
            }
            ArgsError::InvalidLesson { raw } => {
                write!(f, "invalid --complete value (expected <module>:<lesson>): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- register --name <n> --email <e> --password <p> [--confirm <p>] [--area <ia|cloud|quantum>]");
    eprintln!("  cargo run -p app -- login    --email <e> --password <p>");
    eprintln!("  cargo run -p app -- profile");
    eprintln!("  cargo run -p app -- course   [--complete <module>:<lesson>]... [--strict]");
    eprintln!();
    eprintln!("Common options:");
    eprintln!("  --db <sqlite_url>   (default sqlite://course.sqlite3)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  COURSE_DB_URL, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Register,
    Login,
    Profile,
    Course,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "register" => Some(Self::Register),
            "login" => Some(Self::Login),
            "profile" => Some(Self::Profile),
            "course" => Some(Self::Course),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    db_url: String,
    mode: LookupMode,
    name: String,
    email: String,
    password: String,
    confirm: Option<String>,
    area: Option<AreaOfInterest>,
    complete: Vec<(String, String)>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self {
            db_url: std::env::var("COURSE_DB_URL")
                .ok()
                .map_or_else(|| "sqlite://course.sqlite3".into(), normalize_sqlite_url),
            ..Self::default()
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    parsed.db_url = normalize_sqlite_url(value);
                }
                "--strict" => parsed.mode = LookupMode::Strict,
                "--name" => parsed.name = require_value(args, "--name")?,
                "--email" => parsed.email = require_value(args, "--email")?,
                "--password" => parsed.password = require_value(args, "--password")?,
                "--confirm" => parsed.confirm = Some(require_value(args, "--confirm")?),
                "--area" => {
                    let value = require_value(args, "--area")?;
                    parsed.area = AreaOfInterest::parse_optional(&value)
                        .map_err(|_| ArgsError::InvalidArea { raw: value.clone() })?;
                }
                "--complete" => {
                    let value = require_value(args, "--complete")?;
                    let (module_id, lesson_id) = value
                        .split_once(':')
                        .ok_or_else(|| ArgsError::InvalidLesson { raw: value.clone() })?;
                    parsed
                        .complete
                        .push((module_id.to_string(), lesson_id.to_string()));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_course(snapshot: &CourseSnapshot) {
    println!(
        "status: {} ({}%, {}/{} lessons)",
        snapshot.status.label(),
        snapshot.percent,
        snapshot.completed_lessons,
        snapshot.total_lessons
    );
    for module in &snapshot.modules {
        println!(
            "{} [{}/{}]",
            module.title(),
            module.completed_count(),
            module.lesson_count()
        );
        for lesson in module.lessons() {
            let mark = if lesson.is_done() { "x" } else { " " };
            println!("  [{mark}] {} {}", lesson.id(), lesson.title());
        }
    }
    if snapshot.finished {
        println!("certificate available");
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);

    let cmd = match argv.next() {
        None => {
            print_usage();
            return Ok(());
        }
        Some(first) if first == "--help" || first == "-h" => {
            print_usage();
            return Ok(());
        }
        Some(first) => Command::from_arg(&first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let app = AppServices::new_sqlite(&parsed.db_url, parsed.mode).await?;
    info!(db = %parsed.db_url, command = ?cmd, "starting");

    match cmd {
        Command::Register => {
            let draft = RegistrationDraft {
                confirm_password: parsed.confirm.unwrap_or_else(|| parsed.password.clone()),
                name: parsed.name,
                email: parsed.email,
                password: parsed.password,
                area: parsed.area,
            };
            let record = app.profiles().register(draft).await?;
            println!("account created for {}", record.email());
        }
        Command::Login => {
            let draft = LoginDraft::new(parsed.email, parsed.password);
            match app.profiles().login(&draft).await {
                Ok(record) => println!("welcome, {}", record.name()),
                Err(AuthError::NoSuchUser) => {
                    println!("no user found; register an account first");
                }
                Err(AuthError::InvalidCredentials) => println!("incorrect email or password"),
                Err(err) => return Err(err.into()),
            }
        }
        Command::Profile => match app.profiles().load().await? {
            Some(record) => {
                println!("name:  {}", record.name());
                println!("email: {}", record.email());
                println!(
                    "area:  {}",
                    record.area().map_or("-", AreaOfInterest::label)
                );
            }
            None => println!("no profile stored"),
        },
        Command::Course => {
            // Progress lives only for this process; every run starts a fresh enrollment.
            let course = app.course();
            let mut snapshot = course.enroll();
            for (module_id, lesson_id) in &parsed.complete {
                snapshot = course.toggle_lesson(module_id, lesson_id)?;
            }
            print_course(&snapshot);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
