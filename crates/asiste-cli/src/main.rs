use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use asiste_client::cache::HomeCache;
use asiste_client::client::{ApiClient, JustificationFile};
use asiste_client::config::load_config;
use asiste_client::lifecycle::SessionEvents;
use asiste_client::repo::{AttendanceRepository, AuthRepository, HomeRepository, ScheduleRepository};
use asiste_client::store::{PrefStore, SessionStore};
use asiste_client::ApiError;

#[derive(Parser)]
#[command(name = "asiste", version, about = "Employee self-service client")]
struct Cli {
    /// Path to the client config YAML
    #[arg(long, env = "ASISTE_CONFIG", default_value = "asiste-config.yaml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with DNI and password
    Login { dni: String, password: String },
    /// Discard the stored session
    Logout,
    /// Show the currently logged-in user
    Whoami,
    /// Show the active shift
    Shift {
        /// Skip the local cache and always hit the server
        #[arg(long)]
        refresh: bool,
    },
    /// Show monthly stats
    Stats {
        #[arg(long)]
        refresh: bool,
    },
    /// List attendance records for a month
    Attendance {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: i32,
    },
    /// List justification reason codes
    Reasons,
    /// File a justification for an attendance record
    Report {
        attendance_id: String,
        description: String,
        /// Reason code id (see `reasons`)
        #[arg(long)]
        reason: Option<i32>,
        /// Optional evidence file (image or PDF)
        #[arg(long)]
        file: Option<String>,
    },
    /// Show the weekly schedule
    Schedule,
    /// Change the account password
    ChangePassword { current: String, new: String },
}

struct App {
    auth: AuthRepository,
    home: HomeRepository,
    attendance: AttendanceRepository,
    schedule: ScheduleRepository,
}

impl App {
    fn build(config_path: &str) -> Result<Self> {
        let config = load_config(config_path)?;
        let prefs = PrefStore::open(&config.store_path);
        let session = SessionStore::new(prefs.clone());
        let cache = HomeCache::new(prefs.clone());
        let events = SessionEvents::new();
        let client = ApiClient::new(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        Ok(Self {
            auth: AuthRepository::new(
                client.clone(),
                session.clone(),
                cache.clone(),
                events,
            ),
            home: HomeRepository::new(client.clone(), session.clone(), cache),
            attendance: AttendanceRepository::new(client.clone(), session.clone(), prefs),
            schedule: ScheduleRepository::new(client, session),
        })
    }

    /// An auth error means the session is no longer valid server-side;
    /// drop it so the next command starts from the login screen.
    fn handle_auth_error(&self, err: &ApiError) {
        if err.is_auth_error {
            tracing::warn!("Session rejected by the server, logging out");
            self.auth.logout();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let app = App::build(&cli.config)?;

    match cli.command {
        Commands::Login { dni, password } => {
            let user = run(&app, app.auth.login(&dni, &password)).await?;
            println!("Sesión iniciada: {} ({})", user.name, user.dni);
        }
        Commands::Logout => {
            app.auth.logout();
            println!("Sesión cerrada");
        }
        Commands::Whoami => match app.auth.current_user() {
            Some(user) => println!("{} ({}) id={}", user.name, user.dni, user.id),
            None => println!("No has iniciado sesión"),
        },
        Commands::Shift { refresh } => {
            match run(&app, app.home.active_shift(refresh)).await? {
                Some(shift) => {
                    println!(
                        "Turno {} [{}]: {} - {}",
                        shift.id,
                        shift.status.as_str(),
                        shift.scheduled_start_time,
                        shift.scheduled_end_time
                    );
                    if let Some(next) = shift.next_shift_time {
                        println!("Próximo turno: {}", next);
                    }
                }
                None => println!("Sin turno activo"),
            }
        }
        Commands::Stats { refresh } => {
            let stats = run(&app, app.home.stats(refresh)).await?;
            println!(
                "Días laborados: {}  Puntualidad: {}%",
                stats.dias_laborados, stats.puntualidad
            );
        }
        Commands::Attendance { month, year } => {
            let (records, _months) = run(&app, app.attendance.records(month, year)).await?;
            for record in records {
                println!(
                    "{}  {}  {:?}  entrada={}  salida={}",
                    record.date,
                    record.scheduled_time,
                    record.status,
                    record.real_in.as_deref().unwrap_or("-"),
                    record.real_out.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Reasons => {
            let reasons = run(&app, app.attendance.justification_reasons()).await?;
            for reason in reasons {
                println!("{}: {}", reason.id, reason.description);
            }
        }
        Commands::Report {
            attendance_id,
            description,
            reason,
            file,
        } => {
            let attachment = match file {
                Some(path) => Some(read_attachment(&path)?),
                None => None,
            };
            let message = run(
                &app,
                app.attendance
                    .submit_justification(&attendance_id, &description, reason, attachment),
            )
            .await?;
            println!("{}", message);
        }
        Commands::Schedule => {
            let shifts = run(&app, app.schedule.week_schedule()).await?;
            for shift in shifts {
                let confirmed = if shift.confirmed { "confirmado" } else { "pendiente" };
                println!(
                    "{} {}  {}  {}  ({})",
                    shift.day, shift.date, shift.time, shift.shift_type, confirmed
                );
            }
        }
        Commands::ChangePassword { current, new } => {
            let message = run(&app, app.auth.change_password(&current, &new)).await?;
            println!("{}", message);
        }
    }

    Ok(())
}

/// Awaits a repository call, forcing a logout first when the server
/// rejected the session.
async fn run<T>(
    app: &App,
    operation: impl std::future::Future<Output = asiste_client::ApiResult<T>>,
) -> Result<T> {
    match operation.await {
        Ok(value) => Ok(value),
        Err(err) => {
            app.handle_auth_error(&err);
            Err(anyhow::Error::msg(err.message))
        }
    }
}

fn read_attachment(path: &str) -> Result<JustificationFile> {
    let bytes = std::fs::read(path).context(format!("Failed to read attachment: {}", path))?;
    let file_name = std::path::Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| "evidence.jpg".to_string());
    Ok(JustificationFile { file_name, bytes })
}
