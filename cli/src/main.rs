//! askbot-setup - Deploy the Askbot Q&A forum into a Django project directory

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use askbot_commands::deployment::compat::FrameworkVersion;
use askbot_commands::deployment::messages::ABORTED;
use askbot_commands::{DatabaseEngine, SetupError};
use askbot_runtime::config::{DEFAULT_PYTHON, DJANGO_VERSION_ENV_VAR, PYTHON_ENV_VAR};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level: 0 prints nothing but prompts, higher values log more
    #[arg(short, long, value_name = "LEVEL", default_value_t = 1)]
    verbose: u8,

    /// Target directory for the installation
    #[arg(short = 'n', long)]
    dir_name: Option<PathBuf>,

    /// Database engine
    #[arg(short = 'e', long, value_enum)]
    db_engine: Option<DbEngine>,

    /// Database name
    #[arg(short = 'd', long)]
    db_name: Option<String>,

    /// Database user
    #[arg(short = 'u', long)]
    db_user: Option<String>,

    /// Database password
    #[arg(short = 'p', long)]
    db_password: Option<String>,

    /// Domain name of the forum
    #[arg(long)]
    domain: Option<String>,

    /// File whose contents are appended to the generated settings.py
    #[arg(long, value_name = "FILE")]
    append_settings: Option<PathBuf>,

    /// Never ask questions and overwrite an existing Django project
    #[arg(long)]
    force: bool,

    /// Python interpreter used to detect the installed Django
    #[arg(long, env = PYTHON_ENV_VAR, default_value = DEFAULT_PYTHON)]
    python: String,

    /// Django version to assume instead of asking the interpreter
    #[arg(long, env = DJANGO_VERSION_ENV_VAR, value_name = "MAJOR.MINOR", hide = true)]
    django_version: Option<FrameworkVersion>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DbEngine {
    /// PostgreSQL
    #[value(name = "1")]
    Postgresql,
    /// SQLite
    #[value(name = "2")]
    Sqlite,
    /// MySQL
    #[value(name = "3")]
    Mysql,
}

impl From<DbEngine> for DatabaseEngine {
    fn from(engine: DbEngine) -> Self {
        match engine {
            DbEngine::Postgresql => Self::Postgresql,
            DbEngine::Sqlite => Self::Sqlite,
            DbEngine::Mysql => Self::Mysql,
        }
    }
}

impl From<Cli> for askbot_commands::setup::SetupArgs {
    fn from(cli: Cli) -> Self {
        Self {
            verbosity: cli.verbose,
            dir_name: cli.dir_name,
            database_engine: cli.db_engine.map(Into::into),
            database_name: cli.db_name,
            database_user: cli.db_user,
            database_password: cli.db_password,
            domain_name: cli.domain,
            local_settings: cli.append_settings,
            force: cli.force,
            python: cli.python,
            framework_version: cli.django_version,
        }
    }
}

fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    }
}

/// Prints the outcome of a run and picks the exit status
fn report(result: anyhow::Result<()>, out: &mut dyn Write, err: &mut dyn Write) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if SetupError::is_abort(&e) => {
            let _ = writeln!(out, "{ABORTED}");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::debug!("setup failed: {:?}", e);
            let _ = writeln!(err, "Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_level(cli.verbose))),
        )
        .init();

    // Ctrl-C outside of a prompt; prompts report it as an interrupted read
    tokio::spawn(async {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("{ABORTED}");
            std::process::exit(1);
        }
    });

    let result = askbot_commands::setup::execute(cli.into()).await;
    report(result, &mut io::stdout(), &mut io::stderr())
}
