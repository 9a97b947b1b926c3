mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vibelog-cli", about = "Daily mood journal and year in pixels", version)]
struct Cli {
    /// Path to config.toml (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Record a mood for a day (default: today)
    Log {
        /// Grade: A, B, C, D or F
        grade: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Note text (use "-" to read from stdin); keeps the existing note when omitted
        #[arg(long)]
        note: Option<String>,
        /// Something positive about the day
        #[arg(long)]
        positive: Option<String>,
    },

    /// Show one day
    Day {
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Statistics and the full year grid
    Year {
        #[arg(long)]
        year: Option<i32>,
    },

    /// Statistics only
    Stats {
        #[arg(long)]
        year: Option<i32>,
    },

    /// Month calendar with moods
    Month {
        /// Selected date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Months before (negative) or after the selected date's month
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        offset: i32,
    },

    /// List the mood grades
    Moods,

    /// Show or update the profile
    Profile {
        /// New display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Sign in (local backend)
    Login {
        email: String,
    },

    /// Sign out (local backend)
    Logout,
}

/// Read stdin when the value is "-"
fn resolve_content(content: Option<String>) -> Option<String> {
    match content.as_deref() {
        Some("-") => {
            let mut buf = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf).ok();
            Some(buf.trim_end().to_string())
        }
        _ => content,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let config = cli.config.as_deref();

    match cli.command {
        Command::Log {
            grade,
            date,
            note,
            positive,
        } => {
            let mut app = app::App::new(config, None)?;
            commands::log::run(
                &mut app,
                &grade,
                date.as_deref(),
                resolve_content(note),
                positive,
                &cli.format,
                use_color,
            )?;
        }
        Command::Day { date } => {
            let app = app::App::new(config, None)?;
            commands::day::run(&app, date.as_deref(), &cli.format, use_color)?;
        }
        Command::Year { year } => {
            let app = app::App::new(config, year)?;
            commands::year::run(&app, true, &cli.format, use_color)?;
        }
        Command::Stats { year } => {
            let app = app::App::new(config, year)?;
            commands::year::run(&app, false, &cli.format, use_color)?;
        }
        Command::Month { date, offset } => {
            let mut app = app::App::new(config, None)?;
            commands::month::run(&mut app, date.as_deref(), offset, &cli.format, use_color)?;
        }
        Command::Moods => {
            commands::moods::run(&cli.format, use_color)?;
        }
        Command::Profile { name } => {
            let mut app = app::App::new(config, None)?;
            commands::profile::run(&mut app, name.as_deref(), &cli.format)?;
        }
        Command::Login { email } => {
            commands::auth::login(config, &email, &cli.format)?;
        }
        Command::Logout => {
            commands::auth::logout(config)?;
        }
    }

    Ok(())
}
