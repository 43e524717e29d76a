mod commands;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use dnotations::output::OutputFormat;

use commands::{ListOptions, Source};

#[derive(Parser)]
#[command(name = "dnotations")]
#[command(about = "Query metadata annotations in systemd unit file headers")]
struct Args {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List annotations of all unit files
    List {
        /// Query the user service manager instead of the system one
        #[arg(long, env = "DNOTATIONS_USER")]
        user: bool,

        /// Where unit files come from
        #[arg(long, value_enum, default_value_t = Source::Auto, env = "DNOTATIONS_SOURCE")]
        source: Source,

        /// Scan this directory instead of the default search paths (implies --source dirs)
        #[arg(long = "unit-dir")]
        unit_dirs: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Maximum number of unit files read at once
        #[arg(short, long, env = "DNOTATIONS_JOBS")]
        jobs: Option<usize>,

        /// Per-file read timeout in seconds
        #[arg(long, env = "DNOTATIONS_TIMEOUT")]
        timeout: Option<f64>,

        /// Only include unit files whose name matches this glob (e.g. "*.service")
        #[arg(short, long)]
        pattern: Option<String>,

        /// Keep completion order instead of sorting
        #[arg(long)]
        unsorted: bool,

        /// Also report unit files that were skipped
        #[arg(long)]
        show_skipped: bool,
    },

    /// Show the annotations of a single unit file
    Parse {
        /// Path to the unit file
        path: PathBuf,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // stdout carries the listing; keep logs on stderr and quiet by default
    let default_filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match args.command {
        Command::List {
            user,
            source,
            unit_dirs,
            format,
            jobs,
            timeout,
            pattern,
            unsorted,
            show_skipped,
        } => {
            let options = ListOptions {
                user,
                source,
                unit_dirs,
                format,
                jobs,
                timeout,
                pattern,
                sorted: !unsorted,
                show_skipped,
            };
            commands::list(options).await?;
        }
        Command::Parse { path, format } => {
            commands::parse(&path, format).await?;
        }
    }

    Ok(())
}
