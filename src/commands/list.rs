//! List annotated units

use std::path::PathBuf;
use std::time::Duration;

use dnotations::collector::{Collector, CollectorConfig, CollectorError, SkipKind, UnitListing};
use dnotations::enumerate::{DirectoryEnumerator, SystemdEnumerator, UnitEnumerator};
use dnotations::output::{self, OutputFormat};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Source {
    /// Ask systemd over D-Bus, scanning unit directories if the bus is unreachable
    Auto,
    /// Ask systemd over D-Bus only
    Bus,
    /// Scan unit directories on disk
    Dirs,
}

pub struct ListOptions {
    pub user: bool,
    pub source: Source,
    pub unit_dirs: Vec<PathBuf>,
    pub format: OutputFormat,
    pub jobs: Option<usize>,
    pub timeout: Option<f64>,
    pub pattern: Option<String>,
    pub sorted: bool,
    pub show_skipped: bool,
}

impl ListOptions {
    fn collector_config(&self) -> Result<CollectorConfig, Box<dyn std::error::Error>> {
        let mut config = CollectorConfig::new();
        if let Some(jobs) = self.jobs {
            config = config.max_concurrency(jobs);
        }
        if let Some(secs) = self.timeout {
            config = config.read_timeout(Duration::try_from_secs_f64(secs)?);
        }
        if let Some(pattern) = &self.pattern {
            config = config.unit_filter(glob::Pattern::new(pattern)?);
        }
        Ok(config)
    }

    fn directory_enumerator(&self) -> DirectoryEnumerator {
        if !self.unit_dirs.is_empty() {
            DirectoryEnumerator::new(self.unit_dirs.clone())
        } else if self.user {
            DirectoryEnumerator::user()
        } else {
            DirectoryEnumerator::system()
        }
    }

    fn effective_source(&self) -> Source {
        if self.unit_dirs.is_empty() {
            self.source
        } else {
            Source::Dirs
        }
    }
}

pub async fn list(options: ListOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = options.collector_config()?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling pending reads");
            interrupt.cancel();
        }
    });

    let mut listing = match options.effective_source() {
        Source::Dirs => collect(options.directory_enumerator(), config, cancel).await?,
        Source::Bus => collect_from_bus(options.user, config, cancel).await?,
        Source::Auto => {
            match collect_from_bus(options.user, config.clone(), cancel.clone()).await {
                Ok(listing) => listing,
                Err(CollectorError::Enumeration(e)) => {
                    log::warn!("Cannot list units over D-Bus ({}), scanning unit directories", e);
                    collect(options.directory_enumerator(), config, cancel).await?
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    if options.sorted {
        listing.sort();
    }

    match options.format {
        OutputFormat::Json => println!("{}", output::to_json(&listing, options.show_skipped)?),
        OutputFormat::Table => print!("{}", output::to_table(&listing, options.show_skipped)),
    }

    report_failures(&listing);
    Ok(())
}

async fn collect_from_bus(
    user: bool,
    config: CollectorConfig,
    cancel: CancellationToken,
) -> Result<UnitListing, CollectorError> {
    let enumerator = SystemdEnumerator::connect(user).await?;
    collect(enumerator, config, cancel).await
}

async fn collect<E: UnitEnumerator>(
    enumerator: E,
    config: CollectorConfig,
    cancel: CancellationToken,
) -> Result<UnitListing, CollectorError> {
    Collector::new(enumerator)
        .config(config)
        .list_units_with_cancel(cancel)
        .await
}

/// Unreadable files are left out of the listing; say so on stderr
fn report_failures(listing: &UnitListing) {
    let unreadable = listing.skipped_count(SkipKind::Unreadable);
    let timed_out = listing.skipped_count(SkipKind::TimedOut);
    let cancelled = listing.skipped_count(SkipKind::Cancelled);

    if unreadable > 0 {
        eprintln!("dnotations: {} unit files could not be read", unreadable);
    }
    if timed_out > 0 {
        eprintln!("dnotations: {} unit files timed out", timed_out);
    }
    if cancelled > 0 {
        eprintln!("dnotations: {} unit files were not read (cancelled)", cancelled);
    }
}
