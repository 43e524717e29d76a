//! Concurrent annotation collection
//!
//! Fans a loader out over every enumerated unit file and fans the outcomes
//! back in through a single completion channel. Files without valid
//! annotations are left out of the listing; only enumeration failure fails
//! the whole call.

mod config;
mod listing;

pub use config::CollectorConfig;
pub use listing::{SkipKind, SkippedUnit, UnitListing};

use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

use crate::annotations::{load_annotated_unit, Annotations, LoadError};
use crate::enumerate::{EnumerateError, UnitEnumerator, UnitFile};

#[derive(Debug, thiserror::Error)]
pub enum CollectorError {
    #[error("Failed to enumerate unit files: {0}")]
    Enumeration(#[from] EnumerateError),

    #[error("Cancelled before unit files were enumerated")]
    Cancelled,
}

/// Loads the annotations of one unit file
pub trait UnitLoader: Send + Sync + 'static {
    fn load(&self, path: &Path) -> impl Future<Output = Result<Annotations, LoadError>> + Send;
}

/// Reads unit files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FileLoader;

impl UnitLoader for FileLoader {
    async fn load(&self, path: &Path) -> Result<Annotations, LoadError> {
        load_annotated_unit(path).await
    }
}

/// One task's result, published on the completion channel
struct Outcome {
    file: UnitFile,
    result: Result<Annotations, LoadError>,
}

pub struct Collector<E, L = FileLoader> {
    enumerator: E,
    loader: Arc<L>,
    config: CollectorConfig,
}

impl<E: UnitEnumerator> Collector<E> {
    pub fn new(enumerator: E) -> Self {
        Self::with_loader(enumerator, FileLoader)
    }
}

impl<E: UnitEnumerator, L: UnitLoader> Collector<E, L> {
    pub fn with_loader(enumerator: E, loader: L) -> Self {
        Self {
            enumerator,
            loader: Arc::new(loader),
            config: CollectorConfig::default(),
        }
    }

    pub fn config(mut self, config: CollectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Collect annotations for every unit file the enumerator reports
    pub async fn list_units(&self) -> Result<UnitListing, CollectorError> {
        self.list_units_with_cancel(CancellationToken::new()).await
    }

    /// Like [`Collector::list_units`], aborting in-flight reads once `cancel` fires.
    ///
    /// Cancelled reads still report in, so the call always returns.
    pub async fn list_units_with_cancel(
        &self,
        cancel: CancellationToken,
    ) -> Result<UnitListing, CollectorError> {
        let files = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(CollectorError::Cancelled),
            files = self.enumerator.list_unit_files() => files?,
        };

        let files: Vec<UnitFile> = files
            .into_iter()
            .filter(|f| self.config.accepts(f))
            .collect();
        let dispatched = files.len();
        log::debug!("Dispatching {} unit files", dispatched);

        // Every task sends exactly once, so a buffer of `dispatched` never blocks
        let (tx, mut rx) = mpsc::channel::<Outcome>(dispatched.max(1));
        // A zero-permit semaphore would park every task forever
        let permits = self
            .config
            .max_concurrency
            .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

        for file in files {
            let tx = tx.clone();
            let loader = Arc::clone(&self.loader);
            let permits = permits.clone();
            let cancel = cancel.clone();
            let read_timeout = self.config.read_timeout;

            tokio::spawn(async move {
                let result =
                    load_unit(loader.as_ref(), &file.path, permits, read_timeout, &cancel).await;
                let _ = tx.send(Outcome { file, result }).await;
            });
        }
        drop(tx);

        let mut listing = UnitListing::default();
        let mut received = 0;
        while received < dispatched {
            let Some(outcome) = rx.recv().await else {
                // All senders gone early: a task panicked before reporting
                log::error!(
                    "Lost {} of {} unit results",
                    dispatched - received,
                    dispatched
                );
                break;
            };
            received += 1;

            match outcome.result {
                Ok(annotations) => listing.units.push(annotations),
                Err(e) => {
                    if e.is_unannotated() {
                        log::debug!("Skipping {}: {}", outcome.file.path.display(), e);
                    } else {
                        log::warn!("Skipping {}: {}", outcome.file.path.display(), e);
                    }
                    listing.skipped.push(SkippedUnit::new(outcome.file, &e));
                }
            }
        }

        log::info!(
            "Collected {} annotated units ({} skipped)",
            listing.units.len(),
            listing.skipped.len()
        );
        Ok(listing)
    }
}

/// Run one load under the concurrency permit, timeout and cancellation token
async fn load_unit<L: UnitLoader>(
    loader: &L,
    path: &Path,
    permits: Option<Arc<Semaphore>>,
    read_timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> Result<Annotations, LoadError> {
    let cancelled_error = || LoadError::Cancelled {
        path: path.to_path_buf(),
    };

    let _permit = match permits {
        Some(semaphore) => tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled_error()),
            permit = semaphore.acquire_owned() => Some(permit.map_err(|_| cancelled_error())?),
        },
        None => None,
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(cancelled_error()),
        result = load_with_timeout(loader, path, read_timeout) => result,
    }
}

async fn load_with_timeout<L: UnitLoader>(
    loader: &L,
    path: &Path,
    read_timeout: Option<Duration>,
) -> Result<Annotations, LoadError> {
    match read_timeout {
        Some(limit) => tokio::time::timeout(limit, loader.load(path))
            .await
            .unwrap_or_else(|_| {
                Err(LoadError::TimedOut {
                    path: path.to_path_buf(),
                })
            }),
        None => loader.load(path).await,
    }
}
