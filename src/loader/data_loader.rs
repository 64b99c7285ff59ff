use crate::loader::traits::ListingSource;
use crate::loader::LoadError;
use crate::models::Record;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Identifies one issued request. Only the ticket with the latest
/// generation may write loader state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub query: Option<String>,
}

/// A finished request, ready to be committed
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: Result<Vec<Record>, LoadError>,
}

/// What [`DataLoader::commit`] did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Committed {
    /// Record set replaced
    Loaded,
    /// Error state set, previous record set kept
    Failed,
    /// Request was cancelled; nothing surfaced
    Cancelled,
    /// A newer request was issued; outcome dropped
    Stale,
}

/// A request that has been issued but not yet performed.
///
/// Holds no borrow of the loader so several can exist at once. Issuing a
/// newer request cancels this one. Until its outcome is committed the
/// loader reports `loading`.
#[must_use = "the loader stays in the loading state until this fetch is run and committed"]
pub struct PendingFetch<S> {
    source: Arc<S>,
    ticket: FetchTicket,
    latest: watch::Receiver<u64>,
}

impl<S: ListingSource> PendingFetch<S> {
    pub fn ticket(&self) -> &FetchTicket {
        &self.ticket
    }

    /// Perform the fetch, resolving early with [`LoadError::Cancelled`] once
    /// a newer request is issued.
    pub async fn run(self) -> FetchOutcome {
        let PendingFetch {
            source,
            ticket,
            mut latest,
        } = self;
        let generation = ticket.generation;

        let result = tokio::select! {
            biased;
            _ = async {
                let _ = latest.wait_for(|current| *current != generation).await;
            } => Err(LoadError::Cancelled),
            result = source.fetch(ticket.query.as_deref()) => result,
        };

        FetchOutcome { ticket, result }
    }
}

/// Owns the record set and the loading/error flags around it
pub struct DataLoader<S> {
    source: Arc<S>,
    generation: watch::Sender<u64>,
    loading: bool,
    error: Option<String>,
    data: Option<Vec<Record>>,
    loaded_at: Option<DateTime<Utc>>,
}

impl<S: ListingSource> DataLoader<S> {
    pub fn new(source: S) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            source: Arc::new(source),
            generation,
            loading: false,
            error: None,
            data: None,
            loaded_at: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// `false` on a fresh loader; turns `true` at the first `begin`
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `None` until the first successful load
    pub fn data(&self) -> Option<&[Record]> {
        self.data.as_deref()
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn current_generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Issue a request: loading on, error cleared, any older request
    /// superseded.
    pub fn begin(&mut self, query: Option<&str>) -> PendingFetch<S> {
        self.loading = true;
        self.error = None;
        self.generation.send_modify(|g| *g += 1);

        let ticket = FetchTicket {
            generation: self.current_generation(),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
        };
        debug!(
            "Issued request #{} to {} source (query: {:?})",
            ticket.generation,
            self.source.source_name(),
            ticket.query
        );

        PendingFetch {
            source: Arc::clone(&self.source),
            ticket,
            latest: self.generation.subscribe(),
        }
    }

    pub fn commit(&mut self, outcome: FetchOutcome) -> Committed {
        let FetchOutcome { ticket, result } = outcome;
        let is_latest = ticket.generation == self.current_generation();

        match result {
            Err(LoadError::Cancelled) => {
                warn!("Cancelled request #{}", ticket.generation);
                if is_latest {
                    self.loading = false;
                }
                Committed::Cancelled
            }
            _ if !is_latest => {
                warn!(
                    "Discarding response for request #{}, request #{} is newer",
                    ticket.generation,
                    self.current_generation()
                );
                Committed::Stale
            }
            Ok(records) => {
                info!("Loaded {} listings", records.len());
                self.data = Some(records);
                self.loaded_at = Some(Utc::now());
                self.loading = false;
                Committed::Loaded
            }
            Err(err) => {
                warn!("Failed to load listings: {}", err);
                self.error = Some(format!("failed to load listings: {err}"));
                self.loading = false;
                Committed::Failed
            }
        }
    }

    /// Issue, perform and commit one request
    pub async fn fetch_data(&mut self, query: Option<&str>) -> Committed {
        let pending = self.begin(query);
        let outcome = pending.run().await;
        self.commit(outcome)
    }
}
