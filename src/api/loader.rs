//! Existing-allocation loader
//!
//! Fetches run on a worker thread. Every request gets a generation number
//! and only the most recently issued one may apply its result; anything
//! older, or anything issued before `invalidate`, is dropped on arrival.

use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use crate::error::StaffingResult;
use crate::models::{AllocationRow, Matricule};

use super::backend::AllocationBackend;

/// Result of one fetch, tagged with the generation that issued it
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub generation: u64,
    pub matricule: Matricule,
    pub result: StaffingResult<Vec<AllocationRow>>,
}

/// Issues fetches and decides which results are still wanted
pub struct RepartitionLoader {
    backend: Arc<dyn AllocationBackend>,
    generation: u64,
    pending: Option<u64>,
}

impl RepartitionLoader {
    pub fn new(backend: Arc<dyn AllocationBackend>) -> Self {
        Self {
            backend,
            generation: 0,
            pending: None,
        }
    }

    /// Start fetching on a worker thread; `notify` receives the outcome
    ///
    /// Returns the generation of the new request, which supersedes all
    /// earlier ones.
    pub fn request<F>(&mut self, matricule: Matricule, notify: F) -> u64
    where
        F: FnOnce(LoadOutcome) + Send + 'static,
    {
        self.generation += 1;
        let generation = self.generation;
        self.pending = Some(generation);

        let backend = Arc::clone(&self.backend);
        debug!(%matricule, generation, "loading secondary allocations");

        thread::spawn(move || {
            let result = backend.fetch_repartitions(&matricule);
            notify(LoadOutcome {
                generation,
                matricule,
                result,
            });
        });

        generation
    }

    /// Drop interest in every request issued so far
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    /// Whether a wanted request has not reported back yet
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Take an outcome if it is the one still wanted
    ///
    /// Returns `None` for superseded outcomes.
    pub fn accept(&mut self, outcome: LoadOutcome) -> Option<StaffingResult<Vec<AllocationRow>>> {
        if self.pending != Some(outcome.generation) {
            warn!(
                matricule = %outcome.matricule,
                generation = outcome.generation,
                latest = self.generation,
                "discarding superseded allocation fetch"
            );
            return None;
        }
        self.pending = None;
        Some(outcome.result)
    }
}
