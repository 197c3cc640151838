//! Mission Archive collaborator interface.
//!
//! The simulator never persists anything itself; completed missions are
//! handed to an implementation of [`MissionArchive`] exactly once. Archive
//! failures are non-fatal to the simulation result.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

/// Snapshot persisted for one completed mission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRecord {
    pub target_id: String,
    pub base_id: String,
    pub target_country: String,
    pub target_city: String,
    pub base_name: String,
    pub status: String,
    pub duration_seconds: u64,
    pub log: Vec<String>,
}

/// Trait for abstracting mission persistence.
/// Platform-specific implementations should provide this.
pub trait MissionArchive {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist a completed mission record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be stored.
    fn record_mission(&self, record: &MissionRecord) -> Result<(), Self::Error>;

    /// Mark the target's catalog record as captured after a success status.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be updated.
    fn mark_captured(&self, target_id: &str) -> Result<(), Self::Error>;
}

/// In-memory archive for tests and the headless tester.
#[derive(Debug, Clone, Default)]
pub struct MemoryArchive {
    records: Rc<RefCell<Vec<MissionRecord>>>,
    captured: Rc<RefCell<Vec<String>>>,
}

impl MemoryArchive {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn records(&self) -> Vec<MissionRecord> {
        self.records.borrow().clone()
    }

    #[must_use]
    pub fn captured_targets(&self) -> Vec<String> {
        self.captured.borrow().clone()
    }
}

impl MissionArchive for MemoryArchive {
    type Error = Infallible;

    fn record_mission(&self, record: &MissionRecord) -> Result<(), Self::Error> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }

    fn mark_captured(&self, target_id: &str) -> Result<(), Self::Error> {
        self.captured.borrow_mut().push(target_id.to_string());
        Ok(())
    }
}
