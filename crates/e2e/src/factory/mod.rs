//! Entity factories with resource tracking
//!
//! Each factory creates one kind of entity over the API, remembers the id
//! of everything it created, and can delete the lot again on request.
//! Tracking happens the moment the backend confirms creation; explicitly
//! deleting an entity through its factory releases the id again.

use parking_lot::Mutex;
use std::sync::Arc;

mod campaign;
mod trust;
mod user;

pub use campaign::{CampaignFactory, CampaignOptions};
pub use trust::{TrustConnectionFactory, TrustConnectionOptions};
pub use user::{UserFactory, UserOptions};

/// Tracked ids for one entity kind.
///
/// Cleanup works from a snapshot and untracks each id only once its
/// delete has settled, so a cleanup future dropped mid-flight leaves
/// the ids tracked.
#[derive(Clone, Default)]
pub(crate) struct Tracker {
    ids: Arc<Mutex<Vec<String>>>,
}

impl Tracker {
    pub fn track(&self, id: &str) {
        self.ids.lock().push(id.to_string());
    }

    pub fn untrack(&self, id: &str) {
        self.ids.lock().retain(|tracked| tracked != id);
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.ids.lock().clone()
    }
}

/// Outcome of a cleanup pass.
///
/// A failed delete never fails cleanup as a whole; it is counted here and
/// logged, and the remaining entities are still deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Entities deleted successfully
    pub deleted: usize,
    /// Deletes the backend refused or that failed in transit
    pub failed: usize,
}

impl CleanupReport {
    /// Fold another report into this one
    pub fn absorb(&mut self, other: CleanupReport) {
        self.deleted += other.deleted;
        self.failed += other.failed;
    }

    /// True when every delete went through
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
