//! Data access for shift records and holidays.
//!
//! The [`ShiftStore`] trait is the only seam between the tracker and the
//! remote record store. Implementations:
//!
//! - [`MemoryStore`]: in-process store, used by tests and demos.
//! - [`RestStore`]: PostgREST-style HTTP client for the hosted store.
//! - [`CachedStore`]: network-first decorator that serves the last good
//!   response when the wrapped store is unreachable.

mod cached;
mod memory;
mod rest;

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::TrackerResult;
use crate::models::{DateWindow, Holiday, Period, WorkShiftRecord};

pub use cached::CachedStore;
pub use memory::MemoryStore;
pub use rest::RestStore;

pub(crate) use rest::parse_base_url;

/// A single-row write against the work-shift collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShiftWrite {
    /// Create a record for a cell that has none yet.
    Insert {
        /// The date of the cell.
        date: NaiveDate,
        /// The period of the cell.
        period: Period,
        /// The initial working flag.
        is_working: bool,
    },
    /// Overwrite the working flag of an existing record.
    Update {
        /// The record to update.
        id: Uuid,
        /// The date of the cell.
        date: NaiveDate,
        /// The period of the cell.
        period: Period,
        /// The new working flag.
        is_working: bool,
    },
}

impl ShiftWrite {
    /// The date of the targeted cell.
    pub fn date(&self) -> NaiveDate {
        match self {
            ShiftWrite::Insert { date, .. } | ShiftWrite::Update { date, .. } => *date,
        }
    }

    /// The period of the targeted cell.
    pub fn period(&self) -> Period {
        match self {
            ShiftWrite::Insert { period, .. } | ShiftWrite::Update { period, .. } => *period,
        }
    }

    /// The working flag being written.
    pub fn is_working(&self) -> bool {
        match self {
            ShiftWrite::Insert { is_working, .. } | ShiftWrite::Update { is_working, .. } => {
                *is_working
            }
        }
    }
}

/// Record-store capability consumed by the ledger, the holiday index and
/// the tracker.
///
/// Loads fail with `DataUnavailable`; writes fail with `WriteRejected`.
/// Implementations never retry.
#[async_trait]
pub trait ShiftStore: Send + Sync {
    /// All shift records whose date falls inside `window`.
    async fn load_shifts(&self, window: DateWindow) -> TrackerResult<Vec<WorkShiftRecord>>;

    /// All holidays whose date falls inside `window`.
    async fn load_holidays(&self, window: DateWindow) -> TrackerResult<Vec<Holiday>>;

    /// Persists a single insert or update and returns the stored row.
    async fn write_shift(&self, write: ShiftWrite) -> TrackerResult<WorkShiftRecord>;
}
