//! In-memory shift ledger for a date window.

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{DateWindow, Period, WorkShiftRecord};
use crate::store::{ShiftStore, ShiftWrite};

/// The shift records of one date window, keyed by (date, period).
///
/// When the store returns several rows for the same cell, the most
/// recently updated one is kept.
///
/// # Example
///
/// ```
/// use work_tracker::ledger::ShiftLedger;
/// use work_tracker::models::{Period, YearMonth};
/// use work_tracker::store::MemoryStore;
/// use chrono::NaiveDate;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let window = YearMonth::new(2026, 1).unwrap().window();
/// let mut ledger = ShiftLedger::load(&store, window).await;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// ledger.toggle(&store, date, Period::Morning).await.unwrap();
/// assert!(ledger.is_working(date, Period::Morning));
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftLedger {
    window: DateWindow,
    records: HashMap<(NaiveDate, Period), WorkShiftRecord>,
    available: bool,
}

impl ShiftLedger {
    /// A loaded ledger with no records.
    pub fn empty(window: DateWindow) -> Self {
        Self {
            window,
            records: HashMap::new(),
            available: true,
        }
    }

    /// An empty ledger standing in for a failed load.
    pub fn unavailable(window: DateWindow) -> Self {
        Self {
            available: false,
            ..Self::empty(window)
        }
    }

    /// Builds a ledger from raw store rows.
    ///
    /// Rows outside `window` are dropped; duplicates per cell keep the most
    /// recently updated row.
    pub fn from_records(
        window: DateWindow,
        records: impl IntoIterator<Item = WorkShiftRecord>,
    ) -> Self {
        let mut ledger = Self::empty(window);
        for record in records {
            ledger.apply(record);
        }
        ledger
    }

    /// Loads every record in `window`.
    ///
    /// A store failure is logged and yields an empty ledger flagged as
    /// unavailable rather than an error.
    pub async fn load(store: &dyn ShiftStore, window: DateWindow) -> Self {
        match store.load_shifts(window).await {
            Ok(rows) => {
                let row_count = rows.len();
                let ledger = Self::from_records(window, rows);
                info!(
                    start = %window.start,
                    end = %window.end,
                    rows = row_count,
                    cells = ledger.len(),
                    "Shift ledger loaded"
                );
                ledger
            }
            Err(err) => {
                warn!(
                    start = %window.start,
                    end = %window.end,
                    error = %err,
                    "Shift records unavailable, using empty ledger"
                );
                Self::unavailable(window)
            }
        }
    }

    /// The window this ledger covers.
    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// False when the load that produced this ledger failed.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// The record for a cell, if one exists.
    pub fn get(&self, date: NaiveDate, period: Period) -> Option<&WorkShiftRecord> {
        self.records.get(&(date, period))
    }

    /// Whether a cell is marked as worked. Cells without a record are not.
    pub fn is_working(&self, date: NaiveDate, period: Period) -> bool {
        self.get(date, period).is_some_and(|r| r.is_working)
    }

    /// All records, in no particular order.
    pub fn records(&self) -> impl Iterator<Item = &WorkShiftRecord> {
        self.records.values()
    }

    /// Number of cells with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no cell has a record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The write that toggling a cell would perform.
    ///
    /// An existing record has its flag flipped; a missing one is created as
    /// worked.
    pub fn plan_toggle(&self, date: NaiveDate, period: Period) -> ShiftWrite {
        match self.get(date, period) {
            Some(record) => ShiftWrite::Update {
                id: record.id,
                date,
                period,
                is_working: !record.is_working,
            },
            None => ShiftWrite::Insert {
                date,
                period,
                is_working: true,
            },
        }
    }

    /// Merges a loaded row into the ledger.
    ///
    /// Rows outside the window and rows older than the current record for
    /// the same cell are ignored.
    pub fn apply(&mut self, record: WorkShiftRecord) {
        if !self.window.contains(record.date) {
            debug!(date = %record.date, "Ignoring record outside ledger window");
            return;
        }
        let newer = self
            .records
            .get(&record.key())
            .is_none_or(|existing| record.supersedes(existing));
        if newer {
            self.records.insert(record.key(), record);
        }
    }

    /// Stores the row a successful write returned, replacing whatever the
    /// ledger held for that cell.
    ///
    /// Timestamps are not compared: insert and update stamps come from
    /// different clocks. Rows outside the window are ignored.
    pub fn replace(&mut self, record: WorkShiftRecord) {
        if !self.window.contains(record.date) {
            debug!(date = %record.date, "Ignoring write result outside ledger window");
            return;
        }
        self.records.insert(record.key(), record);
    }

    /// Toggles a cell and persists the change.
    ///
    /// The ledger is only updated after the store accepts the write. This is
    /// a plain read-modify-write with no version check: concurrent writers
    /// overwrite each other.
    pub async fn toggle(
        &mut self,
        store: &dyn ShiftStore,
        date: NaiveDate,
        period: Period,
    ) -> TrackerResult<WorkShiftRecord> {
        let write = self.plan_toggle(date, period);
        let record = persist(store, write).await?;
        self.replace(record.clone());
        Ok(record)
    }
}

/// Sends a planned toggle to the store, reporting any failure as `WriteRejected`.
pub(crate) async fn persist(
    store: &dyn ShiftStore,
    write: ShiftWrite,
) -> TrackerResult<WorkShiftRecord> {
    let (date, period) = (write.date(), write.period());
    match store.write_shift(write).await {
        Ok(record) => {
            info!(
                date = %record.date,
                period = %record.period,
                is_working = record.is_working,
                "Shift toggled"
            );
            Ok(record)
        }
        Err(err) => {
            warn!(date = %date, period = %period, error = %err, "Shift toggle rejected");
            Err(match err {
                TrackerError::WriteRejected { .. } => err,
                other => TrackerError::WriteRejected {
                    date,
                    period,
                    message: other.to_string(),
                },
            })
        }
    }
}
