//! In-memory implementation of [`ShiftStore`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeDelta, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{DateWindow, Holiday, WorkShiftRecord};

use super::{ShiftStore, ShiftWrite};

/// A store that keeps rows in process memory.
///
/// Failures and latency can be injected to exercise degraded loads,
/// rejected writes and out-of-order responses.
///
/// # Example
///
/// ```
/// use work_tracker::store::{MemoryStore, ShiftStore, ShiftWrite};
/// use work_tracker::models::{Period, YearMonth};
/// use chrono::NaiveDate;
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = MemoryStore::new();
/// let record = store
///     .write_shift(ShiftWrite::Insert {
///         date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///         period: Period::Morning,
///         is_working: true,
///     })
///     .await
///     .unwrap();
///
/// let window = YearMonth::new(2026, 1).unwrap().window();
/// assert_eq!(store.load_shifts(window).await.unwrap(), vec![record]);
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<WorkShiftRecord>>,
    holidays: Mutex<Vec<Holiday>>,
    load_delays: Mutex<HashMap<NaiveDate, Duration>>,
    fail_loads: AtomicBool,
    fail_writes: AtomicBool,
    load_calls: AtomicUsize,
    insert_clock_offset: Mutex<TimeDelta>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds holidays to the store.
    pub fn with_holidays(self, holidays: impl IntoIterator<Item = Holiday>) -> Self {
        lock(&self.holidays).extend(holidays);
        self
    }

    /// Adds raw shift rows, including duplicates, to the store.
    pub fn with_records(self, records: impl IntoIterator<Item = WorkShiftRecord>) -> Self {
        lock(&self.records).extend(records);
        self
    }

    /// Snapshot of every stored shift row.
    pub fn records(&self) -> Vec<WorkShiftRecord> {
        lock(&self.records).clone()
    }

    /// Makes every load fail with `DataUnavailable` while `fail` is set.
    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    /// Makes every write fail with `WriteRejected` while `fail` is set.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Delays loads whose window starts on `window_start`.
    pub fn set_load_delay(&self, window_start: NaiveDate, delay: Duration) {
        lock(&self.load_delays).insert(window_start, delay);
    }

    /// Stamps inserted rows with a clock running `offset` ahead of the one
    /// used for updates, like server-side defaults against a lagging client.
    pub fn set_insert_clock_offset(&self, offset: TimeDelta) {
        *lock(&self.insert_clock_offset) = offset;
    }

    /// Number of load calls served so far, failed ones included.
    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    async fn before_load(&self, resource: &str, window: DateWindow) -> TrackerResult<()> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        let delay = lock(&self.load_delays).get(&window.start).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(TrackerError::DataUnavailable {
                resource: resource.to_string(),
                message: "store offline".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ShiftStore for MemoryStore {
    async fn load_shifts(&self, window: DateWindow) -> TrackerResult<Vec<WorkShiftRecord>> {
        self.before_load("work_records", window).await?;
        let rows: Vec<WorkShiftRecord> = lock(&self.records)
            .iter()
            .filter(|r| window.contains(r.date))
            .cloned()
            .collect();
        debug!(rows = rows.len(), start = %window.start, end = %window.end, "Loaded shift rows");
        Ok(rows)
    }

    async fn load_holidays(&self, window: DateWindow) -> TrackerResult<Vec<Holiday>> {
        self.before_load("holidays", window).await?;
        Ok(lock(&self.holidays)
            .iter()
            .filter(|h| window.contains(h.date))
            .cloned()
            .collect())
    }

    async fn write_shift(&self, write: ShiftWrite) -> TrackerResult<WorkShiftRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TrackerError::WriteRejected {
                date: write.date(),
                period: write.period(),
                message: "store offline".to_string(),
            });
        }

        let now = Utc::now();
        let mut records = lock(&self.records);
        match write {
            ShiftWrite::Insert {
                date,
                period,
                is_working,
            } => {
                let stamped = now + *lock(&self.insert_clock_offset);
                let record = WorkShiftRecord {
                    id: Uuid::new_v4(),
                    date,
                    period,
                    is_working,
                    created_at: stamped,
                    updated_at: stamped,
                };
                records.push(record.clone());
                Ok(record)
            }
            ShiftWrite::Update {
                id,
                date,
                period,
                is_working,
            } => {
                let record = records.iter_mut().find(|r| r.id == id).ok_or_else(|| {
                    TrackerError::WriteRejected {
                        date,
                        period,
                        message: format!("no record with id {}", id),
                    }
                })?;
                record.is_working = is_working;
                record.updated_at = now;
                Ok(record.clone())
            }
        }
    }
}
