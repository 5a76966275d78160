//! Offline-tolerant caching decorator for any [`ShiftStore`].

use std::collections::HashMap;
use std::future::Future;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::error::TrackerResult;
use crate::models::{DateWindow, Holiday, WorkShiftRecord};

use super::{ShiftStore, ShiftWrite};

/// Network-first cache in front of another store.
///
/// Every successful load is remembered per query window. When the inner
/// store fails, the last good response for the same window is served
/// instead; callers cannot tell the two apart. Writes are never cached.
#[derive(Debug)]
pub struct CachedStore<S> {
    inner: S,
    shifts: RwLock<HashMap<DateWindow, Vec<WorkShiftRecord>>>,
    holidays: RwLock<HashMap<DateWindow, Vec<Holiday>>>,
}

impl<S: ShiftStore> CachedStore<S> {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            shifts: RwLock::new(HashMap::new()),
            holidays: RwLock::new(HashMap::new()),
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Drops every cached response.
    pub async fn clear(&self) {
        self.shifts.write().await.clear();
        self.holidays.write().await.clear();
    }
}

async fn network_first<T, F>(
    cache: &RwLock<HashMap<DateWindow, Vec<T>>>,
    resource: &str,
    window: DateWindow,
    fetch: F,
) -> TrackerResult<Vec<T>>
where
    T: Clone,
    F: Future<Output = TrackerResult<Vec<T>>>,
{
    match fetch.await {
        Ok(rows) => {
            cache.write().await.insert(window, rows.clone());
            Ok(rows)
        }
        Err(err) => match cache.read().await.get(&window) {
            Some(rows) => {
                info!(
                    resource,
                    start = %window.start,
                    end = %window.end,
                    error = %err,
                    "Serving cached rows while store is unavailable"
                );
                Ok(rows.clone())
            }
            None => Err(err),
        },
    }
}

#[async_trait]
impl<S: ShiftStore> ShiftStore for CachedStore<S> {
    async fn load_shifts(&self, window: DateWindow) -> TrackerResult<Vec<WorkShiftRecord>> {
        network_first(
            &self.shifts,
            "work_records",
            window,
            self.inner.load_shifts(window),
        )
        .await
    }

    async fn load_holidays(&self, window: DateWindow) -> TrackerResult<Vec<Holiday>> {
        network_first(
            &self.holidays,
            "holidays",
            window,
            self.inner.load_holidays(window),
        )
        .await
    }

    async fn write_shift(&self, write: ShiftWrite) -> TrackerResult<WorkShiftRecord> {
        self.inner.write_shift(write).await
    }
}
