//! The tracker session: selected month, loaded state and toggles.
//!
//! [`WorkTracker`] owns the currently selected month together with its
//! ledger and holiday index. Month loads are tagged with a generation
//! number so a slow load for a month the user has already navigated away
//! from never overwrites the newer selection.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::calculation::summarize_month;
use crate::calendar::{CalendarMonth, build_calendar};
use crate::config::PayConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::ledger::{HolidayIndex, ShiftLedger, persist};
use crate::models::{MonthlySummary, Period, WorkShiftRecord, YearMonth};
use crate::store::ShiftStore;

/// What happened to the result of a month load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOutcome {
    /// The load was the latest one and its result is now current.
    Applied,
    /// A newer selection started while this load was running; the result
    /// was discarded.
    Superseded,
}

/// Everything a client needs to render the selected month.
#[derive(Debug, Clone, Serialize)]
pub struct TrackerSnapshot {
    /// The selected month.
    pub year_month: YearMonth,
    /// True while the selected month is still loading.
    pub loading: bool,
    /// Currency label for the salary.
    pub currency: String,
    /// The summary of the selected month.
    pub summary: MonthlySummary,
    /// The month grid.
    pub calendar: CalendarMonth,
}

#[derive(Debug)]
struct TrackerState {
    selection: YearMonth,
    generation: u64,
    loading: bool,
    ledger: ShiftLedger,
    holidays: HolidayIndex,
}

/// A single user's view of the shift calendar.
///
/// State sits behind a `std::sync::Mutex` that is never held across an
/// `.await`; store I/O happens with the lock released.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use work_tracker::config::PayConfig;
/// use work_tracker::models::{Period, YearMonth};
/// use work_tracker::store::MemoryStore;
/// use work_tracker::tracker::WorkTracker;
/// use chrono::NaiveDate;
///
/// # #[tokio::main]
/// # async fn main() {
/// let january = YearMonth::new(2026, 1).unwrap();
/// let tracker = WorkTracker::new(Arc::new(MemoryStore::new()), PayConfig::default(), january)
///     .unwrap();
/// tracker.select(january).await;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
/// tracker.toggle(date, Period::Morning).await.unwrap();
/// tracker.toggle(date, Period::Afternoon).await.unwrap();
/// assert_eq!(tracker.summary().totals.display_working_days(), "1.0");
/// # }
/// ```
pub struct WorkTracker {
    store: Arc<dyn ShiftStore>,
    pay: PayConfig,
    daily_rate: Decimal,
    state: Mutex<TrackerState>,
}

impl std::fmt::Debug for WorkTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkTracker")
            .field("pay", &self.pay)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl WorkTracker {
    /// Creates a tracker with `initial` selected but not yet loaded.
    ///
    /// Call [`select`](Self::select) before toggling; until then the
    /// tracker reports `is_loading() == true` and rejects toggles.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` when the pay parameters do not yield a daily rate.
    pub fn new(
        store: Arc<dyn ShiftStore>,
        pay: PayConfig,
        initial: YearMonth,
    ) -> TrackerResult<Self> {
        let daily_rate = pay.daily_rate()?;
        Ok(Self {
            store,
            pay,
            daily_rate,
            state: Mutex::new(TrackerState {
                selection: initial,
                generation: 0,
                loading: true,
                ledger: ShiftLedger::empty(initial.window()),
                holidays: HolidayIndex::empty(initial.year()),
            }),
        })
    }

    fn lock_state(&self) -> MutexGuard<'_, TrackerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The backing store.
    pub fn store(&self) -> &Arc<dyn ShiftStore> {
        &self.store
    }

    /// The pay parameters.
    pub fn pay(&self) -> &PayConfig {
        &self.pay
    }

    /// The daily rate derived from the pay parameters.
    pub fn daily_rate(&self) -> Decimal {
        self.daily_rate
    }

    /// The selected month.
    pub fn selection(&self) -> YearMonth {
        self.lock_state().selection
    }

    /// True while the selected month is loading.
    pub fn is_loading(&self) -> bool {
        self.lock_state().loading
    }

    /// Selects a month and loads its records and its year's holidays.
    ///
    /// The selection changes immediately. Both loads run concurrently; if
    /// another selection starts before they finish, their result is dropped
    /// and [`LoadOutcome::Superseded`] is returned.
    pub async fn select(&self, year_month: YearMonth) -> LoadOutcome {
        let generation = {
            let mut state = self.lock_state();
            state.generation += 1;
            state.selection = year_month;
            state.loading = true;
            state.generation
        };
        debug!(%year_month, generation, "Loading month");

        let store = self.store.as_ref();
        let (ledger, holidays) = tokio::join!(
            ShiftLedger::load(store, year_month.window()),
            HolidayIndex::load(store, year_month.year()),
        );

        let mut state = self.lock_state();
        if state.generation != generation {
            debug!(
                %year_month,
                generation,
                current_generation = state.generation,
                "Discarding superseded month load"
            );
            return LoadOutcome::Superseded;
        }

        info!(
            %year_month,
            cells = ledger.len(),
            holidays = holidays.len(),
            shifts_available = ledger.is_available(),
            holidays_available = holidays.is_available(),
            "Month selected"
        );
        state.ledger = ledger;
        state.holidays = holidays;
        state.loading = false;
        LoadOutcome::Applied
    }

    /// Moves the selection one month back, wrapping across years.
    pub async fn previous_month(&self) -> LoadOutcome {
        let target = self.selection().previous();
        self.select(target).await
    }

    /// Moves the selection one month forward, wrapping across years.
    pub async fn next_month(&self) -> LoadOutcome {
        let target = self.selection().next();
        self.select(target).await
    }

    /// Toggles one half-day of the selected month and persists it.
    ///
    /// # Errors
    ///
    /// - `MonthLoading` while the selected month is loading
    /// - `DateOutsideWindow` when `date` is not in the selected month
    /// - `WriteRejected` when the store refuses the write; nothing changes locally
    pub async fn toggle(&self, date: NaiveDate, period: Period) -> TrackerResult<WorkShiftRecord> {
        let write = {
            let state = self.lock_state();
            if state.loading {
                return Err(TrackerError::MonthLoading {
                    year_month: state.selection,
                });
            }
            if !state.selection.window().contains(date) {
                warn!(%date, %period, year_month = %state.selection, "Toggle outside selected month");
                return Err(TrackerError::DateOutsideWindow {
                    date,
                    year_month: state.selection,
                });
            }
            state.ledger.plan_toggle(date, period)
        };

        let record = persist(self.store.as_ref(), write).await?;
        self.lock_state().ledger.replace(record.clone());
        Ok(record)
    }

    /// The summary of the selected month from the loaded state.
    pub fn summary(&self) -> MonthlySummary {
        let state = self.lock_state();
        summarize_month(state.selection, &state.ledger, &state.holidays, self.daily_rate)
    }

    /// The month grid of the selected month from the loaded state.
    pub fn calendar(&self) -> CalendarMonth {
        let state = self.lock_state();
        build_calendar(state.selection, &state.ledger, &state.holidays)
    }

    /// Summary, grid and loading flag of the selected month, taken under
    /// one lock so they agree with each other.
    pub fn snapshot(&self) -> TrackerSnapshot {
        let state = self.lock_state();
        TrackerSnapshot {
            year_month: state.selection,
            loading: state.loading,
            currency: self.pay.currency.clone(),
            summary: summarize_month(
                state.selection,
                &state.ledger,
                &state.holidays,
                self.daily_rate,
            ),
            calendar: build_calendar(state.selection, &state.ledger, &state.holidays),
        }
    }

    /// Loads any month and summarises it without touching the selection.
    pub async fn summarize(&self, year_month: YearMonth) -> MonthlySummary {
        let (ledger, holidays) = self.load_detached(year_month).await;
        let summary = summarize_month(year_month, &ledger, &holidays, self.daily_rate);
        info!(
            %year_month,
            total_working_days = %summary.totals.total_working_days,
            salary = %summary.totals.display_salary(),
            "Monthly summary computed"
        );
        summary
    }

    /// Loads any month and lays out its grid without touching the selection.
    pub async fn calendar_for(&self, year_month: YearMonth) -> CalendarMonth {
        let (ledger, holidays) = self.load_detached(year_month).await;
        build_calendar(year_month, &ledger, &holidays)
    }

    async fn load_detached(&self, year_month: YearMonth) -> (ShiftLedger, HolidayIndex) {
        let store = self.store.as_ref();
        tokio::join!(
            ShiftLedger::load(store, year_month.window()),
            HolidayIndex::load(store, year_month.year()),
        )
    }
}
