//! In-memory calendar state feeding the aggregation.
//!
//! The [`ShiftLedger`] holds the AM/PM records of a date window and the
//! [`HolidayIndex`] holds the holidays of a year. Both are loaded from a
//! [`ShiftStore`](crate::store::ShiftStore) and degrade to empty, flagged
//! snapshots when the store is unreachable.

mod holiday_index;
mod shift_ledger;

pub use holiday_index::HolidayIndex;
pub use shift_ledger::ShiftLedger;

pub(crate) use shift_ledger::persist;
