//! Work Tracker
//!
//! This crate tracks half-day (AM/PM) work shifts on a calendar and derives a
//! monthly working-day count and salary, applying holiday pay multipliers.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod store;
pub mod tracker;
