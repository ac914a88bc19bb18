//! `huvudbok-booking` — the boundaries the web layer talks to.
//!
//! [`Bookkeeper`] owns a ledger-store handle and the account catalog and
//! exposes strict booking plus the two SIE import operations: parse-only
//! preview and parse-and-merge.

pub mod bookkeeper;
pub mod telemetry;

pub use bookkeeper::{Bookkeeper, BookingError, ImportError, ImportSummary};
