//! Progress tracking and recognition issuance.
//!
//! Learners record chapter consumption in an append-only history ledger. Course completion is
//! derived from that ledger on demand, and a completion recognition is issued at most once per
//! learner and course.

pub mod catalog;
pub mod completion;
pub mod context;
pub mod datastore;
pub mod demo;
pub mod error;
pub mod history;
pub mod pb;
pub mod recognition;
pub mod resolver;
pub mod svc;

mod operations;

#[cfg(test)]
mod testing;

pub use error::ProgressError;
