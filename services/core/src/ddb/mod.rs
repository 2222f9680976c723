//! Typed wrappers over the DynamoDB operations used by the services.
//!
//! Each operation is an async trait so repositories can be written against the smallest set of
//! capabilities they need, and exercised with fakes.

pub mod adapter;
pub mod get_item;
pub mod item;
pub mod put_item;
pub mod query;

pub use adapter::Adapter;
