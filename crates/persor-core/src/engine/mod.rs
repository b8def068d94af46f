//! # Engine Module
//!
//! Derives per-joint motion series from a parsed skeleton and motion table.
//!
//! - [`query`] - Relative and absolute motion projections for a single joint.
//! - [`error`] - The error type shared by the engine and the workflows built on it.
//!
//! All queries are pure: they borrow the skeleton and table immutably and return new tables.

pub mod error;
pub mod query;
