//! # Core Models Module
//!
//! Data structures describing a parsed motion capture.
//!
//! - [`channel`] - The per-joint degrees of freedom recorded in each frame
//! - [`joint`] - A single node of the skeleton with its offset and channels
//! - [`skeleton`] - The joint tree and the channel layout derived from it
//! - [`builder`] - Incremental, invariant-checking construction of a skeleton
//! - [`table`] - The time-indexed motion table built from the sample stream
//! - [`error`] - Errors raised by lookups against built models
//!
//! A skeleton and its table are built once per file and are read-only afterwards.

pub mod builder;
pub mod channel;
pub mod error;
pub mod joint;
pub mod skeleton;
pub mod table;
