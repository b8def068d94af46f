//! # Workflows Module
//!
//! High-level entry points that run the complete pipeline, from reading a file to the motion
//! series of a joint, for callers that do not need to drive each stage themselves.
//!
//! - **Joint Motion** ([`joint_motion`]) - Parses a file and derives the relative and absolute
//!   motion of one joint, optionally exporting both as CSV.

pub mod joint_motion;
