//! Provides input/output functionality for motion-capture data.
//!
//! This module contains the BVH reader, the settings that tune it, and CSV export of motion
//! tables for external plotting or analysis tools. Readers share the [`traits::MotionCaptureFile`]
//! interface.

pub mod bvh;
pub mod config;
pub mod export;
pub mod traits;
