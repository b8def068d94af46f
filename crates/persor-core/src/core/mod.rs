//! # Core Module
//!
//! The foundation of the library: data models for skeletons and motion tables, and the
//! readers and writers that move them in and out of text formats.
//!
//! - **Models** ([`models`]) - Joints, skeletons, channel layouts and motion tables
//! - **File I/O** ([`io`]) - The BVH reader, parser settings and CSV export

pub mod io;
pub mod models;
