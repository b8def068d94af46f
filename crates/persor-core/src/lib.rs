//! # persor
//!
//! A library for reading hierarchical motion-capture files (BVH) and deriving per-joint motion
//! series from them.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Data models (`Skeleton`, `ChannelLayout`, `MotionTable`) and
//!   the BVH reader that builds them from text.
//!
//! - **[`engine`]: The Query Layer.** Relative and absolute motion projections for a joint,
//!   computed from an immutable skeleton/table pair.
//!
//! - **[`workflows`]: The Public API.** End-to-end pipelines tying `core` and `engine` together.
//!
//! ## Absolute motion
//!
//! Absolute motion is computed by adding the position channels of a joint and its ancestors.
//! Rotations are not composed, so results are only geometrically correct for unrotated chains.

pub mod core;
pub mod engine;
pub mod workflows;
