//! Reader for the BVH hierarchical motion-capture format.
//!
//! A file is processed in four steps: the hierarchy section is tokenized
//! ([`hierarchy::tokenize_hierarchy`]) and turned into a [`Skeleton`]
//! ([`hierarchy::build_skeleton`]); independently, the rest of the input is tokenized into a flat
//! sample stream ([`motion::tokenize_motion`]); finally the stream is reshaped against the
//! skeleton's channel layout into a [`MotionTable`].

pub mod error;
pub mod hierarchy;
pub mod keywords;
pub mod motion;

pub use error::{BvhError, BvhParseErrorKind};

use super::config::{FrameCountPolicy, ParseConfig};
use super::traits::MotionCaptureFile;
use crate::core::models::skeleton::Skeleton;
use crate::core::models::table::MotionTable;
use tracing::{info, instrument, warn};

pub struct BvhFile;

impl MotionCaptureFile for BvhFile {
    type Error = BvhError;

    #[instrument(skip_all, name = "bvh_parse")]
    fn parse_str(text: &str, config: &ParseConfig) -> Result<(Skeleton, MotionTable), BvhError> {
        let section = hierarchy::tokenize_hierarchy(text)?;
        let skeleton = hierarchy::build_skeleton(&section.tokens)?;
        let motion = motion::tokenize_motion(section.remainder, section.remainder_line)?;

        let frame_time = config.frame_time_override.or(motion.frame_time);
        let table = MotionTable::from_samples(skeleton.channel_layout(), frame_time, &motion.samples)?
            .with_declared_frame_count(motion.frame_count);

        check_frame_count(&table, config.frame_count_policy)?;

        info!(
            joints = skeleton.joint_count(),
            channels = skeleton.channel_layout().len(),
            frames = table.frame_count(),
            "Parsed motion capture."
        );
        Ok((skeleton, table))
    }
}

/// Parses `text` with the default [`ParseConfig`].
pub fn parse(text: &str) -> Result<(Skeleton, MotionTable), BvhError> {
    BvhFile::parse_str(text, &ParseConfig::default())
}

fn check_frame_count(table: &MotionTable, policy: FrameCountPolicy) -> Result<(), BvhError> {
    let actual = table.frame_count();
    match table.declared_frame_count() {
        Some(declared) if declared != actual => match policy {
            FrameCountPolicy::Ignore => Ok(()),
            FrameCountPolicy::Warn => {
                warn!(declared, actual, "Declared frame count differs from frames present.");
                Ok(())
            }
            FrameCountPolicy::Strict => Err(BvhError::FrameCountMismatch { declared, actual }),
        },
        _ => Ok(()),
    }
}
