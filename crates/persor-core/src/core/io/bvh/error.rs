use crate::core::models::builder::SkeletonError;
use crate::core::models::table::TableBuildError;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BvhError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: BvhParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error("Invalid skeleton: {0}")]
    Skeleton(#[from] SkeletonError),
    #[error("Invalid motion data: {0}")]
    Table(#[from] TableBuildError),
    #[error("Declared frame count {declared} does not match the {actual} complete frames present")]
    FrameCountMismatch { declared: usize, actual: usize },
}

impl BvhError {
    /// Whether the error describes malformed input, as opposed to a failure to read it.
    pub fn is_structural(&self) -> bool {
        !matches!(self, BvhError::Io(_))
    }

    pub(crate) fn at(line: usize, kind: BvhParseErrorKind) -> Self {
        BvhError::Parse { line, kind }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BvhParseErrorKind {
    #[error("'}}' has no matching '{{'")]
    UnmatchedCloseBrace,
    #[error("Input ended with {depth} unclosed block(s)")]
    UnterminatedBlock { depth: usize },
    #[error("'{{' does not follow a ROOT, JOINT or End Site declaration")]
    UnexpectedOpenBrace,
    #[error("Expected '{{' after declaration of '{name}', found '{found}'")]
    ExpectedOpenBrace { name: String, found: String },
    #[error("{keyword} must be followed by a joint name")]
    MissingJointName { keyword: String },
    #[error("JOINT '{name}' is not nested inside another joint")]
    MisplacedJoint { name: String },
    #[error("End Site is not nested inside a joint")]
    MisplacedEndSite,
    #[error("{keyword} appears outside of any joint block")]
    PropertyOutsideBlock { keyword: String },
    #[error("OFFSET requires exactly 3 numeric values, found {found}")]
    InvalidOffsetArity { found: usize },
    #[error("Invalid channel count (value: '{value}')")]
    InvalidChannelCount { value: String },
    #[error("CHANNELS declares {declared} channel(s) but {found} are present")]
    ChannelCountMismatch { declared: usize, found: usize },
    #[error("Unknown channel kind '{value}'")]
    UnknownChannelKind { value: String },
    #[error("End Site blocks cannot declare channels")]
    ChannelsOnEndSite,
    #[error("Unexpected token '{token}'")]
    UnexpectedToken { token: String },
    #[error("Invalid skeleton: {0}")]
    Skeleton(SkeletonError),
    #[error("Invalid frame count (value: '{value}')")]
    InvalidFrameCount { value: String },
    #[error("Invalid frame time (value: '{value}')")]
    InvalidFrameTime { value: String },
}
