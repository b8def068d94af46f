use super::channel::ChannelKind;
use thiserror::Error;

/// Errors raised by queries against an already built skeleton or motion table.
///
/// A query error only affects the call that produced it; the skeleton and table stay valid.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Joint not found in skeleton: '{0}'")]
    UnknownJoint(String),

    #[error("Joint '{joint}' does not declare the {channel} channel")]
    MissingChannel { joint: String, channel: ChannelKind },

    #[error("Column '{column}' is declared by the skeleton but absent from the motion table")]
    Inconsistent { column: String },

    #[error("Column not found in motion table: '{0}'")]
    UnknownColumn(String),
}

impl QueryError {
    /// Whether the error comes from a name that does not resolve (as opposed to a
    /// skeleton/table pairing that disagrees).
    pub fn is_lookup(&self) -> bool {
        !matches!(self, QueryError::Inconsistent { .. })
    }
}
