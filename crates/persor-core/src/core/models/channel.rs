use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static CHANNEL_NAMES: Map<&'static str, ChannelKind> = phf_map! {
    "Xposition" => ChannelKind::Xposition,
    "Yposition" => ChannelKind::Yposition,
    "Zposition" => ChannelKind::Zposition,
    "Xrotation" => ChannelKind::Xrotation,
    "Yrotation" => ChannelKind::Yrotation,
    "Zrotation" => ChannelKind::Zrotation,
};

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown channel kind: '{0}'")]
pub struct ParseChannelKindError(pub String);

/// One degree of freedom sampled per frame for a joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    Xposition,
    Yposition,
    Zposition,
    Xrotation,
    Yrotation,
    Zrotation,
}

impl ChannelKind {
    pub const POSITIONS: [ChannelKind; 3] = [
        ChannelKind::Xposition,
        ChannelKind::Yposition,
        ChannelKind::Zposition,
    ];

    pub const ROTATIONS: [ChannelKind; 3] = [
        ChannelKind::Xrotation,
        ChannelKind::Yrotation,
        ChannelKind::Zrotation,
    ];

    /// The six channels a fully articulated joint declares, in canonical order.
    pub const ALL: [ChannelKind; 6] = [
        ChannelKind::Xposition,
        ChannelKind::Yposition,
        ChannelKind::Zposition,
        ChannelKind::Xrotation,
        ChannelKind::Yrotation,
        ChannelKind::Zrotation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChannelKind::Xposition => "Xposition",
            ChannelKind::Yposition => "Yposition",
            ChannelKind::Zposition => "Zposition",
            ChannelKind::Xrotation => "Xrotation",
            ChannelKind::Yrotation => "Yrotation",
            ChannelKind::Zrotation => "Zrotation",
        }
    }

    pub fn is_position(self) -> bool {
        matches!(
            self,
            ChannelKind::Xposition | ChannelKind::Yposition | ChannelKind::Zposition
        )
    }

    pub fn is_rotation(self) -> bool {
        !self.is_position()
    }

    /// Column name of this channel for `joint` in a motion table.
    pub fn column_name(self, joint: &str) -> String {
        format!("{}_{}", joint, self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = ParseChannelKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CHANNEL_NAMES
            .get(s)
            .copied()
            .ok_or_else(|| ParseChannelKindError(s.to_string()))
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
