use phf::{Set, phf_set};

pub const ROOT: &str = "ROOT";
pub const JOINT: &str = "JOINT";
pub const END: &str = "End";
pub const SITE: &str = "Site";
pub const OFFSET: &str = "OFFSET";
pub const CHANNELS: &str = "CHANNELS";
pub const HIERARCHY: &str = "HIERARCHY";
pub const MOTION: &str = "MOTION";
pub const OPEN_BLOCK: &str = "{";
pub const CLOSE_BLOCK: &str = "}";

pub const FRAME_COUNT: &str = "Frames:";
pub const FRAME_TIME: &str = "Frame Time:";

static RESERVED: Set<&'static str> = phf_set! {
    "HIERARCHY", "ROOT", "JOINT", "End", "Site", "OFFSET", "CHANNELS",
    "MOTION", "Frames:", "Frame", "Time:", "{", "}",
};

/// Whether `token` is a structural keyword of the format and therefore cannot name a joint or
/// a channel.
pub fn is_reserved(token: &str) -> bool {
    RESERVED.contains(token)
}
