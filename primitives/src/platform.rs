use parse_display::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The ad platforms campaigns are requested for.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Platform {
    Taboola,
    Outbrain,
    RevContent,
    MediaGo,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Taboola,
        Platform::Outbrain,
        Platform::RevContent,
        Platform::MediaGo,
    ];
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown platform '{0}'")]
pub struct UnknownPlatform(pub String);

/// Case-insensitive, e.g. `mediago`, `MediaGo` and `MEDIAGO` are all [`Platform::MediaGo`].
impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|platform| platform.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}
