//! Pacing modes and their static configuration tables.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Named pacing mode controlling buffer size and distribution slope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Relaxed pacing: larger safety buffer, mild front-loading
    #[default]
    Gentle,
    /// Aggressive pacing: small buffer, strong front-loading, automatic
    /// replans after every recorded progress
    Strict,
}

/// Configuration bundle for one pacing mode.
///
/// Configs are static lookup data reached through [`Mode::config`] and
/// passed explicitly into the allocator - never read as ambient globals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeConfig {
    /// Upper bound on reserved buffer days
    pub max_buffer: usize,

    /// Fraction of the day range reserved as trailing buffer
    pub buffer_rate: f64,

    /// Slope coefficient; positive values front-load the distribution
    pub slope: f64,

    /// Advisory daily study limit, in hours (display data)
    pub daily_limit_hours: u32,

    /// Advisory fraction of the daily limit at which to warn (display data)
    pub warning_threshold: f64,
}

const GENTLE: ModeConfig = ModeConfig {
    max_buffer: 3,
    buffer_rate: 0.2,
    slope: 0.5,
    daily_limit_hours: 3,
    warning_threshold: 0.8,
};

const STRICT: ModeConfig = ModeConfig {
    max_buffer: 2,
    buffer_rate: 0.1,
    slope: 1.5,
    daily_limit_hours: 5,
    warning_threshold: 0.9,
};

impl Mode {
    /// Static configuration for this mode.
    pub const fn config(self) -> &'static ModeConfig {
        match self {
            Mode::Gentle => &GENTLE,
            Mode::Strict => &STRICT,
        }
    }

    /// String form used on the wire and in snapshots.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Gentle => "gentle",
            Mode::Strict => "strict",
        }
    }

    /// Parse a mode name. Unknown names fall back to [`Mode::Gentle`] with
    /// a logged warning rather than failing.
    pub fn parse(s: &str) -> Self {
        match s {
            "gentle" => Mode::Gentle,
            "strict" => Mode::Strict,
            other => {
                warn!(mode = other, "unknown pacing mode, falling back to gentle");
                Mode::Gentle
            }
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Mode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// Snapshots written by a newer build may carry a mode name this build does
// not know; the whole load must not fail over it, so deserialization routes
// through the fallback parse.
impl<'de> Deserialize<'de> for Mode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Mode::parse(&s))
    }
}

impl ModeConfig {
    /// Whether the numeric fields are usable by the allocator.
    pub fn is_well_formed(&self) -> bool {
        self.buffer_rate.is_finite() && self.buffer_rate >= 0.0 && self.slope.is_finite()
    }
}
