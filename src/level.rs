//! Severity levels.
//!
//! # Ordering
//! ```text
//! Panic(0) < Fatal(1) < Error(2) < Warn(3) < Info(4) < Debug(5) < Trace(6)
//! ```
//! The most severe level has the lowest ordinal. A record is emitted when its
//! ordinal is less than or equal to the threshold's ordinal.
//!
//! # Design Decisions
//! - Conversions never fail: unknown names and ordinals fall back to `Info`
//! - Names are lowercase on the way out, case-insensitive on the way in

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Logger severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// Highest severity. Logs, then unwinds.
    Panic = 0,
    /// Logs, then exits the process with status 1.
    Fatal = 1,
    Error = 2,
    Warn = 3,
    #[default]
    Info = 4,
    Debug = 5,
    Trace = 6,
}

impl Level {
    /// All levels, most severe first.
    pub const ALL: [Level; 7] = [
        Level::Panic,
        Level::Fatal,
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    /// Canonical lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Panic => "panic",
            Level::Fatal => "fatal",
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }

    pub const fn ordinal(self) -> u32 {
        self as u32
    }

    /// Level for a raw ordinal, if one is defined.
    pub fn from_ordinal(ordinal: u32) -> Option<Level> {
        Level::ALL.get(ordinal as usize).copied()
    }

    /// Whether a record at `record` passes a threshold of `self`.
    pub fn enables(self, record: Level) -> bool {
        record.ordinal() <= self.ordinal()
    }

    /// The `tracing` level a record at this severity is emitted at.
    ///
    /// `tracing` has no levels above ERROR, so panic and fatal collapse onto it.
    pub fn to_tracing(self) -> tracing::Level {
        match self {
            Level::Panic | Level::Fatal | Level::Error => tracing::Level::ERROR,
            Level::Warn => tracing::Level::WARN,
            Level::Info => tracing::Level::INFO,
            Level::Debug => tracing::Level::DEBUG,
            Level::Trace => tracing::Level::TRACE,
        }
    }
}

/// Name for a raw level ordinal. Out-of-range ordinals map to `"info"`.
pub fn parse_level(ordinal: u32) -> &'static str {
    Level::from_ordinal(ordinal).unwrap_or_default().as_str()
}

/// Case-insensitive name lookup. Unknown names map to [`Level::Info`].
pub fn to_log_level(name: &str) -> Level {
    match name.to_ascii_lowercase().as_str() {
        "panic" => Level::Panic,
        "fatal" => Level::Fatal,
        "error" => Level::Error,
        "warn" => Level::Warn,
        "info" => Level::Info,
        "debug" => Level::Debug,
        "trace" => Level::Trace,
        _ => Level::Info,
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(to_log_level(s))
    }
}

impl Serialize for Level {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Level {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(to_log_level(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for level in Level::ALL {
            assert_eq!(to_log_level(level.as_str()), level);
            assert_eq!(to_log_level(parse_level(level.ordinal())), level);
        }
    }

    #[test]
    fn test_default_fallback() {
        assert_eq!(parse_level(7), "info");
        assert_eq!(parse_level(u32::MAX), "info");
        assert_eq!(to_log_level("bogus"), Level::Info);
        assert_eq!(to_log_level(""), Level::Info);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(to_log_level("ERROR"), Level::Error);
        assert_eq!(to_log_level("error"), Level::Error);
        assert_eq!(to_log_level("Warn"), Level::Warn);
        assert_eq!("TrAcE".parse::<Level>(), Ok(Level::Trace));
    }

    #[test]
    fn test_ordering_and_enablement() {
        assert!(Level::Panic < Level::Trace);
        assert!(Level::Debug.enables(Level::Info));
        assert!(Level::Debug.enables(Level::Debug));
        assert!(!Level::Warn.enables(Level::Debug));
        assert!(Level::Warn.enables(Level::Panic));
    }

    #[test]
    fn test_tracing_mapping() {
        assert_eq!(Level::Fatal.to_tracing(), tracing::Level::ERROR);
        assert_eq!(Level::Panic.to_tracing(), tracing::Level::ERROR);
        assert_eq!(Level::Trace.to_tracing(), tracing::Level::TRACE);
    }

    #[test]
    fn test_serde_uses_names() {
        let json = serde_json::to_string(&Level::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
        let level: Level = serde_json::from_str("\"DEBUG\"").unwrap();
        assert_eq!(level, Level::Debug);
    }
}
