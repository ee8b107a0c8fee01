//! Macro cycle configuration and numeric-text validation.
//!
//! Dialog input arrives as raw text and stays raw until save time; the
//! parse is guarded so malformed text degrades to "invalid", never a
//! panic.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a piece of numeric dialog input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("value is empty")]
    Empty,
    #[error("not a number: {0}")]
    NotANumber(String),
    #[error("must be greater than zero")]
    NonPositive,
}

/// Termination policy for macro playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleMode {
    /// Replay until explicitly paused.
    Infinite,
    /// Replay a fixed number of cycles, then stop.
    CyclesCount,
}

/// Cycle policy plus the raw, possibly invalid cycle count text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroConfig {
    pub cycle_mode: CycleMode,
    pub cycles_text: String,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            cycle_mode: CycleMode::CyclesCount,
            cycles_text: "1".into(),
        }
    }
}

impl MacroConfig {
    /// Parse the raw cycle count text as a strictly positive integer.
    pub fn parsed_cycles(&self) -> Result<u64, ConfigError> {
        parse_positive(&self.cycles_text)
    }

    /// `Infinite` is always valid; `CyclesCount` requires a parseable
    /// positive count.
    pub fn is_valid(&self) -> bool {
        match self.cycle_mode {
            CycleMode::Infinite => true,
            CycleMode::CyclesCount => self.parsed_cycles().is_ok(),
        }
    }

    /// Resolved cycle count for playback, `None` meaning unbounded.
    ///
    /// Only valid configs are ever committed; should an unparseable count
    /// slip through anyway it degrades to a zero-cycle run.
    pub fn cycles(&self) -> Option<u64> {
        match self.cycle_mode {
            CycleMode::Infinite => None,
            CycleMode::CyclesCount => Some(self.parsed_cycles().unwrap_or(0)),
        }
    }
}

/// Parse per-point delay text, in milliseconds. Must be at least 1.
pub fn parse_delay_ms(text: &str) -> Result<u64, ConfigError> {
    parse_positive(text)
}

fn parse_positive(text: &str) -> Result<u64, ConfigError> {
    if text.is_empty() {
        return Err(ConfigError::Empty);
    }

    let value: i64 = text
        .trim()
        .parse()
        .map_err(|_| ConfigError::NotANumber(text.to_string()))?;

    if value <= 0 {
        return Err(ConfigError::NonPositive);
    }

    Ok(value as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counted(text: &str) -> MacroConfig {
        MacroConfig {
            cycle_mode: CycleMode::CyclesCount,
            cycles_text: text.into(),
        }
    }

    #[test]
    fn test_cycles_validation_edge_values() {
        assert!(!counted("").is_valid());
        assert!(!counted("0").is_valid());
        assert!(!counted("-1").is_valid());
        assert!(!counted("abc").is_valid());
        assert!(!counted("1.5").is_valid());
        assert!(counted("1").is_valid());
        assert!(counted("42").is_valid());
    }

    #[test]
    fn test_infinite_always_valid() {
        for text in ["", "0", "-1", "abc", "7"] {
            let config = MacroConfig {
                cycle_mode: CycleMode::Infinite,
                cycles_text: text.into(),
            };
            assert!(config.is_valid());
        }
    }

    #[test]
    fn test_parse_errors_are_typed() {
        assert_eq!(counted("").parsed_cycles(), Err(ConfigError::Empty));
        assert_eq!(
            counted("abc").parsed_cycles(),
            Err(ConfigError::NotANumber("abc".into()))
        );
        assert_eq!(counted("0").parsed_cycles(), Err(ConfigError::NonPositive));
        assert_eq!(counted("-3").parsed_cycles(), Err(ConfigError::NonPositive));
        assert_eq!(counted("3").parsed_cycles(), Ok(3));
    }

    #[test]
    fn test_cycles_resolution() {
        assert_eq!(counted("3").cycles(), Some(3));
        let infinite = MacroConfig {
            cycle_mode: CycleMode::Infinite,
            cycles_text: String::new(),
        };
        assert_eq!(infinite.cycles(), None);
    }

    #[test]
    fn test_default_config_is_one_cycle() {
        let config = MacroConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.cycles(), Some(1));
    }

    #[test]
    fn test_delay_validation() {
        assert_eq!(parse_delay_ms("1000"), Ok(1000));
        assert_eq!(parse_delay_ms("1"), Ok(1));
        assert_eq!(parse_delay_ms(""), Err(ConfigError::Empty));
        assert_eq!(parse_delay_ms("0"), Err(ConfigError::NonPositive));
        assert_eq!(
            parse_delay_ms("fast"),
            Err(ConfigError::NotANumber("fast".into()))
        );
    }
}
