use std::fmt;

use thiserror::Error;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    InvalidConfigValue,
    ConfigReadFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1002",
            Self::InvalidConfigValue => "E1004",
            Self::ConfigReadFailed => "E1005",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::InvalidConfigValue => "Invalid analysis setting",
            Self::ConfigReadFailed => "Config file could not be read",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix the TOML syntax in the [analysis] table and retry."),
            Self::InvalidConfigValue => {
                Some("Use damping in (0, 1), a positive tolerance, and max_iter >= 1.")
            }
            Self::ConfigReadFailed => Some("Check that the config path exists and is readable."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rejected analysis configuration.
///
/// This is the only failure the analysis engine surfaces: a graph snapshot
/// is always analyzable, a nonsensical tuning knob is not.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("damping must be in (0, 1), got {0}")]
    Damping(f64),
    #[error("tolerance must be a positive finite number, got {0}")]
    Tolerance(f64),
    #[error("max_iter must be at least 1")]
    MaxIter,
    #[error("failed to parse analysis config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    /// The stable [`ErrorCode`] for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Damping(_) | Self::Tolerance(_) | Self::MaxIter => ErrorCode::InvalidConfigValue,
            Self::Parse(_) => ErrorCode::ConfigParseError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ErrorCode};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::ConfigParseError,
            ErrorCode::InvalidConfigValue,
            ErrorCode::ConfigReadFailed,
        ];
        let codes: HashSet<&str> = all.iter().map(|c| c.code()).collect();
        assert_eq!(codes.len(), all.len());
        assert!(all.iter().all(|c| c.hint().is_some()));
    }

    #[test]
    fn config_errors_map_to_codes() {
        assert_eq!(
            ConfigError::Damping(1.5).code(),
            ErrorCode::InvalidConfigValue
        );
        assert_eq!(ConfigError::MaxIter.code().to_string(), "E1004");
        assert_eq!(
            ConfigError::Tolerance(-1.0).to_string(),
            "tolerance must be a positive finite number, got -1"
        );
    }
}
