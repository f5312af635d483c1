use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{ConfigError, ErrorCode};

/// Tuning knobs for graph analysis.
///
/// Every field has a default, so an empty `[analysis]` table (or no config
/// file at all) yields the stock settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// How many entries each ranked insight list keeps. `<= 0` keeps all.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// PageRank damping factor.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// L1 delta between iterations below which iterative metrics stop.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Hard cap on iterations for PageRank, eigenvector, and HITS.
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    /// Divide betweenness by `(n-1)(n-2)` so scores land in `[0, 1]`.
    ///
    /// Off by default: betweenness is reported as raw sums of pair
    /// dependencies, so its scale grows with the snapshot size.
    #[serde(default)]
    pub normalize_betweenness: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            damping: default_damping(),
            tolerance: default_tolerance(),
            max_iter: default_max_iter(),
            normalize_betweenness: false,
        }
    }
}

impl AnalysisConfig {
    /// Check that the iterative settings can terminate and mean something.
    ///
    /// # Errors
    ///
    /// Returns the first offending field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::Tolerance(self.tolerance));
        }
        if self.max_iter == 0 {
            return Err(ConfigError::MaxIter);
        }
        Ok(())
    }

    /// Parse the `[analysis]` table out of a TOML document and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML and a value error
    /// when a setting is out of range.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.analysis.validate()?;
        Ok(file.analysis)
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    analysis: AnalysisConfig,
}

const fn default_limit() -> i64 {
    5
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_max_iter() -> usize {
    100
}

/// Load analysis settings from a TOML file, falling back to defaults when
/// the file does not exist.
///
/// # Errors
///
/// Fails when the file exists but cannot be read, parsed, or validated.
pub fn load_analysis_config(path: &Path) -> Result<AnalysisConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no analysis config, using defaults");
        return Ok(AnalysisConfig::default());
    }

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "{}: failed to read {}",
            ErrorCode::ConfigReadFailed,
            path.display()
        )
    })?;

    AnalysisConfig::from_toml(&content).map_err(|err| {
        let code = err.code();
        anyhow::Error::new(err).context(format!("{code}: failed to load {}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalysisConfig::default();
        assert_eq!(config.limit, 5);
        assert!((config.damping - 0.85).abs() < f64::EPSILON);
        assert_eq!(config.max_iter, 100);
        assert!(!config.normalize_betweenness);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let config = AnalysisConfig::from_toml("").expect("empty toml");
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn partial_table_keeps_other_defaults() {
        let config = AnalysisConfig::from_toml("[analysis]\nlimit = 0\nmax_iter = 250\n")
            .expect("partial table");
        assert_eq!(config.limit, 0);
        assert_eq!(config.max_iter, 250);
        assert!((config.tolerance - 1e-6).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_damping_is_rejected() {
        let err = AnalysisConfig::from_toml("[analysis]\ndamping = 1.0\n").expect_err("damping");
        assert!(matches!(err, ConfigError::Damping(d) if (d - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn zero_iteration_cap_is_rejected() {
        let config = AnalysisConfig {
            max_iter: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MaxIter)));
    }

    #[test]
    fn nan_tolerance_is_rejected() {
        let config = AnalysisConfig {
            tolerance: f64::NAN,
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Tolerance(_))));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AnalysisConfig::from_toml("[analysis\nlimit = 3").expect_err("bad toml");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_tags_syntax_errors_with_parse_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bv.toml");
        std::fs::write(&path, "[analysis\n").expect("write config");

        let err = load_analysis_config(&path).expect_err("bad toml");
        assert!(format!("{err:#}").starts_with("E1002"));
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_analysis_config(&dir.path().join("bv.toml")).expect("load");
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bv.toml");
        std::fs::write(&path, "[analysis]\nlimit = 10\nnormalize_betweenness = true\n")
            .expect("write config");

        let config = load_analysis_config(&path).expect("load");
        assert_eq!(config.limit, 10);
        assert!(config.normalize_betweenness);
    }

    #[test]
    fn load_reports_path_and_code_on_bad_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bv.toml");
        std::fs::write(&path, "[analysis]\ntolerance = 0.0\n").expect("write config");

        let err = load_analysis_config(&path).expect_err("invalid tolerance");
        let rendered = format!("{err:#}");
        assert!(rendered.contains("E1004"), "{rendered}");
        assert!(rendered.contains("bv.toml"), "{rendered}");
        assert!(rendered.contains("tolerance"), "{rendered}");
    }
}
