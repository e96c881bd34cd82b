//! Analysis configuration for routenet
//!
//! Configuration is read from an optional TOML file; every key is optional and falls back to
//! its default. Command line flags override file values.
//!
//! ```toml
//! density_threshold = 0.3
//! hamiltonian_exact_limit = 20
//! hamiltonian_heuristic_starts = 64
//! euler_strategy = "hierholzer"
//! require_hamiltonian_cycle = false
//! log_dir = "logs"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::algo::{DEFAULT_EXACT_LIMIT, DEFAULT_HEURISTIC_STARTS, EulerStrategy};
use crate::error::{GraphError, Result};
use crate::node::NumNodes;
use crate::repr::DEFAULT_DENSITY_THRESHOLD;

/// Tunables of the analyses and the report log
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Density at or above which a loaded graph is stored as a matrix
    pub density_threshold: f64,

    /// Largest number of hubs for which Hamiltonian paths are searched exactly
    pub hamiltonian_exact_limit: NumNodes,

    /// Number of start hubs tried by the Hamiltonian heuristic
    pub hamiltonian_heuristic_starts: NumNodes,

    /// Construction strategy for Eulerian trails
    pub euler_strategy: EulerStrategy,

    /// Only accept Hamiltonian paths that close into a cycle
    pub require_hamiltonian_cycle: bool,

    /// Directory receiving the per-graph report logs
    pub log_dir: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            density_threshold: DEFAULT_DENSITY_THRESHOLD,
            hamiltonian_exact_limit: DEFAULT_EXACT_LIMIT,
            hamiltonian_heuristic_starts: DEFAULT_HEURISTIC_STARTS,
            euler_strategy: EulerStrategy::default(),
            require_hamiltonian_cycle: false,
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that the type system cannot express
    pub fn validate(&self) -> Result<()> {
        if !(self.density_threshold.is_finite()
            && self.density_threshold > 0.0
            && self.density_threshold <= 1.0)
        {
            return Err(GraphError::invalid_value(
                "density threshold",
                self.density_threshold,
            ));
        }

        if self.hamiltonian_heuristic_starts == 0 {
            return Err(GraphError::invalid_value(
                "number of heuristic starts",
                self.hamiltonian_heuristic_starts,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.density_threshold, 0.30);
        assert_eq!(config.hamiltonian_exact_limit, 20);
        assert_eq!(config.hamiltonian_heuristic_starts, 64);
        assert_eq!(config.euler_strategy, EulerStrategy::Hierholzer);
        assert!(!config.require_hamiltonian_cycle);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = AnalysisConfig::from_toml("euler_strategy = \"fleury\"\n").unwrap();
        assert_eq!(config.euler_strategy, EulerStrategy::Fleury);
        assert_eq!(config.hamiltonian_exact_limit, 20);

        assert_eq!(
            AnalysisConfig::from_toml("").unwrap(),
            AnalysisConfig::default()
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("routenet.toml");
        fs::write(
            &path,
            "density_threshold = 0.5\nrequire_hamiltonian_cycle = true\nlog_dir = \"out\"\n",
        )
        .unwrap();

        let config = AnalysisConfig::load(&path).unwrap();
        assert_eq!(config.density_threshold, 0.5);
        assert!(config.require_hamiltonian_cycle);
        assert_eq!(config.log_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            AnalysisConfig::from_toml("density_threshold = 1.5"),
            Err(GraphError::InvalidValue { .. })
        ));
        assert!(matches!(
            AnalysisConfig::from_toml("hamiltonian_heuristic_starts = 0"),
            Err(GraphError::InvalidValue { .. })
        ));
        assert!(matches!(
            AnalysisConfig::from_toml("euler_strategy = \"dfs\""),
            Err(GraphError::Config(_))
        ));
        assert!(matches!(
            AnalysisConfig::from_toml("colour = true"),
            Err(GraphError::Config(_))
        ));

        let dir = tempdir().unwrap();
        assert!(matches!(
            AnalysisConfig::load(&dir.path().join("missing.toml")),
            Err(GraphError::Io(_))
        ));
    }
}
