//! Configuration loading from sortbench.toml
//!
//! SortBench configuration can be specified in a `sortbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use serde::{Deserialize, Serialize};
use sortbench_corpus::TestClass;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// File name searched for by [`SortbenchConfig::discover`]
pub const CONFIG_FILE: &str = "sortbench.toml";

/// SortBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SortbenchConfig {
    /// Trial configuration
    #[serde(default)]
    pub harness: HarnessConfig,
    /// Filesystem layout
    #[serde(default)]
    pub paths: PathsConfig,
    /// Timing executable build step
    #[serde(default)]
    pub build: BuildConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Trial configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Algorithm names, in the order the timing executable reports them
    #[serde(default = "default_algorithms")]
    pub algorithms: Vec<String>,
    /// Distinct generated inputs per test class
    #[serde(default = "default_inputs_per_class")]
    pub inputs_per_class: usize,
    /// Exchange round-trips per generated input
    #[serde(default = "default_repetitions")]
    pub repetitions: usize,
    /// Inclusive lower bound for drawn generator parameters
    #[serde(default = "default_min_param")]
    pub min_param: u64,
    /// Inclusive upper bound for drawn generator parameters
    #[serde(default = "default_max_param")]
    pub max_param: u64,
    /// Fixed RNG seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            algorithms: default_algorithms(),
            inputs_per_class: default_inputs_per_class(),
            repetitions: default_repetitions(),
            min_param: default_min_param(),
            max_param: default_max_param(),
            seed: None,
        }
    }
}

impl HarnessConfig {
    /// Range generator parameters are drawn from
    pub fn param_range(&self) -> RangeInclusive<u64> {
        self.min_param..=self.max_param
    }
}

fn default_algorithms() -> Vec<String> {
    ["insertion_sort", "merge_sort", "quick_sort", "radix_sort"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_inputs_per_class() -> usize {
    100
}
fn default_repetitions() -> usize {
    10
}
fn default_min_param() -> u64 {
    100
}
fn default_max_param() -> u64 {
    10_000
}

/// Filesystem layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding one measurement table per test class
    #[serde(default = "default_tests_dir")]
    pub tests_dir: PathBuf,
    /// Directory for exchange files
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: PathBuf,
    /// Summary table name (without extension)
    #[serde(default = "default_results_name")]
    pub results_name: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            tests_dir: default_tests_dir(),
            scratch_dir: default_scratch_dir(),
            results_name: default_results_name(),
        }
    }
}

fn default_tests_dir() -> PathBuf {
    PathBuf::from("./tests")
}
fn default_scratch_dir() -> PathBuf {
    PathBuf::from("./.temp")
}
fn default_results_name() -> String {
    "Results".to_string()
}

/// Timing executable build step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Compiler invoked as `<compiler> <sources...> -o <artifact>`
    #[serde(default = "default_compiler")]
    pub compiler: String,
    /// Source files passed to the compiler
    #[serde(default = "default_sources")]
    pub sources: Vec<PathBuf>,
    /// Compiled timing executable
    #[serde(default = "default_artifact")]
    pub artifact: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            compiler: default_compiler(),
            sources: default_sources(),
            artifact: default_artifact(),
        }
    }
}

fn default_compiler() -> String {
    "g++".to_string()
}
fn default_sources() -> Vec<PathBuf> {
    vec![PathBuf::from("timeit.cpp"), PathBuf::from("sorts.cpp")]
}
fn default_artifact() -> PathBuf {
    PathBuf::from("./timeit")
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "human", "json", "csv"
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "human".to_string()
}

impl SortbenchConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.exists() {
                return Self::load(&config_path).ok();
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Reject settings no run could succeed with
    pub fn validate(&self) -> anyhow::Result<()> {
        let harness = &self.harness;
        if harness.algorithms.is_empty() {
            anyhow::bail!("harness.algorithms must name at least one algorithm");
        }
        if harness.repetitions == 0 {
            anyhow::bail!("harness.repetitions must be at least 1");
        }
        if harness.min_param < 2 {
            anyhow::bail!(
                "harness.min_param must be at least 2 (got {})",
                harness.min_param
            );
        }
        if harness.min_param > harness.max_param {
            anyhow::bail!(
                "harness.min_param ({}) exceeds harness.max_param ({})",
                harness.min_param,
                harness.max_param
            );
        }
        if let Some(class) = TestClass::from_table_name(&self.paths.results_name) {
            anyhow::bail!(
                "paths.results_name {:?} would overwrite the {} measurement table",
                self.paths.results_name,
                class
            );
        }
        Ok(())
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# SortBench Configuration

[harness]
# Algorithm names, in the order the timing executable writes its timings
algorithms = ["insertion_sort", "merge_sort", "quick_sort", "radix_sort"]
# Distinct generated inputs per test class
inputs_per_class = 100
# Exchange round-trips per generated input
repetitions = 10
# Inclusive bounds for drawn length/start/scale/k
min_param = 100
max_param = 10000
# Fixed RNG seed (uncomment to enable)
# seed = 42

[paths]
# One measurement table per test class
tests_dir = "./tests"
# Exchange files live here while a trial runs
scratch_dir = "./.temp"
# Summary table name, written into tests_dir
results_name = "Results"

[build]
# Invoked once as: <compiler> <sources...> -o <artifact>
compiler = "g++"
sources = ["timeit.cpp", "sorts.cpp"]
artifact = "./timeit"

[output]
# Default output format: human, json, csv
format = "human"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SortbenchConfig::default();
        assert_eq!(config.harness.algorithms.len(), 4);
        assert_eq!(config.harness.inputs_per_class, 100);
        assert_eq!(config.harness.repetitions, 10);
        assert_eq!(config.harness.param_range(), 100..=10_000);
        assert_eq!(config.paths.results_name, "Results");
        assert_eq!(config.build.compiler, "g++");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [harness]
            algorithms = ["merge_sort"]
            repetitions = 2
            seed = 7

            [paths]
            tests_dir = "out"
        "#;

        let config: SortbenchConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.harness.algorithms, ["merge_sort"]);
        assert_eq!(config.harness.repetitions, 2);
        assert_eq!(config.harness.seed, Some(7));
        assert_eq!(config.paths.tests_dir, PathBuf::from("out"));
        // Defaults should still apply
        assert_eq!(config.harness.inputs_per_class, 100);
        assert_eq!(config.paths.scratch_dir, PathBuf::from("./.temp"));
        assert_eq!(config.output.format, "human");
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = SortbenchConfig::default_toml();
        let config: SortbenchConfig = toml::from_str(&default_toml).unwrap();
        let defaults = SortbenchConfig::default();
        assert_eq!(config.harness.algorithms, defaults.harness.algorithms);
        assert_eq!(config.harness.seed, None);
        assert_eq!(config.build.sources, defaults.build.sources);
        assert_eq!(config.paths.tests_dir, defaults.paths.tests_dir);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let mut config = SortbenchConfig::default();
        config.harness.algorithms.clear();
        assert!(config.validate().is_err());

        let mut config = SortbenchConfig::default();
        config.harness.repetitions = 0;
        assert!(config.validate().is_err());

        let mut config = SortbenchConfig::default();
        config.harness.min_param = 1;
        assert!(config.validate().is_err());

        let mut config = SortbenchConfig::default();
        config.harness.min_param = 500;
        config.harness.max_param = 400;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_results_name_of_a_table() {
        let mut config = SortbenchConfig::default();
        config.paths.results_name = "Correctly-Sorted".to_string();
        assert!(config.validate().is_err());

        config.paths.results_name = "random-outliers".to_string();
        assert!(config.validate().is_err());

        config.paths.results_name = "Summary".to_string();
        assert!(config.validate().is_ok());
    }
}
