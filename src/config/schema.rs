use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::{DEFAULT_GOALKEEPER_ROLES, DEFAULT_TOP_N};

/// User configuration.
///
/// Every field is optional; command-line flags override what is set here.
///
/// Example YAML:
/// ```yaml
/// catalog: ~/fm/roles.json
/// players: ~/fm/scouting.csv
/// top_n: 10
/// output_dir: ./exports
/// goalkeeper_roles: [gkd, "sk*"]
/// min_age: 16
/// max_age: 23
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Role catalog used when --catalog is not given
    #[serde(default)]
    pub catalog: Option<PathBuf>,

    /// Player table used when --players is not given
    #[serde(default)]
    pub players: Option<PathBuf>,

    /// Players kept per role (default: 10)
    #[serde(default)]
    pub top_n: Option<usize>,

    /// Directory for exported CSV files (default: current directory)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Glob patterns for the goalkeeper roles skipped by --exclude-gk
    #[serde(default)]
    pub goalkeeper_roles: Option<Vec<String>>,

    #[serde(default)]
    pub min_age: Option<u32>,

    #[serde(default)]
    pub max_age: Option<u32>,
}

impl Config {
    pub fn top_n(&self) -> usize {
        self.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    pub fn goalkeeper_patterns(&self) -> Vec<String> {
        self.goalkeeper_roles.clone().unwrap_or_else(|| {
            DEFAULT_GOALKEEPER_ROLES.iter().map(|s| s.to_string()).collect()
        })
    }

    pub fn min_age(&self) -> u32 {
        self.min_age.unwrap_or(0)
    }

    pub fn max_age(&self) -> u32 {
        self.max_age.unwrap_or(99)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }
}
