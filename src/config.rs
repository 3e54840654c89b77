//! Run configuration.
//!
//! Everything that changes between course editions lives here: the remote
//! identifiers, the group blacklist, the deadline table, and the two policy
//! knobs for malformed assignment names and transport faults.
//!
//! Configuration is read from a JSON file, either an explicit `--config`
//! path or `<config dir>/housepoints/config.json`; a missing file means the
//! defaults of the 2022/2023 course edition.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::deadlines::DeadlineTable;
use crate::models::Track;

/// Application name used for the config directory path
const APP_NAME: &str = "housepoints";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Base URL of the Horus REST API
const DEFAULT_BASE_URL: &str = "https://horus.apps.utwente.nl/api";

/// Group set holding the lab pairs. May change next year.
const DEFAULT_GROUP_SET_ID: i64 = 2514;

/// Assignment set ids of the two tracks. May change next year.
const DEFAULT_PROGRAMMING_SET_ID: i64 = 170;
const DEFAULT_DESIGN_SET_ID: i64 = 171;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub group_set_id: i64,
    pub programming_set_id: i64,
    pub design_set_id: i64,
    /// Points awarded per eligible signoff.
    pub points_per_assignment: u32,
    /// Group categories excluded from earning points.
    pub blacklist: Vec<String>,
    pub deadlines: DeadlineTable,
    /// Fail the run on a malformed assignment name instead of skipping it.
    pub strict_names: bool,
    /// Fail the run on a transport fault instead of counting the affected
    /// assignment as not signed off.
    pub fail_on_fault: bool,
    /// Where the final report is written.
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            group_set_id: DEFAULT_GROUP_SET_ID,
            programming_set_id: DEFAULT_PROGRAMMING_SET_ID,
            design_set_id: DEFAULT_DESIGN_SET_ID,
            points_per_assignment: 1,
            blacklist: ["Minor", "NEDAP", "Premaster", "Resit"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            deadlines: DeadlineTable::default(),
            strict_names: false,
            fail_on_fault: false,
            output: PathBuf::from("reports.csv"),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location when no
    /// path is given. A missing default file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path)
                .with_context(|| format!("failed to load config from {}", path.display())),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path)
                    .with_context(|| format!("failed to load config from {}", path.display())),
                _ => Ok(Self::default()),
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Assignment set id serving a track's catalog.
    pub fn catalog_id(&self, track: Track) -> i64 {
        match track {
            Track::Programming => self.programming_set_id,
            Track::Design => self.design_set_id,
        }
    }
}
