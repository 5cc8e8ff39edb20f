//! Configuration file for seating sources and lookup rules

use crate::error::{Error, Result};
use crate::merger::{merge_sources, read_source, Roster, BUNDLED_PRIMARY, BUNDLED_SECONDARY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Marker in a dietary note that denotes a vegetarian guest
pub const DEFAULT_VEGETARIAN_MARKER: &str = "素";

/// Query that switches from seat lookup to table statistics
pub const DEFAULT_STATS_SENTINEL: &str = "0";

/// Rules applied when answering a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryRules {
    /// Substring of the dietary note marking a vegetarian
    pub vegetarian_marker: String,
    /// Reserved query that shows statistics instead of matches
    pub stats_sentinel: String,
}

impl Default for QueryRules {
    fn default() -> Self {
        Self {
            vegetarian_marker: DEFAULT_VEGETARIAN_MARKER.to_string(),
            stats_sentinel: DEFAULT_STATS_SENTINEL.to_string(),
        }
    }
}

/// Where seats come from and how queries are answered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatingConfig {
    /// Primary CSV source; its rows always win
    pub primary: Option<PathBuf>,
    /// Secondary CSV source; only rows with new short keys are added
    pub secondary: Option<PathBuf>,
    pub rules: QueryRules,
}

impl SeatingConfig {
    /// Create a config using the bundled sources and default rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from JSON
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = read_source(path.as_ref())?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the config to JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Read the raw text of both seating sources.
    ///
    /// With no sources configured the bundled seating lists are used.
    pub fn read_sources(&self) -> Result<(String, String)> {
        match (&self.primary, &self.secondary) {
            (Some(primary), Some(secondary)) => Ok((read_source(primary)?, read_source(secondary)?)),
            (None, None) => Ok((BUNDLED_PRIMARY.to_string(), BUNDLED_SECONDARY.to_string())),
            _ => Err(Error::IncompleteSources),
        }
    }

    /// Build the roster this config points at
    pub fn roster(&self) -> Result<Roster> {
        let (primary, secondary) = self.read_sources()?;
        Ok(merge_sources(&primary, &secondary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("seat-core-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_default_rules() {
        let rules = QueryRules::default();
        assert_eq!(rules.vegetarian_marker, "素");
        assert_eq!(rules.stats_sentinel, "0");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SeatingConfig =
            serde_json::from_str(r#"{ "rules": { "vegetarian_marker": "veg" } }"#).unwrap();

        assert_eq!(config.primary, None);
        assert_eq!(config.rules.vegetarian_marker, "veg");
        assert_eq!(config.rules.stats_sentinel, "0");
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("config.json");
        let config = SeatingConfig {
            primary: Some(PathBuf::from("media.csv")),
            secondary: Some(PathBuf::from("ec.csv")),
            rules: QueryRules::default(),
        };

        config.save(&path).unwrap();
        let loaded = SeatingConfig::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_roster_from_files() {
        let primary = temp_path("primary.csv");
        let secondary = temp_path("secondary.csv");
        fs::write(&primary, "t,k,n,d\n1,A,x,\n").unwrap();
        fs::write(&secondary, "t,k,n,d\n2,a,dup,\n2,B,y,\n").unwrap();

        let config = SeatingConfig {
            primary: Some(primary.clone()),
            secondary: Some(secondary.clone()),
            rules: QueryRules::default(),
        };
        let roster = config.roster().unwrap();
        fs::remove_file(&primary).unwrap();
        fs::remove_file(&secondary).unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.seats()[1].short_key, "B");
    }

    #[test]
    fn test_roster_defaults_to_bundled() {
        assert_eq!(SeatingConfig::new().roster().unwrap(), Roster::bundled());
    }

    #[test]
    fn test_load_missing_config() {
        let err = SeatingConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }

    #[test]
    fn test_roster_rejects_single_source() {
        let config = SeatingConfig {
            primary: Some(PathBuf::from("only.csv")),
            ..SeatingConfig::default()
        };
        assert!(matches!(config.roster(), Err(Error::IncompleteSources)));
    }
}
