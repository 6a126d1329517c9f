use std::env;
use std::path::PathBuf;

pub const SOURCE_PATH_ENV_VAR: &str = "FOOD_SOURCE_PATH";
pub const DATASET_PATH_ENV_VAR: &str = "FOOD_DATASET_PATH";

const DEFAULT_SOURCE_PATH: &str = "data/food_composition.csv";
const DEFAULT_DATASET_PATH: &str = "data/foods.json";

/// File locations for the builder and the lookup engine.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub source_path: PathBuf,
    pub dataset_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE_PATH),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
        }
    }
}

impl AppConfig {
    /// Reads the process environment (populate it from `.env` first).
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty()).map(PathBuf::from);
        Self {
            source_path: non_empty(SOURCE_PATH_ENV_VAR).unwrap_or(defaults.source_path),
            dataset_path: non_empty(DATASET_PATH_ENV_VAR).unwrap_or(defaults.dataset_path),
        }
    }

    /// Command-line values take precedence over the environment.
    pub fn with_overrides(mut self, source_path: Option<PathBuf>, dataset_path: Option<PathBuf>) -> Self {
        if let Some(path) = source_path {
            self.source_path = path;
        }
        if let Some(path) = dataset_path {
            self.dataset_path = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_vars(|_| None);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_values_and_blank_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (SOURCE_PATH_ENV_VAR, "/srv/table.csv"),
            (DATASET_PATH_ENV_VAR, "  "),
        ]);
        let config = AppConfig::from_vars(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.source_path, PathBuf::from("/srv/table.csv"));
        assert_eq!(config.dataset_path, PathBuf::from(DEFAULT_DATASET_PATH));
    }

    #[test]
    fn test_overrides_win() {
        let config = AppConfig::default().with_overrides(None, Some(PathBuf::from("out.json")));
        assert_eq!(config.source_path, PathBuf::from(DEFAULT_SOURCE_PATH));
        assert_eq!(config.dataset_path, PathBuf::from("out.json"));
    }
}
