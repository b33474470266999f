/// Config file loading and creation for prefsort CLI.
///
/// Config lives at ~/.config/prefsort/config.toml.
/// All fields are optional; CLI args override config values.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

/// Default upper bound on the number of items in one session.
pub const DEFAULT_MAX_ITEMS: usize = 100;

/// Default item count above which the CLI warns about the number of questions.
pub const DEFAULT_LARGE_ITEM_WARNING: usize = 25;

#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PrefsortConfig {
    pub exhaustive_threshold: Option<usize>,
    pub max_items: Option<usize>,
    pub large_item_warning: Option<usize>,
    pub json: Option<bool>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# prefsort configuration
# All values here can be overridden by CLI flags.

# Rank every pair when there are at most this many items;
# above it the adaptive (quicksort-like) strategy is used.
# exhaustive_threshold = 10

# Refuse sessions with more items than this.
# max_items = 100

# Print a warning about the number of questions above this many items.
# large_item_warning = 25

# Print results as JSON instead of a table.
# json = false
";

/// Returns the default config path: ~/.config/prefsort/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("prefsort").join("config.toml")
}

/// Parse config file content.
pub fn parse_config(content: &str) -> Result<PrefsortConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> PrefsortConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => PrefsortConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file. Errors if it already exists.
pub fn create_default_config() -> PathBuf {
    let path = config_path();

    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(&path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));

    path
}
