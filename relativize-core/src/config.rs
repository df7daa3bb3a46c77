use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A raw find/replace pair as written in the config file. The find side is
/// a regular expression; the replace side is a literal string (an empty
/// string deletes every occurrence of the pattern).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawRule {
    pub find: String,
    pub replace: String,
}

impl RawRule {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }
}

/// Immutable run configuration. Every path constant and rule lives here,
/// so tests can inject their own rule sets instead of relying on the
/// hard-coded defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Absolute path of the core project directory whose prefix gets
    /// rewritten to a relative one.
    #[serde(default = "default_core_dir")]
    pub core_dir: String,

    /// Relative path substituted into `projectDirPath` assignments.
    #[serde(default = "default_core_lib_dir")]
    pub core_lib_dir: String,

    /// Relative path that replaces `SYMROOT` assignments (as `BUILD_DIR`).
    #[serde(default = "default_build_dir")]
    pub build_dir: String,

    /// Extension substrings that make a file eligible for rewriting.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Secondary identifier renames, applied after the path rules.
    #[serde(default = "default_renames")]
    pub renames: Vec<RawRule>,

    /// Extra regex rules appended to the built-in path rules.
    #[serde(default)]
    pub extra_rules: Vec<RawRule>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            core_dir: default_core_dir(),
            core_lib_dir: default_core_lib_dir(),
            build_dir: default_build_dir(),
            extensions: default_extensions(),
            renames: default_renames(),
            extra_rules: vec![],
        }
    }
}

fn default_core_dir() -> String {
    "/Volumes/DATA/Code/Provenance/Cores/Flycast".to_string()
}

fn default_core_lib_dir() -> String {
    "../flycast".to_string()
}

fn default_build_dir() -> String {
    "../lib".to_string()
}

fn default_extensions() -> Vec<String> {
    vec![".pbxproj".to_string(), ".xcscheme".to_string()]
}

fn default_renames() -> Vec<RawRule> {
    // CMake emits the debug fmt target as plain `fmt`; Xcode wants `fmtd`.
    vec![RawRule::new(" = fmt;", " = fmtd;")]
}

impl Config {
    /// Load config from ./relativize.toml if it exists, else use defaults.
    pub fn load() -> Result<Self> {
        if let Ok(cwd) = std::env::current_dir() {
            let config_path = cwd.join("relativize.toml");
            if config_path.exists() {
                return Self::load_from_path(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }
}
