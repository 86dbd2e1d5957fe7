// Configuration loading and parsing (config/draftboard.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::guidance::TeamCount;
use crate::store::DEFAULT_STORAGE_KEY;

/// Name of the config file inside `config/` and `defaults/`.
pub const CONFIG_FILE: &str = "draftboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

/// Fully resolved configuration. Relative paths in the file are resolved
/// against the directory the config was loaded from.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub guidance_path: Option<PathBuf>,
    pub db_path: PathBuf,
    pub storage_key: String,
    pub team_count: TeamCount,
    pub draft_slot: u32,
}

// ---------------------------------------------------------------------------
// draftboard.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    catalog: CatalogSection,
    #[serde(default)]
    guidance: GuidanceSection,
    #[serde(default)]
    storage: StorageSection,
    #[serde(default)]
    session: SessionSection,
}

#[derive(Debug, Clone, Deserialize)]
struct CatalogSection {
    path: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct GuidanceSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct StorageSection {
    db_path: Option<String>,
    #[serde(default = "default_storage_key")]
    key: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        StorageSection {
            db_path: None,
            key: default_storage_key(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

#[derive(Debug, Clone, Deserialize)]
struct SessionSection {
    #[serde(default = "default_team_count")]
    team_count: u32,
    #[serde(default = "default_draft_slot")]
    draft_slot: u32,
}

impl Default for SessionSection {
    fn default() -> Self {
        SessionSection {
            team_count: default_team_count(),
            draft_slot: default_draft_slot(),
        }
    }
}

fn default_team_count() -> u32 {
    12
}

fn default_draft_slot() -> u32 {
    1
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/draftboard.toml` relative to `base_dir`.
///
/// Does not copy defaults; prefer `load_config()` for normal startup.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path, base_dir)
}

/// Parse config text. `path` is only used in error messages; relative paths
/// in the text resolve against `base_dir`.
pub fn parse_config(text: &str, path: &Path, base_dir: &Path) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&file)?;

    // validate() has already rejected unsupported sizes
    let team_count = TeamCount::from_size(file.session.team_count).unwrap_or_default();

    let db_path = match file.storage.db_path.as_deref() {
        Some(p) => resolve(base_dir, p),
        None => default_db_path(base_dir),
    };

    Ok(Config {
        catalog_path: resolve(base_dir, &file.catalog.path),
        guidance_path: file
            .guidance
            .path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| resolve(base_dir, p)),
        db_path,
        storage_key: file.storage.key,
        team_count,
        draft_slot: file.session.draft_slot,
    })
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Load config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn resolve(base_dir: &Path, p: &str) -> PathBuf {
    let p = Path::new(p);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

/// `draftboard.db` in the platform data directory, or in `base_dir` when the
/// platform has no home directory.
pub fn default_db_path(base_dir: &Path) -> PathBuf {
    match directories::ProjectDirs::from("", "", "draftboard") {
        Some(dirs) => dirs.data_dir().join("draftboard.db"),
        None => base_dir.join("draftboard.db"),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(file: &ConfigFile) -> Result<(), ConfigError> {
    if file.catalog.path.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "catalog.path".into(),
            message: "must not be empty".into(),
        });
    }

    if file.storage.key.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "storage.key".into(),
            message: "must not be empty".into(),
        });
    }

    let teams = file.session.team_count;
    let Some(team_count) = TeamCount::from_size(teams) else {
        return Err(ConfigError::ValidationError {
            field: "session.team_count".into(),
            message: format!("must be 10 or 12, got {teams}"),
        });
    };

    let slot = file.session.draft_slot;
    if !(1..=team_count.size()).contains(&slot) {
        return Err(ConfigError::ValidationError {
            field: "session.draft_slot".into(),
            message: format!("must be between 1 and {teams}, got {slot}"),
        });
    }

    Ok(())
}
