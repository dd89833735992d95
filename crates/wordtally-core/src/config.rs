//! Settings for analysis and logging, merged from files and the environment.
//!
//! Layers, lowest first:
//!
//! 1. built-in defaults
//! 2. `config.<ext>` in the user config directory (`~/.config/wordtally/` on Linux)
//! 3. `.wordtally.<ext>` then `wordtally.<ext>` in the nearest directory,
//!    walking up from the search root, that has either (the walk stops at a
//!    directory containing `.git`)
//! 4. files added with [`ConfigLoader::with_file`], in order
//! 5. `WORDTALLY_*` environment variables (`WORDTALLY_TOP_WORDS=5`)
//!
//! Within one directory the extensions merge as toml < yaml < yml < json.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use wordtally_core::config::ConfigLoader;
//!
//! let (config, sources) = ConfigLoader::new()
//!     .with_project_search(Utf8Path::new("."))
//!     .load()?;
//! println!("top {} words from {} file(s)", config.top_words, sources.files().count());
//! # Ok::<(), wordtally_core::ConfigError>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::files::DEFAULT_MAX_INPUT_BYTES;
use crate::report::DEFAULT_TOP_WORDS;

const APP_NAME: &str = "wordtally";
const ENV_PREFIX: &str = "WORDTALLY_";
const EXTENSIONS: [&str; 4] = ["toml", "yaml", "yml", "json"];
/// Project file stems, lower precedence first.
const PROJECT_STEMS: [&str; 2] = [".wordtally", "wordtally"];
/// A directory holding this entry ends the upward search.
const BOUNDARY: &str = ".git";

/// Effective settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Ranked words listed in each report.
    pub top_words: usize,
    /// Input size cap in bytes; the built-in 5 MiB applies when unset.
    pub max_input_bytes: Option<usize>,
    /// Accept input of any size.
    pub disable_input_limit: bool,
    /// Level for the JSONL log file.
    pub log_level: LogLevel,
    /// Directory for the JSONL log file. No file logging when unset.
    pub log_dir: Option<Utf8PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            top_words: DEFAULT_TOP_WORDS,
            max_input_bytes: None,
            disable_input_limit: false,
            log_level: LogLevel::Info,
            log_dir: None,
        }
    }
}

impl Config {
    /// The input cap to enforce, or `None` when the limit is disabled.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit).then(|| self.max_input_bytes.unwrap_or(DEFAULT_MAX_INPUT_BYTES))
    }
}

/// Log file verbosity.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogLevel {
    /// Everything, including per-command detail.
    Debug,
    /// Normal operation.
    #[default]
    Info,
    /// Recoverable problems only.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as an `EnvFilter` directive.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The files that went into a [`Config`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// User-level file, if one exists.
    pub user_file: Option<Utf8PathBuf>,
    /// Files from the nearest project directory, in merge order.
    pub project_files: Vec<Utf8PathBuf>,
    /// Files passed explicitly, in merge order.
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Every merged file, lowest precedence first.
    pub fn files(&self) -> impl Iterator<Item = &Utf8Path> {
        self.user_file
            .iter()
            .chain(&self.project_files)
            .chain(&self.explicit_files)
            .map(Utf8PathBuf::as_path)
    }
}

/// Builder that merges the configuration layers.
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that reads the user config and nothing else yet.
    pub const fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            explicit_files: Vec::new(),
        }
    }

    /// Look for project files from `dir` upward.
    pub fn with_project_search(mut self, dir: impl AsRef<Utf8Path>) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user config file.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Merge `path` above every discovered file.
    pub fn with_file(mut self, path: impl AsRef<Utf8Path>) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge all layers into a [`Config`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Deserialize`] when a file cannot be parsed or
    /// a value has the wrong type. A missing explicit file is an error too.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = ConfigSources {
            user_file: self.user_config.then(find_user_file).flatten(),
            project_files: self
                .search_root
                .as_deref()
                .map(discover_project_files)
                .unwrap_or_default(),
            explicit_files: self.explicit_files,
        };

        let figment = sources.files().fold(
            Figment::from(Serialized::defaults(Config::default())),
            merge_file,
        );
        let config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).lowercase(true))
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;

        tracing::debug!(
            files = sources.files().count(),
            top_words = config.top_words,
            input_limit = ?config.input_limit(),
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
    let path = path.as_str();
    match Utf8Path::new(path).extension() {
        Some("json") => figment.merge(Json::file_exact(path)),
        Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
        _ => figment.merge(Toml::file_exact(path)),
    }
}

/// Project files in the nearest directory (from `start` up) that has any.
///
/// A directory containing `.git` is still searched, but nothing above it is.
fn discover_project_files(start: &Utf8Path) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = PROJECT_STEMS
            .iter()
            .flat_map(|stem| EXTENSIONS.iter().map(move |ext| dir.join(format!("{stem}.{ext}"))))
            .filter(|path| path.is_file())
            .collect();
        if !found.is_empty() {
            return found;
        }
        if dir != start && dir.join(BOUNDARY).exists() {
            break;
        }
    }
    Vec::new()
}

fn find_user_file() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("config.{ext}")))
        .find(|path| path.is_file())
}

/// Per-user configuration directory, if the platform has one.
fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()
    }

    #[test]
    fn input_limit_resolution() {
        let mut config = Config::default();
        assert_eq!(config.input_limit(), Some(DEFAULT_MAX_INPUT_BYTES));

        config.max_input_bytes = Some(1024);
        assert_eq!(config.input_limit(), Some(1024));

        config.disable_input_limit = true;
        assert_eq!(config.input_limit(), None);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: Config = serde_yaml::from_str("top_words: 15\nlog_level: warn\n").unwrap();
        assert_eq!(config.top_words, 15);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.input_limit(), Some(DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn discovery_prefers_nearest_directory() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_root(&tmp);
        let inner = root.join("a").join("b");
        fs::create_dir_all(&inner).unwrap();
        fs::write(root.join("wordtally.toml"), "top_words = 1\n").unwrap();
        fs::write(root.join("a").join(".wordtally.yml"), "top_words: 2\n").unwrap();

        let found = discover_project_files(&inner);
        assert_eq!(found, vec![root.join("a").join(".wordtally.yml")]);
    }

    #[test]
    fn discovery_orders_dotfile_before_plain_name() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_root(&tmp);
        fs::write(root.join("wordtally.json"), "{}").unwrap();
        fs::write(root.join(".wordtally.toml"), "").unwrap();

        let found = discover_project_files(&root);
        assert_eq!(
            found,
            vec![root.join(".wordtally.toml"), root.join("wordtally.json")]
        );
    }

    #[test]
    fn discovery_stops_above_repository_root() {
        let tmp = TempDir::new().unwrap();
        let root = utf8_root(&tmp);
        let repo = root.join("repo");
        let work = repo.join("src");
        fs::create_dir_all(&work).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();
        fs::write(root.join(".wordtally.toml"), "top_words = 2\n").unwrap();

        assert!(discover_project_files(&work).is_empty());

        fs::write(repo.join(".wordtally.toml"), "top_words = 4\n").unwrap();
        assert_eq!(discover_project_files(&work), vec![repo.join(".wordtally.toml")]);
    }

    #[test]
    fn wrong_value_type_is_a_deserialize_error() {
        let tmp = TempDir::new().unwrap();
        let path = utf8_root(&tmp).join("bad.toml");
        fs::write(&path, "top_words = \"many\"\n").unwrap();

        let result = ConfigLoader::new()
            .with_user_config(false)
            .with_file(&path)
            .load();
        assert!(matches!(result, Err(ConfigError::Deserialize(_))));
    }

    #[test]
    fn sources_list_files_in_merge_order() {
        let sources = ConfigSources {
            user_file: Some("u.toml".into()),
            project_files: vec![".wordtally.toml".into()],
            explicit_files: vec!["x.json".into()],
        };
        let names: Vec<&str> = sources.files().map(Utf8Path::as_str).collect();
        assert_eq!(names, vec!["u.toml", ".wordtally.toml", "x.json"]);
    }
}
