//! Configuration and logging setup for beanfix.
//!
//! Configuration is read from TOML. Every field has a default, so an empty
//! file (or no file at all) is a valid configuration:
//!
//! ```toml
//! [logging]
//! level = "info"
//! json = false
//!
//! [content_assist]
//! max_similar_candidates = 5
//! fuzzy = true
//!
//! [proposals]
//! style = "edits"
//! indent = "    "
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Mutex, Once};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable naming an explicit config file.
pub const BEANFIX_CONFIG_ENV_VAR: &str = "BEANFIX_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse toml config: {0}")]
    Toml(String),
    #[error("invalid value for `{field}`: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        // The default `Display` embeds a snippet of the input; keep only the message.
        ConfigError::Toml(err.message().to_owned())
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuickfixConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rename candidates offered next to creation proposals.
    #[serde(default)]
    pub content_assist: ContentAssistConfig,

    #[serde(default)]
    pub proposals: ProposalsConfig,
}

impl QuickfixConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: QuickfixConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Semantic checks that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.proposals.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::Invalid {
                field: "proposals.indent",
                message: "must contain only spaces and tabs".to_owned(),
            });
        }
        if EnvFilter::try_new(LoggingConfig::directives(&self.logging.level)).is_err() {
            return Err(ConfigError::Invalid {
                field: "logging.level",
                message: "not a level or filter directive".to_owned(),
            });
        }
        Ok(())
    }
}

/// Locate a config file for `root`.
///
/// `BEANFIX_CONFIG` wins when set (relative paths resolve against `root`);
/// otherwise `beanfix.toml` and `.beanfix.toml` are tried in order.
pub fn discover_config_path(root: &Path) -> Option<PathBuf> {
    if let Some(value) = std::env::var_os(BEANFIX_CONFIG_ENV_VAR) {
        let candidate = PathBuf::from(value);
        return Some(if candidate.is_absolute() {
            candidate
        } else {
            root.join(candidate)
        });
    }

    ["beanfix.toml", ".beanfix.toml"]
        .into_iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Load the configuration for `root`, falling back to defaults when no file
/// exists.
pub fn load_for_root(root: &Path) -> Result<(QuickfixConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = discover_config_path(root) else {
        return Ok((QuickfixConfig::default(), None));
    };
    let config = QuickfixConfig::load(&path)?;
    tracing::debug!(target: "beanfix.config", path = %path.display(), "loaded config");
    Ok((config, Some(path)))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// A simple level (`info`, `debug`, ...) or `EnvFilter` directives.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,

    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,

    /// Append logs to this file. If it cannot be opened, file logging is
    /// disabled and the other sinks stay active.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// The configured level as filter directives. Bare level names are
    /// case-insensitive and `warning` is accepted; anything else passes
    /// through untouched.
    pub(crate) fn directives(level: &str) -> String {
        let level = level.trim();
        if level.is_empty() {
            return Self::default_level();
        }
        let lower = level.to_ascii_lowercase();
        match lower.as_str() {
            "warning" => "warn".to_owned(),
            "trace" | "debug" | "info" | "warn" | "error" => lower,
            _ => level.to_owned(),
        }
    }

    fn configured_filter(&self) -> EnvFilter {
        EnvFilter::try_new(Self::directives(&self.level))
            .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::INFO.into()))
    }

    /// Effective filter: the configured level, refined by `RUST_LOG` when set.
    pub fn env_filter(&self) -> EnvFilter {
        let Some(from_env) = std::env::var("RUST_LOG")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
        else {
            return self.configured_filter();
        };

        let merged = format!("{},{from_env}", Self::directives(&self.level));
        EnvFilter::try_new(merged)
            .or_else(|_| EnvFilter::try_new(&from_env))
            .unwrap_or_else(|_| self.configured_filter())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContentAssistConfig {
    /// Upper bound on "Change to '...'" proposals per diagnostic. `0` disables
    /// rename proposals.
    #[serde(default = "ContentAssistConfig::default_max_similar_candidates")]
    pub max_similar_candidates: usize,

    /// When false only case-insensitive matches are offered as renames.
    #[serde(default = "default_true")]
    pub fuzzy: bool,
}

impl ContentAssistConfig {
    fn default_max_similar_candidates() -> usize {
        5
    }
}

impl Default for ContentAssistConfig {
    fn default() -> Self {
        Self {
            max_similar_candidates: Self::default_max_similar_candidates(),
            fuzzy: true,
        }
    }
}

/// How proposals carry their effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStyleKind {
    /// Concrete document and Java source edits.
    #[default]
    Edits,
    /// Serializable commands executed by the host.
    Commands,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProposalsConfig {
    #[serde(default)]
    pub style: ProposalStyleKind,

    /// Indentation unit for generated XML and Java.
    #[serde(default = "ProposalsConfig::default_indent")]
    pub indent: String,
}

impl ProposalsConfig {
    fn default_indent() -> String {
        "    ".to_owned()
    }
}

impl Default for ProposalsConfig {
    fn default() -> Self {
        Self {
            style: ProposalStyleKind::default(),
            indent: Self::default_indent(),
        }
    }
}

fn default_true() -> bool {
    true
}

static TRACING_INIT: Once = Once::new();

/// Writer fanning out to the configured sinks, and whether the log file was
/// requested but could not be opened.
fn log_writer(config: &LoggingConfig) -> (BoxMakeWriter, bool) {
    let mut writer = BoxMakeWriter::new(std::io::sink);
    if config.stderr {
        writer = BoxMakeWriter::new(writer.and(std::io::stderr));
    }
    let Some(path) = config.file.as_deref() else {
        return (writer, false);
    };
    match std::fs::OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => (BoxMakeWriter::new(writer.and(Mutex::new(file))), false),
        Err(_) => (writer, true),
    }
}

/// Install the global `tracing` subscriber described by `config`.
///
/// Only the first call in a process does anything. Returns whether that call
/// installed the subscriber; `false` also when the embedding host had
/// already set one.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let mut installed = false;
    TRACING_INIT.call_once(|| {
        let (writer, file_failed) = log_writer(config);
        let fmt = tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false);
        let layer: Box<dyn Layer<_> + Send + Sync> = if config.json {
            fmt.json().boxed()
        } else {
            fmt.boxed()
        };

        let subscriber = tracing_subscriber::registry()
            .with(config.env_filter())
            .with(layer);
        installed = tracing::subscriber::set_global_default(subscriber).is_ok();

        if let (true, true, Some(path)) = (installed, file_failed, config.file.as_ref()) {
            tracing::warn!(
                target: "beanfix.config",
                path = %path.display(),
                "cannot open log file; logging to the remaining sinks"
            );
        }
    });
    installed
}
