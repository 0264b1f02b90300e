//! Configuration file management for patterns.
//!
//! Provides a TOML config file at `~/.config/patterns/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use patterns_core::mediator::{Action, CyclePolicy, Event, MediatorSettings, ReactionTable};

/// Env var overriding the config file location.
pub const CONFIG_ENV: &str = "PATTERNS_CONFIG";
/// Env var overriding `mediator.max_depth`.
pub const MAX_DEPTH_ENV: &str = "PATTERNS_MAX_DEPTH";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub mediator: MediatorSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediatorSection {
    pub max_depth: Option<usize>,
    /// Accept cyclic reaction tables and rely on `max_depth` instead.
    pub allow_cycles: bool,
    /// Event name -> action names, e.g. `D = ["B", "C"]`.
    pub reactions: Option<BTreeMap<String, Vec<String>>>,
}

impl ConfigFile {
    /// The config `patterns init` writes: the built-in defaults, spelled out.
    pub fn with_defaults() -> Self {
        let reactions: BTreeMap<String, Vec<String>> = ReactionTable::classic()
            .iter()
            .map(|(event, actions): (Event, &[Action])| {
                (
                    event.to_string(),
                    actions.iter().map(|a| a.to_string()).collect(),
                )
            })
            .collect();

        Self {
            mediator: MediatorSection {
                max_depth: Some(MediatorSettings::DEFAULT_MAX_DEPTH),
                allow_cycles: false,
                reactions: Some(reactions),
            },
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the patterns config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/patterns` or
/// `~/.config/patterns`, on every platform.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("patterns");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("patterns")
}

/// Return the default path to the config file.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Pick the config file: `--config` > `PATTERNS_CONFIG` > default path.
///
/// The flag is `true` when the path was given explicitly, in which case a
/// missing file is an error rather than "use defaults".
pub fn config_path(cli_path: Option<&Path>) -> (PathBuf, bool) {
    if let Some(path) = cli_path {
        (path.to_path_buf(), true)
    } else if let Ok(path) = std::env::var(CONFIG_ENV) {
        (PathBuf::from(path), true)
    } else {
        (default_config_path(), false)
    }
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse a config file.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(config)
}

/// Serialize and write a config file, creating parent dirs as needed.
pub fn save_config(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct PatternsConfig {
    pub mediator: MediatorSettings,
    /// The file the settings came from, if one was read.
    pub source: Option<PathBuf>,
}

impl PatternsConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Max depth: `cli_max_depth` > `PATTERNS_MAX_DEPTH` > `mediator.max_depth` > 16
    /// - Reactions: `mediator.reactions` > the classic table
    pub fn resolve(cli_path: Option<&Path>, cli_max_depth: Option<usize>) -> Result<Self> {
        let (path, explicit) = config_path(cli_path);
        let (file_config, source) = if explicit || path.exists() {
            (load_config(&path)?, Some(path))
        } else {
            (ConfigFile::default(), None)
        };
        let section = file_config.mediator;

        // Max depth resolution.
        let max_depth = if let Some(depth) = cli_max_depth {
            depth
        } else if let Ok(raw) = std::env::var(MAX_DEPTH_ENV) {
            raw.trim()
                .parse()
                .with_context(|| format!("{MAX_DEPTH_ENV} is not a valid depth: {raw:?}"))?
        } else if let Some(depth) = section.max_depth {
            depth
        } else {
            MediatorSettings::DEFAULT_MAX_DEPTH
        };
        if max_depth == 0 {
            bail!("mediator max_depth must be at least 1");
        }

        // Reaction table resolution.
        let policy = if section.allow_cycles {
            CyclePolicy::Bounded
        } else {
            CyclePolicy::Reject
        };
        let reactions = match section.reactions {
            Some(ref rules) => ReactionTable::from_names(
                rules
                    .iter()
                    .map(|(event, actions)| (event.as_str(), actions.iter().map(String::as_str))),
                policy,
            )
            .context("invalid [mediator.reactions] in config file")?,
            None => ReactionTable::classic(),
        };

        Ok(Self {
            mediator: MediatorSettings {
                reactions,
                max_depth,
            },
            source,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        save_config(&path, &ConfigFile::with_defaults()).unwrap();
        let loaded = load_config(&path).unwrap();

        assert_eq!(loaded.mediator.max_depth, Some(16));
        assert!(!loaded.mediator.allow_cycles);
        let reactions = loaded.mediator.reactions.unwrap();
        assert_eq!(reactions["A"], vec!["C"]);
        assert_eq!(reactions["D"], vec!["B", "C"]);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let _lock = lock_env();
        unsafe { std::env::remove_var(MAX_DEPTH_ENV) };
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_config(&tmp, "");

        let config = PatternsConfig::resolve(Some(&path), None).unwrap();
        assert_eq!(config.mediator, MediatorSettings::default());
        assert_eq!(config.source.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn resolve_with_cli_flag_overrides_all() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_config(&tmp, "[mediator]\nmax_depth = 5\n");

        unsafe { std::env::set_var(MAX_DEPTH_ENV, "7") };
        let config = PatternsConfig::resolve(Some(&path), Some(9)).unwrap();
        unsafe { std::env::remove_var(MAX_DEPTH_ENV) };

        assert_eq!(config.mediator.max_depth, 9);
    }

    #[test]
    fn resolve_with_env_var_overrides_config_file() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_config(&tmp, "[mediator]\nmax_depth = 5\n");

        unsafe { std::env::set_var(MAX_DEPTH_ENV, "7") };
        let config = PatternsConfig::resolve(Some(&path), None);
        unsafe { std::env::remove_var(MAX_DEPTH_ENV) };

        assert_eq!(config.unwrap().mediator.max_depth, 7);
    }

    #[test]
    fn resolve_uses_config_file_over_default() {
        let _lock = lock_env();
        unsafe { std::env::remove_var(MAX_DEPTH_ENV) };
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_config(&tmp, "[mediator]\nmax_depth = 5\n");

        let config = PatternsConfig::resolve(Some(&path), None).unwrap();
        assert_eq!(config.mediator.max_depth, 5);
    }

    #[test]
    fn invalid_env_depth_is_an_error() {
        let _lock = lock_env();
        unsafe { std::env::set_var(MAX_DEPTH_ENV, "deep") };
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_config(&tmp, "");
        let result = PatternsConfig::resolve(Some(&path), None);
        unsafe { std::env::remove_var(MAX_DEPTH_ENV) };

        let msg = format!("{:#}", result.unwrap_err());
        assert!(msg.contains(MAX_DEPTH_ENV), "unexpected error: {msg}");
    }

    #[test]
    fn zero_depth_is_rejected() {
        let _lock = lock_env();
        unsafe { std::env::remove_var(MAX_DEPTH_ENV) };
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_config(&tmp, "");

        let msg = PatternsConfig::resolve(Some(&path), Some(0))
            .unwrap_err()
            .to_string();
        assert!(msg.contains("at least 1"), "unexpected error: {msg}");
    }

    #[test]
    fn custom_reactions_are_loaded() {
        let _lock = lock_env();
        unsafe { std::env::remove_var(MAX_DEPTH_ENV) };
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_config(&tmp, "[mediator.reactions]\nB = [\"c\"]\n");

        let config = PatternsConfig::resolve(Some(&path), None).unwrap();
        let reactions = &config.mediator.reactions;
        assert_eq!(reactions.reactions_for(Event::B), &[Action::C]);
        assert!(reactions.is_terminal(Event::A));
    }

    #[test]
    fn cyclic_reactions_need_allow_cycles() {
        let _lock = lock_env();
        unsafe { std::env::remove_var(MAX_DEPTH_ENV) };
        let tmp = tempfile::TempDir::new().unwrap();

        let path = write_config(&tmp, "[mediator.reactions]\nA = [\"A\"]\n");
        let msg = format!("{:#}", PatternsConfig::resolve(Some(&path), None).unwrap_err());
        assert!(msg.contains("cycle"), "unexpected error: {msg}");

        let path = write_config(
            &tmp,
            "[mediator]\nallow_cycles = true\n\n[mediator.reactions]\nA = [\"A\"]\n",
        );
        let config = PatternsConfig::resolve(Some(&path), None).unwrap();
        assert!(config.mediator.reactions.find_cycle().is_some());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("missing.toml");

        let msg = format!("{:#}", PatternsConfig::resolve(Some(&path), None).unwrap_err());
        assert!(msg.contains("failed to read config file"), "unexpected error: {msg}");
    }

    #[test]
    fn missing_default_file_falls_back_to_defaults() {
        let _lock = lock_env();
        let tmp = tempfile::TempDir::new().unwrap();
        let orig_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };
        unsafe { std::env::remove_var(CONFIG_ENV) };
        unsafe { std::env::remove_var(MAX_DEPTH_ENV) };

        let result = PatternsConfig::resolve(None, None);

        // Restore env before asserting, to avoid poisoning the mutex on failure.
        match orig_xdg {
            Some(x) => unsafe { std::env::set_var("XDG_CONFIG_HOME", x) },
            None => unsafe { std::env::remove_var("XDG_CONFIG_HOME") },
        }

        let config = result.unwrap();
        assert!(config.source.is_none());
        assert_eq!(config.mediator, MediatorSettings::default());
    }

    #[test]
    fn config_path_prefers_cli_then_env() {
        let _lock = lock_env();
        unsafe { std::env::set_var(CONFIG_ENV, "/tmp/from-env.toml") };
        let (cli, cli_explicit) = config_path(Some(Path::new("/tmp/from-cli.toml")));
        let (env, env_explicit) = config_path(None);
        unsafe { std::env::remove_var(CONFIG_ENV) };

        assert_eq!(cli, PathBuf::from("/tmp/from-cli.toml"));
        assert!(cli_explicit);
        assert_eq!(env, PathBuf::from("/tmp/from-env.toml"));
        assert!(env_explicit);
    }

    #[test]
    fn default_config_path_ends_with_expected_filename() {
        let path = default_config_path();
        assert!(
            path.ends_with("patterns/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
