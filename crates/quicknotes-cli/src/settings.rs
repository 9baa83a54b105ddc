//! Runtime configuration.
//!
//! Layered, lowest priority first: built-in defaults, the optional TOML file
//! given with `--config`, then `QUICKNOTES_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

const DEFAULT_STORE_PATH: &str = "~/.local/share/quicknotes/notes.db";
const DEFAULT_ACCOUNT_PATH: &str = "~/.local/share/quicknotes/account.json";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
  /// SQLite database file.
  pub store_path:   PathBuf,
  /// JSON file recording the signed-in account.
  pub account_path: PathBuf,
  /// Default tracing level; `RUST_LOG` still wins.
  pub log_level:    String,
}

impl CliConfig {
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .set_default("account_path", DEFAULT_ACCOUNT_PATH)?
      .set_default("log_level", DEFAULT_LOG_LEVEL)?
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(config::Environment::with_prefix("QUICKNOTES"))
      .build()
      .context("failed to read config file")?;

    let mut cfg: CliConfig = settings
      .try_deserialize()
      .context("failed to deserialise config")?;

    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.account_path = expand_tilde(&cfg.account_path);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
