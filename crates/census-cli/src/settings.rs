//! Runtime configuration.
//!
//! Layered lowest to highest: built-in defaults, the optional TOML file,
//! then `CENSUS_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Default location of the SQLite database.
const DEFAULT_STORE_PATH: &str = "census.db";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub store_path: PathBuf,
}

impl Settings {
  /// Load settings from `file` (which need not exist) and the environment.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let raw = config::Config::builder()
      .set_default("store_path", DEFAULT_STORE_PATH)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("CENSUS"))
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    let mut settings: Settings = raw
      .try_deserialize()
      .context("failed to deserialise Settings")?;
    settings.store_path = expand_tilde(&settings.store_path);
    Ok(settings)
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

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let settings = Settings::load(Path::new("does-not-exist.toml")).unwrap();
    // CENSUS_STORE_PATH may be set in the environment running the tests.
    if std::env::var_os("CENSUS_STORE_PATH").is_none() {
      assert_eq!(settings.store_path, PathBuf::from(DEFAULT_STORE_PATH));
    }
  }

  #[test]
  fn tilde_expands_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/census/census.db")),
      PathBuf::from(home).join("census/census.db")
    );
    assert_eq!(expand_tilde(Path::new("/tmp/x.db")), PathBuf::from("/tmp/x.db"));
  }
}
