//! Configuration for agri.
//!
//! [`load_and_apply`] layers XDG `config.toml` and a project `.env` under the process
//! environment with priority **existing env > .env > XDG**. [`Settings`] then reads the
//! typed values the assistant needs from that environment.

mod dotenv;
mod settings;
mod xdg_toml;

pub use settings::{Settings, DEFAULT_DIAGNOSIS_DELAY_MS, DEFAULT_LOCALE};

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
    #[error("invalid {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Picks a value per key: `.env` first, then XDG. Keys already present according to
/// `is_set` are left out.
fn merge(
    dotenv: HashMap<String, String>,
    mut xdg: HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> HashMap<String, String> {
    xdg.extend(dotenv);
    xdg.retain(|k, _| !is_set(k));
    xdg
}

/// Loads `$XDG_CONFIG_HOME/<app_name>/config.toml` (`[env]` table) and `.env` from
/// `dotenv_dir` (current directory when `None`), and sets every variable that is not
/// already in the process environment.
pub fn load_and_apply(app_name: &str, dotenv_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg = xdg_toml::load_env_map(app_name)?;
    let dotenv = dotenv::load_env_map(dotenv_dir).map_err(LoadError::DotenvRead)?;
    for (key, value) in merge(dotenv, xdg, |k| std::env::var_os(k).is_some()) {
        std::env::set_var(key, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn dotenv_beats_xdg() {
        let merged = merge(
            map(&[("AGRI_LOCALE", "en-IN")]),
            map(&[("AGRI_LOCALE", "ml-IN"), ("AGRI_LOG", "info")]),
            |_| false,
        );
        assert_eq!(merged["AGRI_LOCALE"], "en-IN");
        assert_eq!(merged["AGRI_LOG"], "info");
    }

    #[test]
    fn existing_env_is_never_overridden() {
        let merged = merge(
            map(&[("AGRI_LOCALE", "en-IN")]),
            map(&[("AGRI_LOG", "info")]),
            |k| k == "AGRI_LOCALE",
        );
        assert!(!merged.contains_key("AGRI_LOCALE"));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn apply_sets_only_missing_vars() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".env"),
            "CONFIG_TEST_APPLY_EXISTING=from_dotenv\nCONFIG_TEST_APPLY_NEW=from_dotenv\n",
        )
        .unwrap();
        std::env::set_var("CONFIG_TEST_APPLY_EXISTING", "from_env");
        std::env::remove_var("CONFIG_TEST_APPLY_NEW");

        load_and_apply("config-crate-test-nonexistent-app", Some(dir.path())).unwrap();
        assert_eq!(
            std::env::var("CONFIG_TEST_APPLY_EXISTING").as_deref(),
            Ok("from_env")
        );
        assert_eq!(
            std::env::var("CONFIG_TEST_APPLY_NEW").as_deref(),
            Ok("from_dotenv")
        );

        std::env::remove_var("CONFIG_TEST_APPLY_EXISTING");
        std::env::remove_var("CONFIG_TEST_APPLY_NEW");
    }

    #[test]
    fn no_config_anywhere_is_ok() {
        let empty = tempfile::tempdir().unwrap();
        assert!(load_and_apply("config-crate-test-nonexistent-app", Some(empty.path())).is_ok());
    }
}
