//! Typed settings resolved from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::LoadError;

pub const DEFAULT_LOCALE: &str = "ml-IN";
pub const DEFAULT_DIAGNOSIS_DELAY_MS: u64 = 1200;

const PROFILE_DB_VAR: &str = "AGRI_PROFILE_DB";
const LOCALE_VAR: &str = "AGRI_LOCALE";
const DIAGNOSIS_DELAY_VAR: &str = "AGRI_DIAGNOSIS_DELAY_MS";
const LOG_DIR_VAR: &str = "AGRI_LOG_DIR";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// SQLite file holding the profile blob.
    pub profile_db: PathBuf,
    /// Locale tag for speech, e.g. `ml-IN`. Validated by the caller.
    pub locale: String,
    pub diagnosis_delay: Duration,
    /// When set, logs go to a daily file in this directory instead of stderr.
    pub log_dir: Option<PathBuf>,
}

/// `<data_dir>/agri/profile.db`, or `./agri-profile.db` when no data dir is known.
fn default_profile_db() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("agri").join("profile.db"))
        .unwrap_or_else(|| PathBuf::from("agri-profile.db"))
}

impl Settings {
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LoadError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let diagnosis_delay = match get(DIAGNOSIS_DELAY_VAR) {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| LoadError::InvalidValue {
                    key: DIAGNOSIS_DELAY_VAR,
                    value: v,
                })?,
            None => Duration::from_millis(DEFAULT_DIAGNOSIS_DELAY_MS),
        };

        Ok(Self {
            profile_db: get(PROFILE_DB_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_profile_db),
            locale: get(LOCALE_VAR).unwrap_or_else(|| DEFAULT_LOCALE.to_string()),
            diagnosis_delay,
            log_dir: get(LOG_DIR_VAR).map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, LoadError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.locale, "ml-IN");
        assert_eq!(s.diagnosis_delay, Duration::from_millis(1200));
        assert!(s.log_dir.is_none());
        assert!(s.profile_db.ends_with("profile.db"));
    }

    #[test]
    fn values_from_env() {
        let s = settings(&[
            ("AGRI_PROFILE_DB", "/tmp/agri/p.db"),
            ("AGRI_LOCALE", "en-IN"),
            ("AGRI_DIAGNOSIS_DELAY_MS", " 0 "),
            ("AGRI_LOG_DIR", "/var/log/agri"),
        ])
        .unwrap();
        assert_eq!(s.profile_db, PathBuf::from("/tmp/agri/p.db"));
        assert_eq!(s.locale, "en-IN");
        assert_eq!(s.diagnosis_delay, Duration::ZERO);
        assert_eq!(s.log_dir, Some(PathBuf::from("/var/log/agri")));
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let s = settings(&[("AGRI_LOCALE", ""), ("AGRI_LOG_DIR", "  ")]).unwrap();
        assert_eq!(s.locale, DEFAULT_LOCALE);
        assert!(s.log_dir.is_none());
    }

    #[test]
    fn bad_delay_is_invalid_value() {
        let err = settings(&[("AGRI_DIAGNOSIS_DELAY_MS", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            LoadError::InvalidValue { key: "AGRI_DIAGNOSIS_DELAY_MS", .. }
        ));
    }
}
