//! `[env]` table of `$XDG_CONFIG_HOME/<app>/config.toml`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, String>,
}

fn config_home() -> Result<PathBuf, LoadError> {
    let base = cross_xdg::BaseDirs::new().map_err(|e| LoadError::XdgPath(e.to_string()))?;
    Ok(base.config_home().to_path_buf())
}

/// Reads `<config_home>/<app_name>/config.toml`. A missing file or section is an empty map.
pub fn load_env_map_in(config_home: &Path, app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    let path = config_home.join(app_name).join("config.toml");
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let file: ConfigFile = toml::from_str(&content)?;
    Ok(file.env)
}

pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    load_env_map_in(&config_home()?, app_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(home: &Path, app: &str, body: &str) {
        let dir = home.join(app);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), body).unwrap();
    }

    #[test]
    fn missing_file_is_empty() {
        let home = tempfile::tempdir().unwrap();
        assert!(load_env_map_in(home.path(), "agri").unwrap().is_empty());
    }

    #[test]
    fn reads_env_table() {
        let home = tempfile::tempdir().unwrap();
        write_config(
            home.path(),
            "agri",
            "[env]\nAGRI_LOCALE = \"en-IN\"\nAGRI_LOG = \"info\"\n",
        );
        let m = load_env_map_in(home.path(), "agri").unwrap();
        assert_eq!(m["AGRI_LOCALE"], "en-IN");
        assert_eq!(m["AGRI_LOG"], "info");
    }

    #[test]
    fn other_tables_are_ignored() {
        let home = tempfile::tempdir().unwrap();
        write_config(home.path(), "agri", "[ui]\ntheme = \"green\"\n");
        assert!(load_env_map_in(home.path(), "agri").unwrap().is_empty());
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let home = tempfile::tempdir().unwrap();
        write_config(home.path(), "agri", "[env\nbroken");
        assert!(matches!(
            load_env_map_in(home.path(), "agri"),
            Err(LoadError::XdgParse(_))
        ));
    }
}
