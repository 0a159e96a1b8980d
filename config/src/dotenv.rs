//! `.env` reader: `KEY=VALUE` lines into a map. Applying to the process env happens in lib.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

const DOTENV_FILE: &str = ".env";

/// `.env` inside `dir`, or inside the current directory when `dir` is `None`.
fn locate(dir: Option<&Path>) -> Option<PathBuf> {
    let base = match dir {
        Some(d) => d.to_path_buf(),
        None => std::env::current_dir().ok()?,
    };
    Some(base.join(DOTENV_FILE)).filter(|p| p.is_file())
}

/// Strips one pair of matching quotes. Double quotes honour `\"`; single quotes are literal.
fn unquote(raw: &str) -> String {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return raw[1..raw.len() - 1].replace("\\\"", "\"");
    }
    if raw.len() >= 2 && raw.starts_with('\'') && raw.ends_with('\'') {
        return raw[1..raw.len() - 1].to_string();
    }
    raw.to_string()
}

/// One line into a pair. Blank lines, `#` comments, lines without `=` and empty keys yield `None`.
/// A leading `export ` is ignored.
fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value.trim())))
}

fn parse(content: &str) -> HashMap<String, String> {
    content.lines().filter_map(parse_line).collect()
}

/// Reads `.env` from `dir` (or the current directory). No file means an empty map.
pub fn load_env_map(dir: Option<&Path>) -> std::io::Result<HashMap<String, String>> {
    match locate(dir) {
        Some(path) => Ok(parse(&std::fs::read_to_string(path)?)),
        None => Ok(HashMap::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_comments_and_blank_lines() {
        let m = parse("# agri settings\n\nAGRI_LOCALE=en-IN\n  AGRI_LOG = debug  \n");
        assert_eq!(m.len(), 2);
        assert_eq!(m["AGRI_LOCALE"], "en-IN");
        assert_eq!(m["AGRI_LOG"], "debug");
    }

    #[test]
    fn quotes_are_stripped() {
        let m = parse("A=\"two words\"\nB='single'\nC=\"say \\\"hi\\\"\"\nD=\"\"\n");
        assert_eq!(m["A"], "two words");
        assert_eq!(m["B"], "single");
        assert_eq!(m["C"], "say \"hi\"");
        assert_eq!(m["D"], "");
    }

    #[test]
    fn hash_inside_value_is_kept() {
        let m = parse("AGRI_PROFILE_DB=/tmp/farm#1.db\n");
        assert_eq!(m["AGRI_PROFILE_DB"], "/tmp/farm#1.db");
    }

    #[test]
    fn export_prefix_is_ignored() {
        let m = parse("export AGRI_LOCALE=ml-IN\n");
        assert_eq!(m["AGRI_LOCALE"], "ml-IN");
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let m = parse("NO_EQUALS\n=orphan\nOK=1\nEMPTY=\n");
        assert_eq!(m.len(), 2);
        assert_eq!(m["OK"], "1");
        assert_eq!(m["EMPTY"], "");
    }

    #[test]
    fn missing_file_is_empty_map() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_env_map(Some(dir.path())).unwrap().is_empty());
    }

    #[test]
    fn reads_file_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "AGRI_DIAGNOSIS_DELAY_MS=10\n").unwrap();
        let m = load_env_map(Some(dir.path())).unwrap();
        assert_eq!(m["AGRI_DIAGNOSIS_DELAY_MS"], "10");
    }
}
