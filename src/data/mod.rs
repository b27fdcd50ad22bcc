//! Site data tables.
//!
//! Every `*.yaml`, `*.yml` and `*.json` file directly inside the data
//! directory becomes a template variable named after its file stem:
//!
//! ```text
//! data/events.yaml   ->  {% for event in events %}
//! data/videos.json   ->  {{ videos | length }}
//! ```

use crate::compiler::{BuildError, BuildResult};
use crate::debug;
use jwalk::WalkDir;
use serde_json::Value;
use std::{collections::BTreeMap, fs, io, path::Path};

/// Load all data tables under `dir`. A missing directory means no data.
pub fn load_tables(dir: &Path) -> BuildResult<BTreeMap<String, Value>> {
    let mut tables = BTreeMap::new();
    if !dir.is_dir() {
        debug!("data"; "no data directory at {}", dir.display());
        return Ok(tables);
    }

    for entry in WalkDir::new(dir).max_depth(1).sort(true) {
        let entry = entry.map_err(|e| BuildError::filesystem(dir, io::Error::other(e.to_string())))?;
        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(format) = DataFormat::from_path(&path) else {
            continue;
        };
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_owned) else {
            continue;
        };

        let text = fs::read_to_string(&path).map_err(|e| BuildError::filesystem(&path, e))?;
        let value = format.parse(&text).map_err(|message| BuildError::Data {
            path: path.clone(),
            message,
        })?;

        if tables.insert(stem.clone(), value).is_some() {
            return Err(BuildError::Data {
                path,
                message: format!("another data file already defines `{stem}`"),
            });
        }
        debug!("data"; "loaded table `{}`", stem);
    }

    Ok(tables)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataFormat {
    Yaml,
    Json,
}

impl DataFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn parse(self, text: &str) -> Result<Value, String> {
        match self {
            Self::Yaml => serde_yaml_ng::from_str(text).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_missing_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        let tables = load_tables(&dir.path().join("data")).unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_load_yaml_and_json() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("events.yaml"),
            "- name: Meetup\n  date: March 1, 2021\n- name: Talk\n",
        )
        .unwrap();
        fs::write(dir.path().join("videos.json"), r#"{"count": 2}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/deep.yaml"), "x: 1").unwrap();

        let tables = load_tables(dir.path()).unwrap();
        assert_eq!(tables.keys().collect::<Vec<_>>(), ["events", "videos"]);
        assert_eq!(tables["events"][0]["name"], json!("Meetup"));
        assert_eq!(tables["events"][0]["date"], json!("March 1, 2021"));
        assert_eq!(tables["videos"]["count"], json!(2));
    }

    #[test]
    fn test_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.yml"), "key: [unclosed").unwrap();
        let err = load_tables(dir.path()).unwrap_err();
        assert!(matches!(err, BuildError::Data { .. }));
        assert!(err.to_string().contains("broken.yml"));
    }

    #[test]
    fn test_duplicate_stem() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("events.json"), "[]").unwrap();
        fs::write(dir.path().join("events.yaml"), "[]").unwrap();
        let err = load_tables(dir.path()).unwrap_err();
        assert!(err.to_string().contains("`events`"));
    }
}
