use camino::{Utf8Path, Utf8PathBuf};
use serde_yaml_ng::{Mapping, Value};
use std::fs;
use thiserror::Error;

/// Errors that can occur while reading or writing config documents
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read config file {path}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML in {path}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Config file {path} is not a YAML mapping")]
    NotAMapping { path: Utf8PathBuf },

    #[error("Failed to serialize merged config")]
    Serialize(#[from] serde_yaml_ng::Error),

    #[error("Failed to write merged config {path}")]
    Write {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load a YAML config file into a mapping.
///
/// An empty file or a file containing only a YAML null yields the empty
/// mapping; clang-tidy treats such configs as contributing nothing. A missing
/// file is an error: the caller named the file explicitly and silently
/// skipping it would hide a typo.
pub fn load_config(path: &Utf8Path) -> Result<Mapping, LoadError> {
    let file_contents = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value =
        serde_yaml_ng::from_str(&file_contents).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    match document {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(LoadError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}

/// Write a mapping to a YAML file with keys sorted at every nesting level.
///
/// Parent directories are created if needed. Sorting makes the output stable
/// across runs for the same input, so the file can live in a build directory
/// without churning rebuilds.
pub fn dump_config(document: &Mapping, path: &Utf8Path) -> Result<(), LoadError> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|source| LoadError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let sorted = sort_keys(&Value::Mapping(document.clone()));
    let yaml_string = serde_yaml_ng::to_string(&sorted)?;

    fs::write(path, yaml_string).map_err(|source| LoadError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!("Wrote config to {}", path);
    Ok(())
}

/// Recursively rebuild a value with mapping keys in lexicographic order.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Mapping(mapping) => {
            let mut entries: Vec<(&Value, &Value)> = mapping.iter().collect();
            entries.sort_by_key(|(key, _)| key_ordinal(key));

            let mut sorted = Mapping::new();
            for (key, nested) in entries {
                sorted.insert(key.clone(), sort_keys(nested));
            }
            Value::Mapping(sorted)
        }
        Value::Sequence(items) => Value::Sequence(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

/// String form of a mapping key, used only for sort order.
///
/// clang-tidy configs only ever have string keys; anything else falls back to
/// its serialized form so sorting stays total.
fn key_ordinal(key: &Value) -> String {
    match key {
        Value::String(text) => text.clone(),
        other => serde_yaml_ng::to_string(other)
            .map(|text| text.trim_end().to_string())
            .unwrap_or_default(),
    }
}
