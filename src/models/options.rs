use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml_ng::{Mapping, Value};

/// A single `CheckOptions` record as clang-tidy writes it.
///
/// The `value` field may be absent in partially-authored overlays; it is
/// stored as YAML null in that case.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckOption {
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

/// Build the derived key→value view of a `CheckOptions` field.
///
/// Returns an empty map when the field is absent or not a sequence. Elements
/// that are not `{key, ...}` mappings are skipped silently; overlays are
/// often partially authored and a tolerant reader keeps them usable.
pub fn options_to_map(value: Option<&Value>) -> IndexMap<String, Value> {
    let mut map = IndexMap::new();

    if let Some(Value::Sequence(records)) = value {
        for record in records {
            if let Ok(option) = serde_yaml_ng::from_value::<CheckOption>(record.clone()) {
                map.insert(option.key, option.value);
            } else {
                tracing::debug!("Skipping CheckOptions entry without a key field");
            }
        }
    }

    map
}

/// Render the key→value view back as the canonical on-disk record sequence.
///
/// Records are emitted in ascending key order so output is deterministic
/// regardless of the order overlays were applied in.
pub fn options_from_map(map: &IndexMap<String, Value>) -> Value {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|left, right| left.0.cmp(right.0));

    let records = entries
        .into_iter()
        .map(|(key, value)| {
            let mut record = Mapping::new();
            record.insert(
                Value::String("key".to_string()),
                Value::String(key.clone()),
            );
            record.insert(Value::String("value".to_string()), value.clone());
            Value::Mapping(record)
        })
        .collect();

    Value::Sequence(records)
}
