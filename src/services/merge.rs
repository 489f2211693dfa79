use crate::models::{join_checks, options_from_map, options_to_map, split_checks};
use crate::services::select_configs;
use crate::yaml::{dump_config, load_config};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde_yaml_ng::{Mapping, Value};

const CHECKS_FIELD: &str = "Checks";
const CHECK_OPTIONS_FIELD: &str = "CheckOptions";

/// Folds overlay documents into a baseline clang-tidy config.
///
/// Three merge rules apply, in this order per overlay:
///
/// 1. `Checks` tokens are concatenated after the accumulated tokens. No
///    deduplication: clang-tidy's suppression grammar gives a later
///    `-pattern` token meaning only relative to earlier tokens.
/// 2. `CheckOptions` entries are key-unioned, last write wins, so a deeper
///    overlay can change one option without restating the rest.
/// 3. Every other top-level field deep-merges: mappings recurse with a union
///    of keys, anything else is replaced by the overlay's value.
///
/// The merger owns the result; overlays are consumed left to right.
pub struct Merger {
    result: Mapping,
}

impl Merger {
    /// Start a merge from the baseline document.
    pub fn new(baseline: Mapping) -> Self {
        Self { result: baseline }
    }

    /// Fold one overlay document into the accumulated result.
    pub fn fold(&mut self, incoming: Mapping) {
        self.fold_checks(&incoming);
        self.fold_check_options(&incoming);

        for (field, value) in incoming {
            if is_special_field(&field) {
                continue;
            }
            match self.result.get_mut(&field) {
                Some(existing) => deep_merge(existing, value),
                None => {
                    self.result.insert(field, value);
                }
            }
        }
    }

    /// Finish the merge, renormalizing the special fields.
    ///
    /// A baseline-only run must still emit `Checks` as a single comma-joined
    /// string and `CheckOptions` sorted by key, so both are canonicalized
    /// here even when no overlay touched them.
    pub fn finish(mut self) -> Mapping {
        if self.result.contains_key(CHECKS_FIELD) {
            let tokens = split_checks(self.result.get(CHECKS_FIELD));
            self.result.insert(
                Value::String(CHECKS_FIELD.to_string()),
                Value::String(join_checks(&tokens)),
            );
        }

        if self.result.contains_key(CHECK_OPTIONS_FIELD) {
            let options = options_to_map(self.result.get(CHECK_OPTIONS_FIELD));
            self.result.insert(
                Value::String(CHECK_OPTIONS_FIELD.to_string()),
                options_from_map(&options),
            );
        }

        self.result
    }

    fn fold_checks(&mut self, incoming: &Mapping) {
        let added = split_checks(incoming.get(CHECKS_FIELD));
        if added.is_empty() {
            return;
        }

        let mut tokens = split_checks(self.result.get(CHECKS_FIELD));
        tokens.extend(added);
        self.result.insert(
            Value::String(CHECKS_FIELD.to_string()),
            Value::String(join_checks(&tokens)),
        );
    }

    fn fold_check_options(&mut self, incoming: &Mapping) {
        let overriding = options_to_map(incoming.get(CHECK_OPTIONS_FIELD));
        if overriding.is_empty() {
            return;
        }

        let mut options = options_to_map(self.result.get(CHECK_OPTIONS_FIELD));
        for (key, value) in overriding {
            options.insert(key, value);
        }
        self.result.insert(
            Value::String(CHECK_OPTIONS_FIELD.to_string()),
            options_from_map(&options),
        );
    }
}

fn is_special_field(field: &Value) -> bool {
    matches!(field, Value::String(name) if name == CHECKS_FIELD || name == CHECK_OPTIONS_FIELD)
}

/// Generic YAML overlay merge: mappings recurse, everything else replaces.
fn deep_merge(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (field, value) in overlay {
                match base.get_mut(&field) {
                    Some(slot) => deep_merge(slot, value),
                    None => {
                        base.insert(field, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}

/// Run the full merge pipeline: load, select, fold, write.
///
/// Overlays removed by the scope filter are never loaded, so only files that
/// actually participate can fail the run. The output file is written only
/// after every fold has succeeded.
pub fn merge_config_files(
    baseline: &Utf8Path,
    config_files: &[Utf8PathBuf],
    scope_dir: Option<&Utf8Path>,
    out: &Utf8Path,
) -> Result<Mapping> {
    let baseline_doc = load_config(baseline)
        .with_context(|| format!("Failed to load baseline config: {}", baseline))?;

    let selected = select_configs(config_files, scope_dir)?;
    tracing::info!(
        "Merging {} of {} overlay configs into baseline {}",
        selected.len(),
        config_files.len(),
        baseline
    );

    let mut merger = Merger::new(baseline_doc);
    for path in &selected {
        let overlay = load_config(path)
            .with_context(|| format!("Failed to load overlay config: {}", path))?;
        tracing::debug!("Applying overlay {}", path);
        merger.fold(overlay);
    }

    let merged = merger.finish();
    dump_config(&merged, out).with_context(|| format!("Failed to write merged config: {}", out))?;
    tracing::info!("Wrote merged config to {}", out);

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    fn merge(baseline: &str, overlays: &[&str]) -> Mapping {
        let mut merger = Merger::new(mapping(baseline));
        for overlay in overlays {
            merger.fold(mapping(overlay));
        }
        merger.finish()
    }

    fn checks(result: &Mapping) -> &str {
        result.get(CHECKS_FIELD).unwrap().as_str().unwrap()
    }

    #[test]
    fn test_checks_concatenate_in_order() {
        let result = merge("{Checks: 'a,b'}", &["{Checks: 'c,d'}"]);
        assert_eq!(checks(&result), "a,b,c,d");
    }

    #[test]
    fn test_checks_sequence_baseline_with_suppression() {
        let result = merge("{Checks: [a, b]}", &["{Checks: '-a'}"]);
        assert_eq!(checks(&result), "a,b,-a");
    }

    #[test]
    fn test_checks_are_not_deduplicated() {
        let result = merge("{Checks: 'a'}", &["{Checks: 'a'}"]);
        assert_eq!(checks(&result), "a,a");
    }

    #[test]
    fn test_checks_renormalized_without_overlays() {
        let result = merge("{Checks: [' a ', 'b,c']}", &[]);
        assert_eq!(checks(&result), "a,b,c");
    }

    #[test]
    fn test_check_options_last_wins() {
        let result = merge(
            "{CheckOptions: [{key: A, value: '1'}]}",
            &["{CheckOptions: [{key: A, value: '2'}]}"],
        );
        assert_eq!(
            result.get(CHECK_OPTIONS_FIELD).unwrap(),
            &serde_yaml_ng::from_str::<Value>("[{key: A, value: '2'}]").unwrap()
        );
    }

    #[test]
    fn test_check_options_union_sorted_by_key() {
        let result = merge(
            "{CheckOptions: [{key: B, value: '1'}]}",
            &["{CheckOptions: [{key: A, value: '2'}]}"],
        );
        assert_eq!(
            result.get(CHECK_OPTIONS_FIELD).unwrap(),
            &serde_yaml_ng::from_str::<Value>(
                "[{key: A, value: '2'}, {key: B, value: '1'}]"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_check_options_renormalized_without_overlays() {
        let result = merge(
            "{CheckOptions: [{key: B, value: '1'}, {key: A, value: '2'}]}",
            &[],
        );
        assert_eq!(
            result.get(CHECK_OPTIONS_FIELD).unwrap(),
            &serde_yaml_ng::from_str::<Value>(
                "[{key: A, value: '2'}, {key: B, value: '1'}]"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_deep_merge_unions_nested_mappings() {
        let result = merge(
            "{Outer: {Inner: 1}, Keep: true}",
            &["{Outer: {Added: 2}, New: false}"],
        );
        assert_eq!(
            Value::Mapping(result),
            serde_yaml_ng::from_str::<Value>(
                "{Outer: {Inner: 1, Added: 2}, Keep: true, New: false}"
            )
            .unwrap()
        );
    }

    #[test]
    fn test_deep_merge_leaf_replaced_by_later_document() {
        let result = merge(
            "{HeaderFilterRegex: 'src/.*'}",
            &["{HeaderFilterRegex: '.*'}"],
        );
        assert_eq!(
            result.get("HeaderFilterRegex").unwrap(),
            &Value::String(".*".to_string())
        );
    }

    #[test]
    fn test_deep_merge_type_mismatch_replaces() {
        let result = merge("{Field: {a: 1}}", &["{Field: 'scalar'}"]);
        assert_eq!(
            result.get("Field").unwrap(),
            &Value::String("scalar".to_string())
        );
    }

    #[test]
    fn test_empty_overlay_contributes_nothing() {
        let result = merge("{Checks: 'a', Keep: 1}", &["{}"]);
        assert_eq!(checks(&result), "a");
        assert_eq!(result.get("Keep").unwrap(), &Value::Number(1.into()));
    }

    #[test]
    fn test_checks_appear_even_when_baseline_has_none() {
        let result = merge("{}", &["{Checks: 'a'}", "{Checks: 'b'}"]);
        assert_eq!(checks(&result), "a,b");
    }

    #[test]
    fn test_order_across_three_documents() {
        let result = merge(
            "{Checks: 'base'}",
            &["{Checks: 'mid'}", "{Checks: '-base,deep'}"],
        );
        assert_eq!(checks(&result), "base,mid,-base,deep");
    }
}
