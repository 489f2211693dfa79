use serde_yaml_ng::Value;

/// Flatten the polymorphic `Checks` field into an ordered token list.
///
/// clang-tidy accepts `Checks` as either a single comma-separated string or a
/// sequence of strings (each of which may itself contain commas). Both forms
/// are flattened to the same ordered list of trimmed, non-empty tokens.
///
/// # Arguments
/// * `value` - The raw `Checks` field, or `None` when the document has none
///
/// # Returns
/// The tokens in left-to-right order. Duplicates are preserved: a later
/// `-pattern` token disables an earlier enable, so order carries meaning and
/// deduplication would change semantics.
pub fn split_checks(value: Option<&Value>) -> Vec<String> {
    let mut tokens = Vec::new();

    match value {
        None | Some(Value::Null) => {}
        Some(Value::Sequence(items)) => {
            for item in items {
                if let Some(text) = scalar_to_string(item) {
                    push_tokens(&mut tokens, &text);
                }
            }
        }
        Some(other) => {
            if let Some(text) = scalar_to_string(other) {
                push_tokens(&mut tokens, &text);
            }
        }
    }

    tokens
}

/// Render a token list back into the canonical scalar form of `Checks`.
pub fn join_checks(tokens: &[String]) -> String {
    tokens.join(",")
}

/// Coerce a scalar YAML value to its string form.
///
/// Non-scalar values (nested sequences or mappings inside `Checks`) have no
/// sensible token form and contribute nothing.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn push_tokens(tokens: &mut Vec<String>, text: &str) {
    for part in text.split(',') {
        let token = part.trim();
        if !token.is_empty() {
            tokens.push(token.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_absent_and_null() {
        assert!(split_checks(None).is_empty());
        assert!(split_checks(Some(&Value::Null)).is_empty());
    }

    #[test]
    fn test_split_scalar_string() {
        let value = Value::String("bugprone-*, -bugprone-easily-swappable-parameters".to_string());
        assert_eq!(
            split_checks(Some(&value)),
            vec!["bugprone-*", "-bugprone-easily-swappable-parameters"]
        );
    }

    #[test]
    fn test_split_sequence() {
        let value: Value = serde_yaml_ng::from_str("[\"a,b\", \" c \", \"-a\"]").unwrap();
        assert_eq!(split_checks(Some(&value)), vec!["a", "b", "c", "-a"]);
    }

    #[test]
    fn test_split_drops_empty_tokens() {
        let value = Value::String(",a,, b ,".to_string());
        assert_eq!(split_checks(Some(&value)), vec!["a", "b"]);
    }

    #[test]
    fn test_split_preserves_duplicates_and_order() {
        let value = Value::String("a,b,a".to_string());
        assert_eq!(split_checks(Some(&value)), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_split_coerces_non_string_scalars() {
        let value: Value = serde_yaml_ng::from_str("[1, true, \"a\", null]").unwrap();
        assert_eq!(split_checks(Some(&value)), vec!["1", "true", "a"]);
    }

    #[test]
    fn test_join_round_trip() {
        let tokens = vec!["a".to_string(), "-b".to_string()];
        assert_eq!(join_checks(&tokens), "a,-b");
    }

    proptest! {
        // split(join(split(x))) == split(x) for arbitrary comma soup
        #[test]
        fn test_normalization_is_idempotent(raw in "[a-z*.,\\- ]{0,48}") {
            let once = split_checks(Some(&Value::String(raw)));
            let joined = Value::String(join_checks(&once));
            let again = split_checks(Some(&joined));
            prop_assert_eq!(once, again);
        }
    }
}
