//! Human-readable change summaries for audit entries

use serde_json::{Map, Value};

const MAX_STRING_LEN: usize = 40;

/// Top-level field changes between two snapshots, in key order
///
/// Nested objects are compared as a whole; only the outermost key that
/// differs is reported.
pub fn field_changes(before: &Value, after: &Value) -> Vec<String> {
    match (before, after) {
        (Value::Object(before), Value::Object(after)) => object_changes(before, after),
        _ if before == after => Vec::new(),
        _ => vec![format!("{} -> {}", render(before), render(after))],
    }
}

/// `field_changes` joined into one line, or `None` when nothing changed
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = field_changes(before, after);
    (!changes.is_empty()).then(|| changes.join(", "))
}

fn object_changes(before: &Map<String, Value>, after: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<&String> = before.keys().chain(after.keys()).collect();
    keys.sort();
    keys.dedup();

    keys.into_iter()
        .filter_map(|key| match (before.get(key), after.get(key)) {
            (Some(b), Some(a)) if b == a => None,
            (Some(b), Some(a)) => Some(format!("{}: {} -> {}", key, render(b), render(a))),
            (Some(b), None) => Some(format!("{}: {} -> (removed)", key, render(b))),
            (None, Some(a)) => Some(format!("{}: (added) -> {}", key, render(a))),
            (None, None) => None,
        })
        .collect()
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_STRING_LEN => {
            let head: String = s.chars().take(MAX_STRING_LEN - 3).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"name": "Checking", "balance": 1000});
        let after = json!({"name": "Checking", "balance": 1500});
        assert_eq!(
            generate_diff(&before, &after).as_deref(),
            Some("balance: 1000 -> 1500")
        );
    }

    #[test]
    fn test_changes_are_sorted_by_key() {
        let before = json!({"period": "monthly", "amount": 100});
        let after = json!({"period": "weekly", "amount": 200});
        assert_eq!(
            field_changes(&before, &after),
            vec!["amount: 100 -> 200", "period: \"monthly\" -> \"weekly\""]
        );
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"last_four": "4242"});
        let after = json!({"growth": 0.0});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("growth: (added) -> 0.0"));
        assert!(diff.contains("last_four: \"4242\" -> (removed)"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"name": "Test", "tags": ["a"]});
        assert!(generate_diff(&value, &value).is_none());
    }

    #[test]
    fn test_compound_values_are_summarised() {
        let before = json!({"tags": ["a"], "meta": {"x": 1}});
        let after = json!({"tags": ["a", "b"], "meta": {"x": 2, "y": 3}});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("tags: [1 items] -> [2 items]"));
        assert!(diff.contains("meta: {1 fields} -> {2 fields}"));
    }

    #[test]
    fn test_long_strings_are_truncated() {
        let before = json!({"description": "x".repeat(80)});
        let after = json!({"description": "short"});
        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\" -> \"short\""));
    }

    #[test]
    fn test_scalar_values() {
        assert_eq!(generate_diff(&json!(1), &json!(2)).as_deref(), Some("1 -> 2"));
        assert!(generate_diff(&json!(null), &json!(null)).is_none());
    }
}
