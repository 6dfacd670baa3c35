//! Change summaries for audit entries

use serde_json::Value;

/// Summarize top-level field changes between two JSON snapshots
///
/// Returns `None` when nothing changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            let mut changes: Vec<String> = old
                .iter()
                .filter_map(|(key, old_val)| match new.get(key) {
                    Some(new_val) if new_val == old_val => None,
                    Some(new_val) => Some(format!(
                        "{}: {} -> {}",
                        key,
                        format_value(old_val),
                        format_value(new_val)
                    )),
                    None => Some(format!("{}: {} -> (removed)", key, format_value(old_val))),
                })
                .collect();

            changes.extend(
                new.iter()
                    .filter(|(key, _)| !old.contains_key(*key))
                    .map(|(key, val)| format!("{}: (added) -> {}", key, format_value(val))),
            );
            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_changed_fields_only() {
        let before = json!({"amount": 1000, "description": "Kino", "type": "expense"});
        let after = json!({"amount": 1200, "description": "Kino", "type": "expense"});

        assert_eq!(
            generate_diff(&before, &after),
            Some("amount: 1000 -> 1200".to_string())
        );
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"isSalary": true});
        let after = json!({"category": {"name": "Miete"}});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("isSalary: true -> (removed)"));
        assert!(diff.contains("category: (added) -> {1 fields}"));
    }

    #[test]
    fn test_no_changes() {
        let value = json!({"amount": 5});
        assert_eq!(generate_diff(&value, &value), None);
        assert_eq!(generate_diff(&json!(3), &json!(3)), None);
        assert_eq!(generate_diff(&json!(3), &json!(4)), Some("3 -> 4".to_string()));
    }

    #[test]
    fn test_long_strings_truncated() {
        let before = json!({"description": "x".repeat(80)});
        let after = json!({"description": "kurz"});

        let diff = generate_diff(&before, &after).unwrap();
        assert!(diff.contains("...\" -> \"kurz\""));
    }
}
