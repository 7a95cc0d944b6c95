//! Safe field access over the loosely-typed status payload. Every snapshot
//! field the reconciler reads goes through these helpers; a missing or
//! mistyped field resolves to its documented fallback, never an error.

use serde_json::Value;

/// Resolves a dotted path (`"technical.confidence"`) one key at a time,
/// stopping at the first step that is missing or not an object.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for key in path.split('.') {
        current = current.as_object()?.get(key)?;
    }
    Some(current)
}

/// String field with a placeholder fallback. Present-but-non-string and
/// empty-string values both count as missing.
pub fn str_or(root: &Value, path: &str, fallback: &str) -> String {
    match lookup(root, path) {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => fallback.to_string(),
    }
}

/// First of `paths` that resolves to an integer. Covers legacy field
/// names that older backends still send.
pub fn first_i64(root: &Value, paths: &[&str], fallback: i64) -> i64 {
    paths
        .iter()
        .find_map(|path| lookup(root, path).and_then(Value::as_i64))
        .unwrap_or(fallback)
}

pub fn f64_or(root: &Value, path: &str, fallback: f64) -> f64 {
    lookup(root, path).and_then(Value::as_f64).unwrap_or(fallback)
}

/// Boolean coercion matching the loose truthiness the backend relies on:
/// `false`, `0`, `""`, `null` and absence are false, everything else true.
pub fn truthy(root: &Value, path: &str) -> bool {
    match lookup(root, path) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// False only for an exact JSON `false`. The bot omits `trading_enabled`
/// when it has never been toggled, and older builds send `0` or `""`;
/// all of those mean enabled.
pub fn flag_not_false(root: &Value, path: &str) -> bool {
    !matches!(lookup(root, path), Some(Value::Bool(false)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_lookup_walks_objects() {
        let snapshot = json!({"technical": {"confidence": 0.42}});
        assert_eq!(f64_or(&snapshot, "technical.confidence", 0.0), 0.42);
    }

    #[test]
    fn missing_steps_fall_back() {
        assert_eq!(f64_or(&json!({}), "technical.confidence", 0.0), 0.0);
        assert_eq!(
            f64_or(&json!({"technical": {}}), "technical.confidence", 0.0),
            0.0
        );
        // technical is not an object at all
        assert_eq!(
            f64_or(&json!({"technical": 7}), "technical.confidence", 0.0),
            0.0
        );
        assert_eq!(
            f64_or(&json!({"technical": null}), "technical.confidence", 0.0),
            0.0
        );
    }

    #[test]
    fn primitive_mid_path_never_panics() {
        let snapshot = json!({"a": "leaf"});
        assert!(lookup(&snapshot, "a.b.c").is_none());
        assert_eq!(str_or(&snapshot, "a.b.c", "-"), "-");
    }

    #[test]
    fn str_or_rejects_non_strings_and_empties() {
        assert_eq!(str_or(&json!({"mode": 3}), "mode", "SAFE"), "SAFE");
        assert_eq!(str_or(&json!({"symbol": ""}), "symbol", "-"), "-");
        assert_eq!(str_or(&json!({"symbol": "XAUUSD"}), "symbol", "-"), "XAUUSD");
    }

    #[test]
    fn legacy_key_order_is_respected() {
        let both = json!({"timeframe_minutes": 15, "timeframe": 5});
        assert_eq!(first_i64(&both, &["timeframe_minutes", "timeframe"], 0), 15);

        let legacy_only = json!({"timeframe": 5});
        assert_eq!(
            first_i64(&legacy_only, &["timeframe_minutes", "timeframe"], 0),
            5
        );

        assert_eq!(first_i64(&json!({}), &["timeframe_minutes", "timeframe"], 0), 0);
    }

    #[test]
    fn truthiness_matches_the_backend_contract() {
        assert!(!truthy(&json!({}), "dry_run"));
        assert!(!truthy(&json!({"dry_run": false}), "dry_run"));
        assert!(!truthy(&json!({"dry_run": 0}), "dry_run"));
        assert!(!truthy(&json!({"dry_run": ""}), "dry_run"));
        assert!(!truthy(&json!({"dry_run": null}), "dry_run"));
        assert!(truthy(&json!({"dry_run": true}), "dry_run"));
        assert!(truthy(&json!({"dry_run": 1}), "dry_run"));
        assert!(truthy(&json!({"dry_run": "yes"}), "dry_run"));
    }

    #[test]
    fn trading_flag_is_enabled_unless_exactly_false() {
        assert!(flag_not_false(&json!({}), "trading_enabled"));
        assert!(flag_not_false(&json!({"trading_enabled": 0}), "trading_enabled"));
        assert!(flag_not_false(&json!({"trading_enabled": ""}), "trading_enabled"));
        assert!(flag_not_false(&json!({"trading_enabled": null}), "trading_enabled"));
        assert!(flag_not_false(&json!({"trading_enabled": true}), "trading_enabled"));
        assert!(!flag_not_false(&json!({"trading_enabled": false}), "trading_enabled"));
    }
}
