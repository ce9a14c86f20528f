use serde_json::Value;

/// Deep-merge `source` into `target`.
///
/// Contract: for every key of `source`, when both the target value and the
/// source value are mappings the two are merged recursively; in every other
/// case the source value replaces the target value wholesale. Lists are
/// therefore never merged element by element, and keys present only in
/// `target` survive untouched.
///
/// A non-mapping `source` replaces `target` entirely.
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(dst), Value::Object(src)) => {
            for (key, src_val) in src {
                match dst.get_mut(&key) {
                    Some(dst_val) if dst_val.is_object() && src_val.is_object() => {
                        deep_merge(dst_val, src_val);
                    }
                    _ => {
                        dst.insert(key, src_val);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

/// Non-mutating variant of [`deep_merge`].
pub fn merged(target: &Value, source: &Value) -> Value {
    let mut out = target.clone();
    deep_merge(&mut out, source.clone());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn nested_objects_merge_field_by_field() {
        let t = json!({"personalization": {"a": 1, "b": 2}});
        let s = json!({"personalization": {"a": 9}});
        assert_eq!(merged(&t, &s), json!({"personalization": {"a": 9, "b": 2}}));
    }

    #[test]
    fn arrays_are_replaced_wholesale() {
        let t = json!({"photos": [1, 2]});
        let s = json!({"photos": [3]});
        assert_eq!(merged(&t, &s)["photos"], json!([3]));
    }

    #[test]
    fn object_over_scalar_replaces() {
        let t = json!({"audio": "off"});
        let s = json!({"audio": {"volume": 0.2}});
        assert_eq!(merged(&t, &s), json!({"audio": {"volume": 0.2}}));
    }

    #[test]
    fn scalar_over_object_replaces() {
        let t = json!({"theme": {"mode": "dark"}});
        let s = json!({"theme": null});
        assert_eq!(merged(&t, &s), json!({"theme": null}));
    }

    #[test]
    fn new_keys_are_added() {
        let t = json!({"a": 1});
        let s = json!({"b": {"c": true}});
        assert_eq!(merged(&t, &s), json!({"a": 1, "b": {"c": true}}));
    }
}
