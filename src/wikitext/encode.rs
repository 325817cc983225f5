//! Key escaping for document databases that reject `$`-prefixed or dotted
//! keys.

use serde_json::{Map, Value};

/// Escape one key: backslashes are doubled, a leading `$` becomes the six
/// characters `\u0024` and every `.` becomes the six characters `\u002e`.
pub fn encode_key(key: &str) -> String {
    let escaped = key.replace('\\', "\\\\");
    let escaped = match escaped.strip_prefix('$') {
        Some(rest) => format!("\\u0024{}", rest),
        None => escaped,
    };
    escaped.replace('.', "\\u002e")
}

/// Apply `encode_key` to every object key in `value`, recursively.
pub fn encode_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let encoded: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (encode_key(&k), encode_keys(v)))
                .collect();
            Value::Object(encoded)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(encode_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_dollar_and_dots() {
        assert_eq!(encode_key("$ref"), "\\u0024ref");
        assert_eq!(encode_key("a.b.c"), "a\\u002eb\\u002ec");
        assert_eq!(encode_key("a\\b"), "a\\\\b");
        assert_eq!(encode_key("mid$dle"), "mid$dle");
    }

    #[test]
    fn encodes_nested_objects() {
        let v = json!({"x.y": [{"$k": 1}], "plain": "a.b"});
        let out = encode_keys(v);
        assert_eq!(out, json!({"x\\u002ey": [{"\\u0024k": 1}], "plain": "a.b"}));
    }
}
