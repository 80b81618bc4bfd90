use serde_json::Value;

/// Strips the backend's `{ "result", "message", "data" }` wrapper.
///
/// Bodies without both `result` and `data` are returned as-is. An `ERROR`
/// result yields its message as `Err`.
pub fn unwrap_envelope(body: Value) -> Result<Value, String> {
    let Value::Object(mut map) = body else {
        return Ok(body);
    };

    let failed = matches!(map.get("result"), Some(Value::String(r)) if r.eq_ignore_ascii_case("ERROR"));
    if failed {
        let message = match map.remove("message") {
            Some(Value::String(m)) if !m.is_empty() => m,
            _ => "Request failed".to_string(),
        };
        return Err(message);
    }

    if map.contains_key("result") && map.contains_key("data") {
        return Ok(map.remove("data").unwrap_or(Value::Null));
    }

    Ok(Value::Object(map))
}
