// Payment lookup helpers

use serde_json::Value;

/// List fields used by `listpays` and `listsendpays`
const PAY_LIST_FIELDS: [&str; 2] = ["pays", "payments"];

/// Preimage field spellings across CLN versions
const PREIMAGE_FIELDS: [&str; 4] = [
    "preimage",
    "payment_preimage",
    "payment_preimage_hex",
    "preimage_hex",
];

/// True if `s` is exactly 64 hex characters (any case)
pub fn is_hex32(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Trim and lowercase a 32-byte hex value, failing with a message naming `label`
pub fn normalize_hex32(value: &str, label: &str) -> Result<String, String> {
    let hex = value.trim().to_lowercase();
    if !is_hex32(&hex) {
        return Err(format!("{} must be 32-byte hex", label));
    }
    Ok(hex)
}

/// Find the first payment preimage in a pay lookup reply, lowercased
pub fn extract_preimage(pays: &Value) -> Option<String> {
    let records = PAY_LIST_FIELDS
        .iter()
        .find_map(|field| pays.get(*field).and_then(Value::as_array))?;

    records.iter().find_map(|record| {
        let candidate = PREIMAGE_FIELDS
            .iter()
            .filter_map(|field| record.get(*field))
            .find(|v| is_set(v))?;

        let text = candidate.as_str()?.trim();
        is_hex32(text).then(|| text.to_lowercase())
    })
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
