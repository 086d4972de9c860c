// Bitcoin address shape check

/// Minimum characters after the version prefix
const MIN_BODY_LEN: usize = 20;

/// Loose address check: a `1`, `3` or `bc1` prefix (any case) followed by at
/// least 20 alphanumeric characters. No checksum is verified.
pub fn is_valid_btc(address: &str) -> bool {
    let address = address.trim();
    let lower = address.to_ascii_lowercase();

    let body = if lower.starts_with("bc1") {
        &address[3..]
    } else if lower.starts_with('1') || lower.starts_with('3') {
        &address[1..]
    } else {
        return false;
    };

    body.len() >= MIN_BODY_LEN && body.bytes().all(|b| b.is_ascii_alphanumeric())
}
