// Balance summary over `listfunds`

use num_bigint::BigUint;
use serde_json::Value;

/// Output amount fields, in order of preference
const OUTPUT_AMOUNT_FIELDS: [&str; 3] = ["amount_msat", "amount", "value"];

/// Channel amount fields, in order of preference
const CHANNEL_AMOUNT_FIELDS: [&str; 2] = ["our_amount_msat", "our_amount"];

/// Millisatoshi totals from a `listfunds` reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceSummary {
    pub onchain_confirmed: BigUint,
    pub onchain_unconfirmed: BigUint,
    pub channel_total: BigUint,
}

/// Sum on-chain outputs by confirmation status and channel balances
pub fn summarize_funds(listfunds: &Value) -> BalanceSummary {
    let mut summary = BalanceSummary::default();

    for output in array_field(listfunds, "outputs") {
        let msat = parse_msat(first_present(output, &OUTPUT_AMOUNT_FIELDS));
        let confirmed = output
            .get("status")
            .and_then(Value::as_str)
            .is_some_and(|s| s.eq_ignore_ascii_case("confirmed"));

        if confirmed {
            summary.onchain_confirmed += msat;
        } else {
            summary.onchain_unconfirmed += msat;
        }
    }

    for channel in array_field(listfunds, "channels") {
        summary.channel_total += parse_msat(first_present(channel, &CHANNEL_AMOUNT_FIELDS));
    }

    summary
}

/// Parse a CLN amount.
///
/// Accepts `"1234msat"`, a bare digit string or a JSON integer. Anything else
/// counts as zero.
pub fn parse_msat(value: Option<&Value>) -> BigUint {
    let text = match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return BigUint::default(),
    };

    let digits = text.strip_suffix("msat").unwrap_or(&text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return BigUint::default();
    }

    digits.parse().unwrap_or_default()
}

fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

// First field that is present and not null
fn first_present<'a>(record: &'a Value, fields: &[&str]) -> Option<&'a Value> {
    fields
        .iter()
        .filter_map(|field| record.get(*field))
        .find(|v| !v.is_null())
}
