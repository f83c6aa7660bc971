//! Text rendering of extracted values.

use crate::node::{non_finite_text, JsonNode};

/// Render a node as the text that is written into metadata or the body.
///
/// Scalars render as their plain value (`"value1"` becomes `value1`, `false`
/// becomes `false`). Objects, arrays and `null` render as compact JSON.
///
/// Single-precision floats and the missing sentinel produce no value.
/// Doubles and decimals do render.
pub fn stringify(node: &JsonNode) -> Option<String> {
    match node {
        JsonNode::String(s) => Some(s.clone()),
        JsonNode::Boolean(b) => Some(b.to_string()),
        JsonNode::Int(v) => Some(v.to_string()),
        JsonNode::Long(v) => Some(v.to_string()),
        JsonNode::BigInteger(v) => Some(v.to_string()),
        JsonNode::Float(_) => None,
        JsonNode::Double(v) => Some(format_double(*v)),
        JsonNode::BigDecimal(v) => Some(v.to_string()),
        JsonNode::Missing => None,
        JsonNode::Object(_) | JsonNode::Array(_) | JsonNode::Null => Some(node.to_json_string()),
    }
}

/// Shortest round-tripping digits, laid out as plain decimal for magnitudes
/// in `[1e-3, 1e7)` and as `d.dddE±n` otherwise. At least one fractional
/// digit is always written (`2.0`, `1.0E7`).
fn format_double(value: f64) -> String {
    if !value.is_finite() {
        return non_finite_text(value);
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let scientific = format!("{magnitude:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or_default();
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (1e-3..1e7).contains(&magnitude) {
        if exponent >= 0 {
            let point = exponent as usize + 1;
            if digits.len() > point {
                format!("{sign}{}.{}", &digits[..point], &digits[point..])
            } else {
                format!("{sign}{digits:0<point$}.0")
            }
        } else {
            let zeros = "0".repeat((-exponent - 1) as usize);
            format!("{sign}0.{zeros}{digits}")
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let rest = if rest.is_empty() { "0" } else { rest };
        format!("{sign}{lead}.{rest}E{exponent}")
    }
}
