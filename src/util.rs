use serde_json::Value;

/// Formats an integer with `,` between groups of three digits.
pub(crate) fn group_thousands(n: i128) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Award amount for display: integers are comma-grouped, everything else is shown as-is.
pub(crate) fn format_amount(v: &Value) -> String {
    match v {
        Value::Number(n) if n.is_i64() || n.is_u64() => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .map(group_thousands)
            .unwrap_or_else(|| n.to_string()),
        other => display_text(other),
    }
}

/// Console text for a loosely-typed value; null prints as `None`.
pub(crate) fn display_text(v: &Value) -> String {
    match v {
        Value::Null => "None".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// CSV cell text; null is an empty cell.
pub(crate) fn cell_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-45000), "-45,000");
    }

    #[test]
    fn amount_formatting() {
        assert_eq!(format_amount(&json!(100000)), "100,000");
        assert_eq!(format_amount(&json!(1500.5)), "1500.5");
        assert_eq!(format_amount(&json!(null)), "None");
        assert_eq!(format_amount(&json!("n/a")), "n/a");
    }

    #[test]
    fn cells() {
        assert_eq!(cell_text(&json!(null)), "");
        assert_eq!(cell_text(&json!("a, b")), "a, b");
        assert_eq!(cell_text(&json!(42)), "42");
    }
}
