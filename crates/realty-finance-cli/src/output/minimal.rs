use serde_json::Value;

/// Print just the key answer value from the output.
///
/// Looks for the headline field of each calculator in priority order, then
/// falls back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "total_monthly_payment",
        "monthly_payment",
        "roi_percent",
        "cap_rate_percent",
        "monthly_cash_flow",
        "break_even_units",
        "current_rate_percent",
        "is_valid",
    ];

    if let Value::Object(map) = result_obj {
        // The advanced mortgage headline lives one level down
        if let Some(Value::Object(details)) = map.get("advanced_details") {
            if let Some(total) = details.get("total_monthly_payment") {
                println!("{}", format_minimal(total));
                return;
            }
        }

        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_minimal(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
