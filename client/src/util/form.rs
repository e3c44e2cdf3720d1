//! Form input parsing and display formatting.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use serde_json::Value;

/// Parse a money amount typed by the operator.
///
/// # Errors
///
/// Returns a message when the text is not a finite number.
pub fn parse_amount(raw: &str) -> Result<f64, String> {
    let cleaned = raw.trim().replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(format!("not a valid amount: {raw}")),
    }
}

/// `YYYY-MM-DD` from a date input to the backend's naive datetime form.
pub fn date_input_to_datetime(date: &str) -> String {
    let date = date.trim();
    if date.is_empty() || date.contains('T') { date.to_owned() } else { format!("{date}T00:00:00") }
}

/// Date part of an ISO datetime, for table cells and date inputs.
pub fn display_date(datetime: &str) -> String {
    datetime.split('T').next().unwrap_or_default().to_owned()
}

/// Two-decimal amount with thousands separators.
pub fn format_amount(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}.{cents}")
}

/// Parse template overrides. Blank input means no overrides.
///
/// # Errors
///
/// Returns a message unless the text is a JSON object.
pub fn validate_kwargs(raw: &str) -> Result<Value, String> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err("template parameters must be a JSON object".to_owned()),
        Err(e) => Err(format!("template parameters are not valid JSON: {e}")),
    }
}

/// Sign-in form precheck.
///
/// # Errors
///
/// Returns a message when either field is blank.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    if email.trim().is_empty() || password.is_empty() {
        return Err("Enter both email and password.".to_owned());
    }
    Ok(())
}
