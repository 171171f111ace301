//! Loose value coercions for node configuration.
//!
//! Graphs are authored by hand in the editor, so node kinds accept whatever a
//! user typed: numbers as strings, booleans as numbers, and so on.

use serde_json::Value;

/// First candidate that is present and not JSON `null`.
pub fn first_present<'a, I>(candidates: I) -> Option<&'a Value>
where
  I: IntoIterator<Item = Option<&'a Value>>,
{
  candidates
    .into_iter()
    .flatten()
    .find(|value| !value.is_null())
}

/// Truthiness: `null`, `false`, `0`, `NaN` and `""` are false, all else true.
pub fn truthy(value: Option<&Value>) -> bool {
  match value {
    None | Some(Value::Null) => false,
    Some(Value::Bool(b)) => *b,
    Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
    Some(Value::String(s)) => !s.is_empty(),
    Some(Value::Array(_)) | Some(Value::Object(_)) => true,
  }
}

/// Numeric reading of a value. Unparseable input yields `NaN`.
pub fn to_number(value: &Value) -> f64 {
  match value {
    Value::Null => 0.0,
    Value::Bool(b) => f64::from(u8::from(*b)),
    Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
    Value::String(s) => {
      let s = s.trim();
      if s.is_empty() {
        0.0
      } else {
        s.parse().unwrap_or(f64::NAN)
      }
    }
    Value::Array(_) | Value::Object(_) => f64::NAN,
  }
}

/// Format a number the way users write it: `10`, not `10.0`.
pub fn format_number(n: f64) -> String {
  if n.is_nan() {
    "NaN".to_string()
  } else if n.is_infinite() {
    if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
  } else if n.fract() == 0.0 && n.abs() < 1e15 {
    format!("{}", n as i64)
  } else {
    format!("{n}")
  }
}

/// Text reading of a value. Strings are taken verbatim.
pub fn to_display(value: &Value) -> String {
  match value {
    Value::Null => "null".to_string(),
    Value::Bool(b) => b.to_string(),
    Value::Number(n) => n
      .as_f64()
      .map(format_number)
      .unwrap_or_else(|| n.to_string()),
    Value::String(s) => s.clone(),
    Value::Array(items) => items
      .iter()
      .map(|item| match item {
        Value::Null => String::new(),
        other => to_display(other),
      })
      .collect::<Vec<_>>()
      .join(","),
    Value::Object(_) => "[object Object]".to_string(),
  }
}
