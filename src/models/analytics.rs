use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Headline dashboard metrics. The values served today are fixed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsSnapshot {
    pub total_users: u64,
    pub active_users: u64,
    pub sales: u64,
    /// Month-over-month growth in percent.
    pub growth: f64,
}

impl AnalyticsSnapshot {
    pub fn mock() -> Self {
        Self {
            total_users: 500,
            active_users: 120,
            sales: 10_000,
            growth: 10.0,
        }
    }
}

/// Payload of `POST /api/summary`.
///
/// The server accepts any JSON as `data`; the client sends a snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryRequest<T = Value> {
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryResponse {
    pub summary: String,
}

/// One-sentence summary of `data`, or `None` when there is nothing to
/// summarize (`false`, `0`, `""`).
///
/// Fields are read by their camelCase names; a missing one reads as 0.
pub fn summarize(data: &Value) -> Option<String> {
    if is_falsy(data) {
        return None;
    }
    Some(format!(
        "User activity increased by {}% this month. Total sales reached ${}, with {} active users.",
        field(data, "growth"),
        field(data, "sales"),
        field(data, "activeUsers")
    ))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn field(data: &Value, key: &str) -> String {
    match data.get(key) {
        None => "0".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => render_number(n),
        Some(other) => other.to_string(),
    }
}

/// Whole floats print without a fraction, so `10.0` reads as `10`.
fn render_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}
