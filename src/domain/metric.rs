//! Metric records - One line per event in a daily JSONL log.
//!
//! Logs are partitioned by bot and UTC day:
//! `Metric/<bot_id>/<yymmdd>.jsonl`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of metric being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Counter,
    Gauge,
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Counter => write!(f, "counter"),
            Self::Gauge => write!(f, "gauge"),
        }
    }
}

/// Recorded value. Integers stay integers on disk (`1`, not `1.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
}

impl From<i32> for MetricValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for MetricValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A single metric event as stored in the append log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Event time (Unix ms).
    pub timestamp: i64,
    pub bot_id: String,
    pub metric_name: String,
    pub metric_type: MetricType,
    pub value: MetricValue,
    /// Tags joined with `#`, e.g. `pair:BTC/USDT#side:buy`.
    pub tags: String,
}

impl Metric {
    /// Build a metric stamped at `at`.
    pub fn new(
        bot_id: &str,
        metric_name: &str,
        metric_type: MetricType,
        value: impl Into<MetricValue>,
        tags: &[String],
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp: at.timestamp_millis(),
            bot_id: bot_id.to_string(),
            metric_name: metric_name.to_string(),
            metric_type,
            value: value.into(),
            tags: join_tags(tags),
        }
    }
}

/// Join tags into the single `#`-separated field used on disk.
pub fn join_tags(tags: &[String]) -> String {
    tags.join("#")
}

/// Day partition for a metric log (`yymmdd`, UTC).
pub fn day_partition(at: DateTime<Utc>) -> String {
    at.format("%y%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_timestamp_in_millis() {
        let at = DateTime::from_timestamp(1_705_685_253, 0).unwrap();
        let tags = vec!["tag1:abc".to_string(), "tag2:def".to_string()];
        let metric = Metric::new("bot", "OrderCancelled", MetricType::Counter, 1, &tags, at);

        assert_eq!(metric.timestamp, 1_705_685_253_000);
        assert_eq!(metric.tags, "tag1:abc#tag2:def");
    }

    #[test]
    fn test_integer_values_serialize_without_fraction() {
        let at = DateTime::from_timestamp(1_705_685_253, 0).unwrap();
        let counter = Metric::new("bot", "OrderFilled", MetricType::Counter, 1, &[], at);
        let gauge = Metric::new("bot", "Balance", MetricType::Gauge, 1.5, &[], at);

        let counter_json = serde_json::to_string(&counter).unwrap();
        let gauge_json = serde_json::to_string(&gauge).unwrap();
        assert!(counter_json.contains(r#""value":1,"#), "{counter_json}");
        assert!(gauge_json.contains(r#""value":1.5,"#), "{gauge_json}");

        let back: Metric = serde_json::from_str(&counter_json).unwrap();
        assert_eq!(back.value, MetricValue::Int(1));
    }

    #[test]
    fn test_day_partition() {
        let at = DateTime::from_timestamp(1_705_685_253, 0).unwrap();
        assert_eq!(day_partition(at), "240119");
    }
}
