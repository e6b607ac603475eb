use serde::{Deserialize, Serialize};

/// Rounds to one decimal place for display.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// A displayed statistic: a whole count, a one-decimal figure or text such
/// as "N/A".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(i64),
    Decimal(f64),
    Text(String),
}

impl StatValue {
    pub fn decimal(value: f64) -> Self {
        StatValue::Decimal(round_tenth(value))
    }

    pub fn not_available() -> Self {
        StatValue::Text("N/A".to_string())
    }
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        StatValue::Count(value)
    }
}

impl From<u32> for StatValue {
    fn from(value: u32) -> Self {
        StatValue::Count(value.into())
    }
}

impl From<&str> for StatValue {
    fn from(value: &str) -> Self {
        StatValue::Text(value.to_string())
    }
}

impl From<String> for StatValue {
    fn from(value: String) -> Self {
        StatValue::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatEntry {
    pub statistic: String,
    pub value: StatValue,
}

/// Ordered statistic → value rows, the shape every view hands to the
/// presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatTable(Vec<StatEntry>);

impl StatTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, statistic: impl Into<String>, value: impl Into<StatValue>) -> Self {
        self.0.push(StatEntry {
            statistic: statistic.into(),
            value: value.into(),
        });
        self
    }

    pub fn get(&self, statistic: &str) -> Option<&StatValue> {
        self.0
            .iter()
            .find(|entry| entry.statistic == statistic)
            .map(|entry| &entry.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
