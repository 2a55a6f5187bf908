// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::Serialize;

use crate::validation::format_cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    Count(i64),
    Money(i64),
}

impl MetricValue {
    pub fn display(self) -> String {
        match self {
            Self::Count(count) => count.to_string(),
            Self::Money(cents) => format_cents(cents),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: String,
    pub value: MetricValue,
}

/// Aggregate figures shown above a page table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub metrics: Vec<Metric>,
}

impl PageSummary {
    pub fn count(mut self, label: impl Into<String>, count: usize) -> Self {
        self.metrics.push(Metric {
            label: label.into(),
            value: MetricValue::Count(i64::try_from(count).unwrap_or(i64::MAX)),
        });
        self
    }

    pub fn money(mut self, label: impl Into<String>, cents: i64) -> Self {
        self.metrics.push(Metric {
            label: label.into(),
            value: MetricValue::Money(cents),
        });
        self
    }

    pub fn get(&self, label: &str) -> Option<MetricValue> {
        self.metrics
            .iter()
            .find(|metric| metric.label == label)
            .map(|metric| metric.value)
    }

    pub fn line(&self) -> String {
        self.metrics
            .iter()
            .map(|metric| format!("{}: {}", metric.label, metric.value.display()))
            .collect::<Vec<_>>()
            .join("  |  ")
    }
}

#[cfg(test)]
mod tests {
    use super::{MetricValue, PageSummary};

    #[test]
    fn summary_line_joins_metrics() {
        let summary = PageSummary::default()
            .count("total", 3)
            .money("revenue", 1_250_000);
        assert_eq!(summary.line(), "total: 3  |  revenue: $12,500.00");
        assert_eq!(summary.get("total"), Some(MetricValue::Count(3)));
        assert_eq!(summary.get("missing"), None);
    }
}
