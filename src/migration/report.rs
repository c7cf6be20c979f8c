use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Succeeded,
    Failed,
}

/// Ergebnis für eine ID innerhalb eines Batch Laufs
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ItemResult {
    pub id: String,
    pub status: ItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Batch Report für Export und Import
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub operation: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub succeeded: usize,
    pub failed: usize,
    pub items: Vec<ItemResult>,
}

impl BatchReport {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            started_at: Utc::now(),
            finished_at: None,
            succeeded: 0,
            failed: 0,
            items: Vec::new(),
        }
    }

    pub fn record_success(&mut self, id: &str, arn: Option<String>, warnings: Vec<String>) {
        self.succeeded += 1;
        self.items.push(ItemResult {
            id: id.to_string(),
            status: ItemStatus::Succeeded,
            arn,
            error: None,
            warnings,
        });
    }

    pub fn record_failure(&mut self, id: &str, error: impl ToString) {
        self.failed += 1;
        self.items.push(ItemResult {
            id: id.to_string(),
            status: ItemStatus::Failed,
            arn: None,
            error: Some(error.to_string()),
            warnings: Vec::new(),
        });
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_follow_records() {
        let mut report = BatchReport::new("export-data-sets");
        report.record_success("ds1", None, Vec::new());
        report.record_failure("ds2", "DescribeDataSet failed");
        report.record_success("ds1", None, vec!["duplicate".to_string()]);

        let report = report.finish();

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.failed, 1);
        assert!(report.has_failures());
        assert!(report.finished_at.is_some());
        let ids: Vec<_> = report.items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["ds1", "ds2", "ds1"]);
    }

    #[test]
    fn test_serialized_status_is_lowercase() {
        let mut report = BatchReport::new("import-data-sets");
        report.record_failure("ds1", "boom");

        let json = serde_json::to_value(&report).expect("Failed to serialize");

        assert_eq!(json["items"][0]["status"], "failed");
        assert_eq!(json["items"][0]["error"], "boom");
        assert!(json["items"][0].get("arn").is_none());
    }
}
