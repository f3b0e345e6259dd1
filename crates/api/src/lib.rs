//! Shared API types for the WorkLens activity-log backend.
//!
//! This crate is the **single source of truth** for all request/response
//! types exchanged with the backend. The HTTP client and the TUI import
//! these types directly; nothing here performs I/O.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Logs ────────────────────────────────────────────────────────────────────

/// One recorded activity event for an employee.
///
/// `id` is server-assigned, unique within any result set and stable across
/// requests — it is the selection key for summarization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogEntry {
    pub id: i64,
    pub employee_id: String,
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_path: Option<String>,
}

/// Filter/pagination/order criteria for `GET /logs/`.
///
/// `None` and empty-string filters are *absent* — the client must not turn
/// them into query parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogQuery {
    pub employee_id: Option<String>,
    pub event_type: Option<String>,
    pub application_name: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_order_desc")]
    pub order_by_timestamp_desc: bool,
}

impl Default for LogQuery {
    fn default() -> Self {
        Self {
            employee_id: None,
            event_type: None,
            application_name: None,
            start_date: None,
            end_date: None,
            limit: default_limit(),
            offset: 0,
            order_by_timestamp_desc: default_order_desc(),
        }
    }
}

fn default_limit() -> u32 {
    100
}
fn default_order_desc() -> bool {
    true
}

// ─── Summarization ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub log_ids: Vec<i64>,
}

/// Response of `POST /summarize_logs/`.
///
/// Deployed backends answer with either `{summary}` or
/// `{employee_id, num_logs_summarized, summary}` — the metadata fields are
/// optional so both shapes deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummarizeResponse {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_logs_summarized: Option<u64>,
}

// ─── Dashboard aggregates ────────────────────────────────────────────────────

/// One category bar of the overtime root-cause chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OvertimePoint {
    pub category: String,
    pub execution_events: u64,
    pub communication_events: u64,
}

/// One cell of the focus heatmap. `focus_score` is in `0..=1`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapPoint {
    pub day: String,
    pub hour: u32,
    pub focus_score: f64,
}

// ─── Health ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub ai_model_loaded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_entry_deserializes_without_optional_fields() {
        let entry: LogEntry = serde_json::from_str(
            r#"{"id":7,"employee_id":"john.doe","timestamp":"2025-06-01T09:30:00Z","event_type":"keyboard"}"#,
        )
        .unwrap();
        assert_eq!(entry.id, 7);
        assert_eq!(entry.employee_id, "john.doe");
        assert_eq!(entry.application_name, None);
        assert_eq!(entry.screenshot_path, None);
    }

    #[test]
    fn log_entry_deserializes_with_all_fields() {
        let entry: LogEntry = serde_json::from_str(
            r#"{"id":1,"employee_id":"a","timestamp":"2025-06-01T09:30:00Z","event_type":"app_focus","application_name":"Firefox","window_title":"Inbox","event_detail":"focus gained","screenshot_path":"/shots/1.png"}"#,
        )
        .unwrap();
        assert_eq!(entry.application_name.as_deref(), Some("Firefox"));
        assert_eq!(entry.screenshot_path.as_deref(), Some("/shots/1.png"));
    }

    #[test]
    fn log_query_defaults() {
        let query = LogQuery::default();
        assert_eq!(query.limit, 100);
        assert_eq!(query.offset, 0);
        assert!(query.order_by_timestamp_desc);
        assert!(query.employee_id.is_none());
    }

    #[test]
    fn summarize_response_accepts_minimal_shape() {
        let resp: SummarizeResponse =
            serde_json::from_str(r#"{"summary":"Did X and Y"}"#).unwrap();
        assert_eq!(resp.summary, "Did X and Y");
        assert_eq!(resp.employee_id, None);
        assert_eq!(resp.num_logs_summarized, None);
    }

    #[test]
    fn summarize_response_accepts_rich_shape() {
        let resp: SummarizeResponse = serde_json::from_str(
            r#"{"employee_id":"john.doe","num_logs_summarized":4,"summary":"typed a report"}"#,
        )
        .unwrap();
        assert_eq!(resp.employee_id.as_deref(), Some("john.doe"));
        assert_eq!(resp.num_logs_summarized, Some(4));
    }

    #[test]
    fn heatmap_point_round_trips() {
        let point = HeatmapPoint {
            day: "Mon".to_string(),
            hour: 9,
            focus_score: 0.8,
        };
        let json = serde_json::to_string(&point).unwrap();
        let back: HeatmapPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
