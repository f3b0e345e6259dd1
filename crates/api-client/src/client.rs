use std::time::Duration;

use worklens_api::{
    HealthResponse, HeatmapPoint, LogEntry, LogQuery, OvertimePoint, SummarizeRequest,
    SummarizeResponse,
};

use crate::error::{http_error, ApiError};

/// Typed HTTP client for the WorkLens activity-log API.
///
/// Each method is a single request/response round trip — no retries, no
/// caching. The timeout passed to [`ApiClient::new`] applies to every
/// request; hitting it yields [`ApiError::Timeout`].
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new client with the given base URL and request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── Logs ──────────────────────────────────────────────────────────────

    /// Fetch one page of activity logs matching `query`.
    pub async fn query_logs(&self, query: &LogQuery) -> Result<Vec<LogEntry>, ApiError> {
        let url = format!("{}?{}", self.url("/logs/"), logs_query_string(query));
        let resp = self.client.get(&url).send().await?;
        parse_response(resp).await
    }

    // ── Summarization ─────────────────────────────────────────────────────

    /// Request an AI summary of the given log ids.
    ///
    /// An empty list is forwarded as-is — rejecting it is the caller's
    /// responsibility (the backend answers 400).
    pub async fn summarize_logs(&self, log_ids: &[i64]) -> Result<SummarizeResponse, ApiError> {
        let body = SummarizeRequest {
            log_ids: log_ids.to_vec(),
        };
        let resp = self
            .client
            .post(self.url("/summarize_logs/"))
            .json(&body)
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Dashboard aggregates ──────────────────────────────────────────────

    pub async fn overtime_analysis(&self) -> Result<Vec<OvertimePoint>, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/dashboard/overtime-analysis"))
            .send()
            .await?;
        parse_response(resp).await
    }

    pub async fn focus_heatmap(&self) -> Result<Vec<HeatmapPoint>, ApiError> {
        let resp = self
            .client
            .get(self.url("/api/dashboard/focus-heatmap"))
            .send()
            .await?;
        parse_response(resp).await
    }

    // ── Health ────────────────────────────────────────────────────────────

    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let resp = self.client.get(self.url("/health/")).send().await?;
        parse_response(resp).await
    }
}

/// Build the query string for `GET /logs/`.
///
/// Only present, non-empty filter fields become parameters; `limit`,
/// `offset` and the order flag are always sent. String values are
/// percent-encoded.
fn logs_query_string(query: &LogQuery) -> String {
    let mut params = Vec::new();

    if let Some(ref id) = query.employee_id {
        if !id.is_empty() {
            params.push(format!("employee_id={}", urlencoding::encode(id)));
        }
    }
    if let Some(ref date) = query.start_date {
        params.push(format!(
            "start_date={}",
            urlencoding::encode(&date.to_rfc3339())
        ));
    }
    if let Some(ref date) = query.end_date {
        params.push(format!(
            "end_date={}",
            urlencoding::encode(&date.to_rfc3339())
        ));
    }
    if let Some(ref event_type) = query.event_type {
        if !event_type.is_empty() {
            params.push(format!("event_type={}", urlencoding::encode(event_type)));
        }
    }
    if let Some(ref app) = query.application_name {
        if !app.is_empty() {
            params.push(format!("application_name={}", urlencoding::encode(app)));
        }
    }
    params.push(format!("limit={}", query.limit));
    params.push(format!("offset={}", query.offset));
    params.push(format!(
        "order_by_timestamp_desc={}",
        query.order_by_timestamp_desc
    ));

    params.join("&")
}

/// Parse an HTTP response: return the deserialized body on 2xx,
/// or an [`ApiError::Http`] carrying the backend's message otherwise.
async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        tracing::debug!(%status, "API request failed");
        return Err(http_error(status, &body));
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use chrono::{TimeZone, Utc};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn query_param_names(query: &str) -> Vec<String> {
        query
            .split('&')
            .filter_map(|pair| pair.split('=').next())
            .map(String::from)
            .collect()
    }

    #[test]
    fn empty_criteria_produce_no_filter_params() {
        let qs = logs_query_string(&LogQuery::default());
        assert_eq!(qs, "limit=100&offset=0&order_by_timestamp_desc=true");
    }

    #[test]
    fn empty_string_filters_are_not_sent() {
        let query = LogQuery {
            employee_id: Some(String::new()),
            event_type: Some(String::new()),
            application_name: Some(String::new()),
            ..LogQuery::default()
        };
        let qs = logs_query_string(&query);
        assert!(!qs.contains("employee_id"));
        assert!(!qs.contains("event_type"));
        assert!(!qs.contains("application_name"));
    }

    #[test]
    fn present_filters_become_params() {
        let query = LogQuery {
            employee_id: Some("john.doe".to_string()),
            event_type: Some("keyboard".to_string()),
            application_name: Some("Code".to_string()),
            start_date: Some(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()),
            end_date: None,
            limit: 50,
            offset: 100,
            order_by_timestamp_desc: false,
        };
        let qs = logs_query_string(&query);
        assert!(qs.contains("employee_id=john.doe"));
        assert!(qs.contains("event_type=keyboard"));
        assert!(qs.contains("application_name=Code"));
        assert!(qs.contains("start_date="));
        assert!(!qs.contains("end_date="));
        assert!(qs.contains("limit=50"));
        assert!(qs.contains("offset=100"));
        assert!(qs.contains("order_by_timestamp_desc=false"));
    }

    #[test]
    fn string_filters_are_percent_encoded() {
        let query = LogQuery {
            application_name: Some("Visual Studio".to_string()),
            ..LogQuery::default()
        };
        let qs = logs_query_string(&query);
        assert!(qs.contains("application_name=Visual%20Studio"));
    }

    #[tokio::test]
    async fn query_logs_hits_logs_path_and_parses_rows() {
        let server = MockServer::start().await;
        let rows = serde_json::json!([
            {"id": 1, "employee_id": "john.doe", "timestamp": "2025-06-01T09:00:00Z", "event_type": "keyboard"},
            {"id": 2, "employee_id": "john.doe", "timestamp": "2025-06-01T09:01:00Z", "event_type": "mouse_click"},
            {"id": 3, "employee_id": "john.doe", "timestamp": "2025-06-01T09:02:00Z", "event_type": "app_focus"}
        ]);
        Mock::given(method("GET"))
            .and(path("/logs/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(rows))
            .expect(1)
            .mount(&server)
            .await;

        let query = LogQuery {
            employee_id: Some("john.doe".to_string()),
            ..LogQuery::default()
        };
        let logs = client_for(&server).query_logs(&query).await.unwrap();
        assert_eq!(logs.len(), 3);
        assert_eq!(logs[0].id, 1);

        let requests = server.received_requests().await.unwrap();
        let sent = requests[0].url.query().unwrap().to_string();
        assert!(sent.contains("employee_id=john.doe"));
        assert!(sent.contains("limit=100"));
        assert!(sent.contains("offset=0"));
        assert!(sent.contains("order_by_timestamp_desc=true"));
        let names = query_param_names(&sent);
        assert!(!names.contains(&"event_type".to_string()));
        assert!(!names.contains(&"application_name".to_string()));
        assert!(!names.contains(&"start_date".to_string()));
    }

    #[tokio::test]
    async fn summarize_posts_id_list_as_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize_logs/"))
            .and(body_json(serde_json::json!({"log_ids": [5, 9]})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"summary": "Did X and Y"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let resp = client_for(&server).summarize_logs(&[5, 9]).await.unwrap();
        assert_eq!(resp.summary, "Did X and Y");
        assert_eq!(resp.employee_id, None);
    }

    #[tokio::test]
    async fn summarize_accepts_rich_response_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize_logs/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "employee_id": "john.doe",
                "num_logs_summarized": 2,
                "summary": "typed a report"
            })))
            .mount(&server)
            .await;

        let resp = client_for(&server).summarize_logs(&[1, 2]).await.unwrap();
        assert_eq!(resp.summary, "typed a report");
        assert_eq!(resp.num_logs_summarized, Some(2));
    }

    #[tokio::test]
    async fn non_2xx_carries_backend_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize_logs/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(
                serde_json::json!({"detail": "No log IDs provided for summarization."}),
            ))
            .mount(&server)
            .await;

        let err = client_for(&server).summarize_logs(&[]).await.unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(message, "No log IDs provided for summarization.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn dashboard_endpoints_parse_aggregates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/overtime-analysis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"category": "Late meetings", "execution_events": 12, "communication_events": 30}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/dashboard/focus-heatmap"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!([{"day": "Mon", "hour": 9, "focus_score": 0.8}]),
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let overtime = client.overtime_analysis().await.unwrap();
        assert_eq!(overtime[0].category, "Late meetings");
        assert_eq!(overtime[0].communication_events, 30);

        let heatmap = client.focus_heatmap().await.unwrap();
        assert_eq!(heatmap[0].day, "Mon");
        assert_eq!(heatmap[0].hour, 9);
    }

    #[tokio::test]
    async fn slow_response_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(&server.uri(), Duration::from_millis(50)).unwrap();
        let err = client.query_logs(&LogQuery::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Timeout));
    }

    #[tokio::test]
    async fn unreachable_server_maps_to_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener); // release the port so the request fails with ECONNREFUSED

        let client = ApiClient::new(&format!("http://{addr}"), Duration::from_secs(1)).unwrap();
        let err = client.query_logs(&LogQuery::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn undecodable_body_maps_to_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/logs/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .query_logs(&LogQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
