use std::time::Duration;

use worklens_api::{HealthResponse, HeatmapPoint, LogEntry, LogQuery, OvertimePoint};
use worklens_api_client::ApiClient;

use crate::config::Config;

/// Commands that require async I/O (network calls).
///
/// `seq`/`epoch` values are minted by the app when the command is issued and
/// echoed back in the result so stale completions can be discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncCommand {
    FetchLogs { query: LogQuery, seq: u64 },
    Summarize { log_ids: Vec<i64>, epoch: u64 },
    FetchOvertime { epoch: u64 },
    FetchHeatmap { epoch: u64 },
    CheckHealth,
}

/// Results returned by async commands. Errors are already rendered into
/// user-displayable strings.
pub enum CommandResult {
    Logs {
        seq: u64,
        result: Result<Vec<LogEntry>, String>,
    },
    Summary {
        epoch: u64,
        result: Result<worklens_api::SummarizeResponse, String>,
    },
    Overtime {
        epoch: u64,
        result: Result<Vec<OvertimePoint>, String>,
    },
    Heatmap {
        epoch: u64,
        result: Result<Vec<HeatmapPoint>, String>,
    },
    Health(Result<HealthResponse, String>),
}

fn make_client(config: &Config) -> Result<ApiClient, String> {
    ApiClient::new(
        &config.server.url,
        Duration::from_secs(config.server.timeout_secs),
    )
    .map_err(|e| format!("Failed to create HTTP client: {e}"))
}

pub async fn execute(cmd: AsyncCommand, config: &Config) -> CommandResult {
    match cmd {
        AsyncCommand::FetchLogs { query, seq } => {
            let result = async {
                let client = make_client(config)?;
                client
                    .query_logs(&query)
                    .await
                    .map_err(|e| e.display_message())
            }
            .await;
            if let Err(ref e) = result {
                tracing::warn!(seq, "log query failed: {e}");
            }
            CommandResult::Logs { seq, result }
        }

        AsyncCommand::Summarize { log_ids, epoch } => {
            let result = async {
                let client = make_client(config)?;
                client
                    .summarize_logs(&log_ids)
                    .await
                    .map_err(|e| e.display_message())
            }
            .await;
            if let Err(ref e) = result {
                tracing::warn!("summarization failed: {e}");
            }
            CommandResult::Summary { epoch, result }
        }

        AsyncCommand::FetchOvertime { epoch } => {
            let result = async {
                let client = make_client(config)?;
                client
                    .overtime_analysis()
                    .await
                    .map_err(|e| e.display_message())
            }
            .await;
            if let Err(ref e) = result {
                tracing::warn!("overtime analysis fetch failed: {e}");
            }
            CommandResult::Overtime { epoch, result }
        }

        AsyncCommand::FetchHeatmap { epoch } => {
            let result = async {
                let client = make_client(config)?;
                client
                    .focus_heatmap()
                    .await
                    .map_err(|e| e.display_message())
            }
            .await;
            if let Err(ref e) = result {
                tracing::warn!("focus heatmap fetch failed: {e}");
            }
            CommandResult::Heatmap { epoch, result }
        }

        AsyncCommand::CheckHealth => {
            let result = async {
                let client = make_client(config)?;
                client.health().await.map_err(|e| e.display_message())
            }
            .await;
            CommandResult::Health(result)
        }
    }
}
