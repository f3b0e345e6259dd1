use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use crossterm::event::KeyCode;
use ratatui::widgets::TableState;
use worklens_api::{HeatmapPoint, LogEntry, LogQuery, OvertimePoint, SummarizeResponse};

use crate::async_ops::{AsyncCommand, CommandResult};
use crate::config::Config;

/// Which screen the user is viewing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Insights,
    Help,
}

/// Backend reachability, probed once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerStatus {
    Unknown,
    Online { ai_model_loaded: bool },
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

/// One editable input of the filter bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterField {
    #[default]
    EmployeeId,
    EventType,
    ApplicationName,
    StartDate,
    EndDate,
}

impl FilterField {
    pub const ORDER: [Self; 5] = [
        Self::EmployeeId,
        Self::EventType,
        Self::ApplicationName,
        Self::StartDate,
        Self::EndDate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::EmployeeId => "Employee",
            Self::EventType => "Event type",
            Self::ApplicationName => "Application",
            Self::StartDate => "From",
            Self::EndDate => "To",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0);
        if idx == 0 {
            *Self::ORDER.last().unwrap_or(&Self::EmployeeId)
        } else {
            Self::ORDER[idx - 1]
        }
    }
}

/// The filter inputs as the user typed them. Local state only — nothing here
/// reaches the network until the user applies.
#[derive(Debug, Clone, Default)]
pub struct FilterForm {
    pub employee_id: String,
    pub event_type: String,
    pub application_name: String,
    pub start_date: String,
    pub end_date: String,
    pub focused: FilterField,
}

impl FilterForm {
    pub fn value(&self, field: FilterField) -> &str {
        match field {
            FilterField::EmployeeId => &self.employee_id,
            FilterField::EventType => &self.event_type,
            FilterField::ApplicationName => &self.application_name,
            FilterField::StartDate => &self.start_date,
            FilterField::EndDate => &self.end_date,
        }
    }

    fn value_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::EmployeeId => &mut self.employee_id,
            FilterField::EventType => &mut self.event_type,
            FilterField::ApplicationName => &mut self.application_name,
            FilterField::StartDate => &mut self.start_date,
            FilterField::EndDate => &mut self.end_date,
        }
    }

    pub fn clear(&mut self) {
        self.employee_id.clear();
        self.event_type.clear();
        self.application_name.clear();
        self.start_date.clear();
        self.end_date.clear();
    }

    pub fn is_empty(&self) -> bool {
        FilterField::ORDER
            .iter()
            .all(|field| self.value(*field).trim().is_empty())
    }
}

/// All mutable view state, plus the queue of async commands the event loop
/// should dispatch. Transition methods are pure with respect to I/O, so the
/// whole state machine is testable without a terminal or a server.
pub struct App {
    pub config: Config,
    pub view: View,

    // ── Filter bar ────────────────────────────────────────────────────
    pub filters: FilterForm,
    pub editing_filters: bool,

    // ── Log list subsystem ────────────────────────────────────────────
    pub criteria: LogQuery,
    pub logs: Vec<LogEntry>,
    pub logs_loading: bool,
    pub logs_error: Option<String>,
    pub cursor: usize,
    pub table_state: TableState,
    pub selected: HashSet<i64>,

    // ── Summary subsystem ─────────────────────────────────────────────
    pub summarizing: bool,
    pub summary: Option<SummarizeResponse>,
    pub summary_error: Option<String>,

    // ── Insights subsystem ────────────────────────────────────────────
    pub overtime: Option<Vec<OvertimePoint>>,
    pub overtime_loading: bool,
    pub overtime_error: Option<String>,
    pub heatmap: Option<Vec<HeatmapPoint>>,
    pub heatmap_loading: bool,
    pub heatmap_error: Option<String>,

    // ── Chrome ────────────────────────────────────────────────────────
    pub server_status: ServerStatus,
    pub flash_message: Option<(String, FlashLevel)>,

    // Stale-completion guards. Each issued request carries the counter
    // value current at issue time; a completion whose counter no longer
    // matches is dropped.
    request_seq: u64,
    summary_epoch: u64,
    insights_epoch: u64,

    pending_commands: Vec<AsyncCommand>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let criteria = LogQuery {
            limit: config.ui.page_size,
            ..LogQuery::default()
        };
        Self {
            config,
            view: View::Dashboard,
            filters: FilterForm::default(),
            editing_filters: false,
            criteria,
            logs: Vec::new(),
            logs_loading: false,
            logs_error: None,
            cursor: 0,
            table_state: TableState::default(),
            selected: HashSet::new(),
            summarizing: false,
            summary: None,
            summary_error: None,
            overtime: None,
            overtime_loading: false,
            overtime_error: None,
            heatmap: None,
            heatmap_loading: false,
            heatmap_error: None,
            server_status: ServerStatus::Unknown,
            flash_message: None,
            request_seq: 0,
            summary_epoch: 0,
            insights_epoch: 0,
            pending_commands: Vec::new(),
        }
    }

    /// Commands queued since the last call, in issue order.
    pub fn take_pending_commands(&mut self) -> Vec<AsyncCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    /// Startup work: first page of logs plus a one-shot health probe.
    pub fn start(&mut self) {
        self.reload_logs();
        self.pending_commands.push(AsyncCommand::CheckHealth);
    }

    // ── Key handling ──────────────────────────────────────────────────

    /// Returns `true` when the app should quit.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        // Clear flash message on any key press
        self.flash_message = None;

        if self.editing_filters {
            self.handle_filter_key(key);
            return false;
        }

        if self.view == View::Help {
            // Any key exits help
            self.view = View::Dashboard;
            return false;
        }

        match key {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => {
                self.view = View::Help;
                return false;
            }
            KeyCode::Char('i') => {
                if self.view == View::Insights {
                    self.view = View::Dashboard;
                } else {
                    self.enter_insights();
                }
                return false;
            }
            _ => {}
        }

        match self.view {
            View::Dashboard => self.handle_dashboard_key(key),
            View::Insights => self.handle_insights_key(key),
            View::Help => {}
        }
        false
    }

    fn handle_dashboard_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('j') | KeyCode::Down => self.cursor_down(),
            KeyCode::Char('k') | KeyCode::Up => self.cursor_up(),
            KeyCode::Char('g') => self.cursor_first(),
            KeyCode::Char('G') => self.cursor_last(),
            KeyCode::Char(' ') => self.toggle_selected_row(),
            KeyCode::Char('s') => self.summarize(),
            KeyCode::Char('n') | KeyCode::Char(']') | KeyCode::Right => self.next_page(),
            KeyCode::Char('p') | KeyCode::Char('[') | KeyCode::Left => self.prev_page(),
            KeyCode::Char('f') | KeyCode::Char('/') => self.editing_filters = true,
            KeyCode::Char('c') => {
                self.filters.clear();
                self.flash_info("Filters cleared (press f, Enter to apply)");
            }
            KeyCode::Char('r') => self.reload_logs(),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.editing_filters = false,
            KeyCode::Enter => {
                self.editing_filters = false;
                self.apply_filters();
            }
            KeyCode::Tab | KeyCode::Down => self.filters.focused = self.filters.focused.next(),
            KeyCode::BackTab | KeyCode::Up => self.filters.focused = self.filters.focused.prev(),
            KeyCode::Backspace => {
                let focused = self.filters.focused;
                self.filters.value_mut(focused).pop();
            }
            KeyCode::Char(c) => {
                let focused = self.filters.focused;
                self.filters.value_mut(focused).push(c);
            }
            _ => {}
        }
    }

    fn handle_insights_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.view = View::Dashboard,
            KeyCode::Char('r') => self.enter_insights(),
            _ => {}
        }
    }

    // ── Log list transitions ──────────────────────────────────────────

    /// Issue a log query for the current criteria. Supersedes any request
    /// still in flight — its completion will carry a stale `seq` and be
    /// dropped.
    pub fn reload_logs(&mut self) {
        self.request_seq += 1;
        self.logs_loading = true;
        self.logs_error = None;
        self.pending_commands.push(AsyncCommand::FetchLogs {
            query: self.criteria.clone(),
            seq: self.request_seq,
        });
    }

    /// Build criteria from the filter form and reload from page one.
    ///
    /// Applying filters resets the offset: the old page position is
    /// meaningless against a different result set.
    pub fn apply_filters(&mut self) {
        let query = match self.build_query() {
            Ok(query) => query,
            Err(msg) => {
                self.flash_error(msg);
                return;
            }
        };
        self.criteria = query;
        self.reload_logs();
    }

    fn build_query(&self) -> Result<LogQuery, String> {
        let start_date = parse_date_input(&self.filters.start_date)
            .map_err(|e| format!("Invalid 'from' date: {e}"))?;
        let end_date = parse_date_input(&self.filters.end_date)
            .map_err(|e| format!("Invalid 'to' date: {e}"))?;
        Ok(LogQuery {
            employee_id: non_empty(&self.filters.employee_id),
            event_type: non_empty(&self.filters.event_type),
            application_name: non_empty(&self.filters.application_name),
            start_date,
            end_date,
            limit: self.config.ui.page_size,
            offset: 0,
            order_by_timestamp_desc: true,
        })
    }

    // ── Pagination ────────────────────────────────────────────────────

    /// A full page is the only "more pages may exist" signal — the backend
    /// reports no total count.
    pub fn last_page_full(&self) -> bool {
        self.logs.len() as u32 == self.criteria.limit
    }

    pub fn can_next_page(&self) -> bool {
        !self.logs_loading && self.last_page_full()
    }

    pub fn can_prev_page(&self) -> bool {
        !self.logs_loading && self.criteria.offset > 0
    }

    pub fn next_page(&mut self) {
        if !self.can_next_page() {
            return;
        }
        self.criteria.offset += self.criteria.limit;
        self.reload_logs();
    }

    pub fn prev_page(&mut self) {
        if !self.can_prev_page() {
            return;
        }
        self.criteria.offset = self.criteria.offset.saturating_sub(self.criteria.limit);
        self.reload_logs();
    }

    // ── Selection ─────────────────────────────────────────────────────

    pub fn toggle_selected_row(&mut self) {
        let Some(entry) = self.logs.get(self.cursor) else {
            return;
        };
        if !self.selected.remove(&entry.id) {
            self.selected.insert(entry.id);
        }
    }

    fn cursor_down(&mut self) {
        if self.cursor + 1 < self.logs.len() {
            self.cursor += 1;
        }
    }

    fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    fn cursor_last(&mut self) {
        self.cursor = self.logs.len().saturating_sub(1);
    }

    // ── Summarization ─────────────────────────────────────────────────

    pub fn can_summarize(&self) -> bool {
        !self.summarizing && !self.selected.is_empty()
    }

    /// Request a summary of the selected entries. An empty selection is a
    /// client-side validation failure — no network call is made.
    pub fn summarize(&mut self) {
        if self.summarizing {
            return;
        }
        if self.selected.is_empty() {
            self.summary = None;
            self.summary_error = Some("Select at least one log entry to summarize".to_string());
            return;
        }
        let mut log_ids: Vec<i64> = self.selected.iter().copied().collect();
        log_ids.sort_unstable();

        self.summary_epoch += 1;
        self.summarizing = true;
        self.summary = None;
        self.summary_error = None;
        self.pending_commands.push(AsyncCommand::Summarize {
            log_ids,
            epoch: self.summary_epoch,
        });
    }

    // ── Insights ──────────────────────────────────────────────────────

    /// Enter the insights view and fetch both datasets independently. Each
    /// entry re-fetches; results from a previous entry are dropped.
    pub fn enter_insights(&mut self) {
        self.view = View::Insights;
        self.insights_epoch += 1;
        self.overtime = None;
        self.overtime_loading = true;
        self.overtime_error = None;
        self.heatmap = None;
        self.heatmap_loading = true;
        self.heatmap_error = None;
        self.pending_commands.push(AsyncCommand::FetchOvertime {
            epoch: self.insights_epoch,
        });
        self.pending_commands.push(AsyncCommand::FetchHeatmap {
            epoch: self.insights_epoch,
        });
    }

    // ── Applying async results ────────────────────────────────────────

    pub fn apply_command_result(&mut self, result: CommandResult) {
        match result {
            CommandResult::Logs { seq, result } => {
                if seq != self.request_seq {
                    // Superseded by a newer query — last issued wins.
                    return;
                }
                self.logs_loading = false;
                match result {
                    Ok(rows) => {
                        self.logs = rows;
                        self.logs_error = None;
                        self.cursor = 0;
                        self.selected.clear();
                        // A new page invalidates the old summary; a summary
                        // still in flight is stale now too.
                        self.summary = None;
                        self.summary_error = None;
                        self.summary_epoch += 1;
                        self.summarizing = false;
                    }
                    Err(msg) => {
                        // Clearing avoids showing rows (and selections) that
                        // no longer match what the user asked for.
                        self.logs.clear();
                        self.selected.clear();
                        self.cursor = 0;
                        self.logs_error = Some(msg);
                    }
                }
            }

            CommandResult::Summary { epoch, result } => {
                if epoch != self.summary_epoch {
                    return;
                }
                self.summarizing = false;
                match result {
                    Ok(resp) => {
                        self.summary = Some(resp);
                        self.summary_error = None;
                    }
                    Err(msg) => {
                        self.summary = None;
                        self.summary_error = Some(msg);
                    }
                }
            }

            CommandResult::Overtime { epoch, result } => {
                if epoch != self.insights_epoch {
                    return;
                }
                self.overtime_loading = false;
                match result {
                    Ok(points) => self.overtime = Some(points),
                    Err(msg) => self.overtime_error = Some(msg),
                }
            }

            CommandResult::Heatmap { epoch, result } => {
                if epoch != self.insights_epoch {
                    return;
                }
                self.heatmap_loading = false;
                match result {
                    Ok(points) => self.heatmap = Some(points),
                    Err(msg) => self.heatmap_error = Some(msg),
                }
            }

            CommandResult::Health(result) => {
                self.server_status = match result {
                    Ok(health) if health.status == "ok" => ServerStatus::Online {
                        ai_model_loaded: health.ai_model_loaded,
                    },
                    Ok(_) | Err(_) => ServerStatus::Offline,
                };
            }
        }
    }

    // ── Flash messages ────────────────────────────────────────────────

    pub fn flash_success(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), FlashLevel::Success));
    }

    pub fn flash_error(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), FlashLevel::Error));
    }

    pub fn flash_info(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), FlashLevel::Info));
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a user-typed timestamp bound. Accepts RFC 3339, a naive
/// `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD` (midnight).
fn parse_date_input(input: &str) -> Result<Option<DateTime<Utc>>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(Utc.from_utc_datetime(&naive)));
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(Some(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))));
    }
    Err(format!("{input} (use YYYY-MM-DD or RFC 3339)"))
}
