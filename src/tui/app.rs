//! Application State
//!
//! Owns the schema catalog, the search session and all UI state. Fetches run
//! on spawned tasks and report back through [`AppEvent`]s; only the UI task
//! mutates state.

use crate::api::SpyApi;
use crate::config::Config;
use crate::models::{Collection, SearchMode};
use crate::presenter::PLACEHOLDER;
use crate::schema::{CollectionSummary, SchemaCatalog, SchemaLoader};
use crate::search::{dispatch, Epoch, PageResult, PageState, SearchParams, SearchSession};
use crate::tui::event::AppAction;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tui_textarea::TextArea;

/// Page size of the schema overview
pub const SCHEMA_PAGE_SIZE: usize = 10;

const QUERY_PLACEHOLDER: &str = "Type a query and press Enter (empty fetches all objects)";

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Browse,
    Schema,
    Help,
    Detail,
}

/// Focused pane of the browse view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Query,
    Table,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Query,
            Focus::Query => Focus::Table,
            Focus::Table => Focus::Sidebar,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Sidebar => Focus::Table,
            Focus::Query => Focus::Sidebar,
            Focus::Table => Focus::Query,
        }
    }
}

/// Results of background work
#[derive(Debug)]
pub enum AppEvent {
    SchemaLoaded(SchemaCatalog),
    PageLoaded {
        epoch: Epoch,
        mode: SearchMode,
        result: PageResult,
    },
}

/// Titled list of full values shown in a popup: one result row, or the
/// property list of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct DetailPopup {
    pub title: String,
    /// (column title, full value)
    pub fields: Vec<(String, String)>,
}

pub struct App {
    pub config: Config,
    api: Arc<dyn SpyApi>,

    // UI State
    pub view: View,
    /// View to return to when an overlay closes
    pub base_view: View,
    pub focus: Focus,
    pub should_quit: bool,
    /// Timer ticks, drives the loading spinner
    pub tick: usize,

    // Schema State
    pub catalog: SchemaCatalog,
    pub schema_loading: bool,
    pub sidebar_index: usize,
    pub schema_filter: String,
    pub schema_page: PageState,
    pub schema_index: usize,

    // Search State
    pub session: SearchSession,
    pub query_input: TextArea<'static>,
    pub table_index: usize,
    pub detail: Option<DetailPopup>,
    pub last_updated: Option<DateTime<Local>>,

    event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl App {
    pub fn new(config: Config, api: Arc<dyn SpyApi>) -> Self {
        let params = SearchParams {
            certainty: config.certainty,
            alpha: config.alpha,
        };
        let session = SearchSession::new(config.page_size, params);
        let (tx, rx) = mpsc::channel(100);

        Self {
            config,
            api,
            view: View::Browse,
            base_view: View::Browse,
            focus: Focus::Sidebar,
            should_quit: false,
            tick: 0,
            catalog: SchemaCatalog::default(),
            schema_loading: false,
            sidebar_index: 0,
            schema_filter: String::new(),
            schema_page: PageState::new(SCHEMA_PAGE_SIZE),
            schema_index: 0,
            session,
            query_input: new_query_input(),
            table_index: 0,
            detail: None,
            last_updated: None,
            event_rx: rx,
            event_tx: tx,
        }
    }

    /// Wait for the next background result
    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.event_rx.recv().await
    }

    /// Fetch schema and health in the background
    pub fn load_schema(&mut self) {
        self.schema_loading = true;
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let catalog = SchemaLoader::load(api.as_ref()).await;
            tx.send(AppEvent::SchemaLoaded(catalog)).await.ok();
        });
    }

    /// Dispatch the session's current request, if it can build one
    pub fn fetch_page(&mut self) {
        let Some((epoch, request)) = self.session.begin_request() else {
            return;
        };
        debug!(
            epoch = epoch.value(),
            collection = %request.collection,
            path = %request.path(),
            "Dispatching page request"
        );

        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let mode = request.mode;
        tokio::spawn(async move {
            let result = dispatch(api.as_ref(), &request).await;
            tx.send(AppEvent::PageLoaded {
                epoch,
                mode,
                result,
            })
            .await
            .ok();
        });
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::SchemaLoaded(catalog) => {
                self.schema_loading = false;
                self.catalog = catalog;
                self.sidebar_index = self
                    .sidebar_index
                    .min(self.catalog.len().saturating_sub(1));
                self.refresh_schema_page();
                self.last_updated = Some(Local::now());

                // Reload: pick up the new property snapshot of the open collection
                let open = self
                    .session
                    .collection()
                    .and_then(|name| self.catalog.collection(name))
                    .cloned();
                if let Some(collection) = open {
                    self.session.open(&collection);
                    self.query_input = new_query_input();
                    self.fetch_page();
                }
            }
            AppEvent::PageLoaded {
                epoch,
                mode,
                result,
            } => {
                if self.session.apply(epoch, mode, result) {
                    self.table_index = self
                        .table_index
                        .min(self.session.rows().len().saturating_sub(1));
                    self.last_updated = Some(Local::now());
                }
            }
        }
    }

    pub fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Tick {
            self.tick = self.tick.wrapping_add(1);
            return;
        }

        // Any key closes an overlay
        if matches!(self.view, View::Help | View::Detail) {
            match action {
                AppAction::Quit | AppAction::ForceQuit => self.should_quit = true,
                _ => self.close_overlay(),
            }
            return;
        }

        match action {
            AppAction::Quit | AppAction::ForceQuit => self.should_quit = true,
            AppAction::Tick => {}
            AppAction::ToggleHelp => {
                self.base_view = self.view;
                self.view = View::Help;
            }
            AppAction::ToggleSchema => {
                self.view = if self.view == View::Schema {
                    View::Browse
                } else {
                    View::Schema
                };
            }
            AppAction::ShowProperties => self.show_properties(),
            AppAction::Escape => {
                if self.view == View::Schema {
                    self.view = View::Browse;
                } else if self.focus == Focus::Query {
                    self.focus = Focus::Sidebar;
                }
            }
            AppAction::Submit => self.submit(),
            AppAction::NextFocus => {
                if self.view == View::Browse {
                    self.focus = self.focus.next();
                }
            }
            AppAction::PrevFocus => {
                if self.view == View::Browse {
                    self.focus = self.focus.prev();
                }
            }
            AppAction::MoveUp => self.move_selection(-1),
            AppAction::MoveDown => self.move_selection(1),
            AppAction::PrevPage => self.change_page(false),
            AppAction::NextPage => self.change_page(true),
            AppAction::Input(key) => self.handle_input(key),
        }
    }

    fn close_overlay(&mut self) {
        self.detail = None;
        self.view = self.base_view;
    }

    fn submit(&mut self) {
        match (self.view, self.focus) {
            (View::Schema, _) => {
                let name = self
                    .schema_page_rows()
                    .get(self.schema_index)
                    .map(|s| s.name.clone());
                if let Some(name) = name {
                    if let Some(index) = self.catalog.collections().iter().position(|c| c.name == name)
                    {
                        self.sidebar_index = index;
                        self.open_selected();
                    }
                    self.view = View::Browse;
                }
            }
            (_, Focus::Sidebar) => self.open_selected(),
            (_, Focus::Query) => {
                let query = self.query_input.lines().join(" ").trim().to_string();
                self.session.set_query(&query);
                self.fetch_page();
                self.focus = Focus::Table;
            }
            (_, Focus::Table) => self.show_detail(),
        }
    }

    /// Open the collection under the sidebar cursor and fetch its first page
    pub fn open_selected(&mut self) {
        let Some(collection) = self.catalog.collections().get(self.sidebar_index).cloned() else {
            return;
        };
        info!(collection = %collection.name, "Opening collection");
        self.session.open(&collection);
        self.query_input = new_query_input();
        self.table_index = 0;
        self.fetch_page();
    }

    fn show_detail(&mut self) {
        let table = self.session.table();
        let Some(row) = table.rows.get(self.table_index) else {
            return;
        };
        let fields = table
            .columns
            .iter()
            .enumerate()
            .map(|(c, column)| {
                (
                    column.title().to_string(),
                    table
                        .cell_detail(self.table_index, c)
                        .unwrap_or_else(|| table.cell_text(self.table_index, c)),
                )
            })
            .collect();

        self.detail = Some(DetailPopup {
            title: row.id.clone(),
            fields,
        });
        self.base_view = self.view;
        self.view = View::Detail;
    }

    /// Collection under the cursor of the schema overview or the sidebar
    fn selected_collection(&self) -> Option<&Collection> {
        match self.view {
            View::Schema => {
                let name = self
                    .schema_page_rows()
                    .get(self.schema_index)
                    .map(|s| s.name.clone())?;
                self.catalog.collection(&name)
            }
            _ => self.catalog.collections().get(self.sidebar_index),
        }
    }

    fn show_properties(&mut self) {
        let Some(collection) = self.selected_collection() else {
            return;
        };

        let description = collection
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "No description available".to_string());
        let mut fields = vec![("Description".to_string(), description)];
        fields.extend(collection.properties.iter().map(|p| {
            (
                p.name.clone(),
                format!(
                    "Data type: {}\nTokenization: {}\nDescription: {}",
                    p.data_type,
                    p.tokenization.as_deref().unwrap_or(PLACEHOLDER),
                    p.description.as_deref().filter(|d| !d.is_empty()).unwrap_or(PLACEHOLDER)
                ),
            )
        }));

        self.detail = Some(DetailPopup {
            title: format!("Properties for: {}", collection.name),
            fields,
        });
        self.base_view = self.view;
        self.view = View::Detail;
    }

    fn move_selection(&mut self, delta: isize) {
        let len = match (self.view, self.focus) {
            (View::Schema, _) => self.schema_page_rows().len(),
            (_, Focus::Sidebar) => self.catalog.len(),
            (_, Focus::Table) => self.session.rows().len(),
            (_, Focus::Query) => return,
        };
        let index = match (self.view, self.focus) {
            (View::Schema, _) => &mut self.schema_index,
            (_, Focus::Sidebar) => &mut self.sidebar_index,
            _ => &mut self.table_index,
        };
        if len == 0 {
            *index = 0;
            return;
        }
        *index = index.saturating_add_signed(delta).min(len - 1);
    }

    fn change_page(&mut self, forward: bool) {
        if self.view == View::Schema {
            let changed = if forward {
                self.schema_page.next_page()
            } else {
                self.schema_page.prev_page()
            };
            if changed {
                self.schema_index = 0;
            }
            return;
        }

        let changed = if forward {
            self.session.next_page()
        } else {
            self.session.prev_page()
        };
        if changed {
            self.table_index = 0;
            self.fetch_page();
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        if self.view == View::Schema {
            match key.code {
                KeyCode::Char(c) => {
                    self.schema_filter.push(c);
                    self.refresh_schema_page();
                }
                KeyCode::Backspace => {
                    self.schema_filter.pop();
                    self.refresh_schema_page();
                }
                KeyCode::Left => self.change_page(false),
                KeyCode::Right => self.change_page(true),
                _ => {}
            }
            return;
        }

        if self.focus == Focus::Query {
            self.query_input.input(key);
            return;
        }

        match key.code {
            KeyCode::Char('m') => {
                if self.session.cycle_mode() {
                    self.fetch_page();
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                if self.session.adjust_parameter(1) {
                    self.fetch_page();
                }
            }
            KeyCode::Char('-') => {
                if self.session.adjust_parameter(-1) {
                    self.fetch_page();
                }
            }
            KeyCode::Char('s') => {
                if self.session.cycle_page_size() {
                    self.table_index = 0;
                    self.fetch_page();
                }
            }
            KeyCode::Char('[') | KeyCode::Left => self.change_page(false),
            KeyCode::Char(']') | KeyCode::Right => self.change_page(true),
            KeyCode::Char('r') => self.load_schema(),
            KeyCode::Char('/') => self.focus = Focus::Query,
            _ => {}
        }
    }

    fn refresh_schema_page(&mut self) {
        self.schema_page.reset();
        self.schema_page.total = self.catalog.summaries(&self.schema_filter).len() as u64;
        self.schema_index = 0;
    }

    /// Overview rows on the current schema page
    pub fn schema_page_rows(&self) -> Vec<CollectionSummary> {
        let all = self.catalog.summaries(&self.schema_filter);
        self.schema_page.slice(&all).to_vec()
    }

    pub fn api_url(&self) -> &str {
        &self.config.api_url
    }
}

fn new_query_input() -> TextArea<'static> {
    let mut input = TextArea::default();
    input.set_cursor_line_style(ratatui::style::Style::default());
    input.set_placeholder_text(QUERY_PLACEHOLDER);
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AggregateResponse, CollectionInfo, Collections, HealthResponse, HealthStatus, ResultRow,
        SearchResponse,
    };
    use crate::schema::Health;
    use crate::search::{AggregateRequest, GenerateRequest, SearchRequest};
    use crate::types::SpyResult;
    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;
    use serde_json::json;
    use std::time::Duration;

    /// Echoes the query back as the row id; "slow" answers late
    struct EchoApi;

    #[async_trait]
    impl SpyApi for EchoApi {
        async fn health(&self) -> SpyResult<HealthResponse> {
            Ok(HealthResponse {
                status: HealthStatus::Healthy,
                weaviate: Some("connected".into()),
                error: None,
            })
        }
        async fn schema(&self) -> SpyResult<Collections> {
            Ok(serde_json::from_value(json!({
                "Article": {
                    "name": "Article",
                    "description": "News articles",
                    "properties": [{
                        "name": "title",
                        "data_type": "text",
                        "tokenization": "word",
                        "description": "Headline"
                    }]
                },
                "Author": {
                    "name": "Author",
                    "properties": [{ "name": "name", "data_type": "text" }]
                }
            }))
            .unwrap())
        }
        async fn collection_info(&self, _name: &str) -> SpyResult<CollectionInfo> {
            unimplemented!()
        }
        async fn search(&self, request: &SearchRequest) -> SpyResult<SearchResponse> {
            let query = request.body.query.clone().unwrap_or_default();
            if query == "slow" {
                tokio::time::sleep(Duration::from_millis(50)).await;
            }
            Ok(SearchResponse {
                data: vec![ResultRow {
                    uuid: format!("{}:{}", request.collection, query),
                    certainty: Some(0.9),
                    ..Default::default()
                }],
                count: 42,
                search_type: None,
                alpha: None,
            })
        }
        async fn generate(
            &self,
            _collection: &str,
            _request: &GenerateRequest,
        ) -> SpyResult<SearchResponse> {
            unimplemented!()
        }
        async fn aggregate(
            &self,
            _collection: &str,
            _request: &AggregateRequest,
        ) -> SpyResult<AggregateResponse> {
            unimplemented!()
        }
    }

    fn key(c: char) -> AppAction {
        AppAction::Input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    async fn pump(app: &mut App) {
        let event = app.next_event().await.unwrap();
        app.handle_event(event);
    }

    async fn loaded_app() -> App {
        let mut app = App::new(Config::default(), Arc::new(EchoApi));
        app.load_schema();
        pump(&mut app).await;
        app
    }

    #[tokio::test]
    async fn test_schema_load_populates_sidebar() {
        let app = loaded_app().await;
        assert!(!app.schema_loading);
        assert_eq!(app.catalog.len(), 2);
        assert_eq!(app.catalog.health, Health::Connected);
        assert_eq!(app.schema_page.total, 2);
        assert!(app.session.collection().is_none());
    }

    #[tokio::test]
    async fn test_open_collection_fetches_first_page() {
        let mut app = loaded_app().await;
        app.handle_action(AppAction::MoveDown);
        app.handle_action(AppAction::Submit);
        assert_eq!(app.session.collection(), Some("Author"));
        assert!(app.session.is_loading());

        pump(&mut app).await;
        assert_eq!(app.session.rows()[0].uuid, "Author:");
        assert_eq!(app.session.page().total, 42);
    }

    #[tokio::test]
    async fn test_latest_query_wins_over_slow_response() {
        let mut app = loaded_app().await;
        app.open_selected();
        pump(&mut app).await;

        app.session.set_query("slow");
        app.fetch_page();
        app.session.set_query("fast");
        app.fetch_page();

        pump(&mut app).await;
        pump(&mut app).await;
        assert_eq!(app.session.rows()[0].uuid, "Article:fast");
    }

    #[tokio::test]
    async fn test_keys_depend_on_focus() {
        let mut app = loaded_app().await;
        app.open_selected();
        pump(&mut app).await;

        app.handle_action(key('m'));
        assert_eq!(app.session.mode(), SearchMode::Keyword);

        app.handle_action(AppAction::NextFocus);
        assert_eq!(app.focus, Focus::Query);
        app.handle_action(key('m'));
        assert_eq!(app.session.mode(), SearchMode::Keyword);
        assert_eq!(app.query_input.lines()[0], "m");

        app.handle_action(AppAction::Submit);
        assert_eq!(app.session.query(), "m");
        assert_eq!(app.focus, Focus::Table);
    }

    #[tokio::test]
    async fn test_detail_popup_opens_and_closes() {
        let mut app = loaded_app().await;
        app.open_selected();
        pump(&mut app).await;

        app.focus = Focus::Table;
        app.handle_action(AppAction::Submit);
        assert_eq!(app.view, View::Detail);
        let detail = app.detail.clone().unwrap();
        assert_eq!(detail.title, "Article:");
        assert_eq!(detail.fields[0], ("ID".to_string(), "Article:".to_string()));
        assert_eq!(detail.fields[1], ("title".to_string(), "-".to_string()));
        assert!(detail.fields[2].1.contains("Level: Excellent"));

        app.handle_action(AppAction::Escape);
        assert_eq!(app.view, View::Browse);
        assert!(app.detail.is_none());
    }

    #[tokio::test]
    async fn test_schema_view_filter_and_open() {
        let mut app = loaded_app().await;
        app.handle_action(AppAction::ToggleSchema);
        assert_eq!(app.view, View::Schema);

        for c in "auth".chars() {
            app.handle_action(key(c));
        }
        let rows = app.schema_page_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Author");

        app.handle_action(AppAction::Submit);
        assert_eq!(app.view, View::Browse);
        assert_eq!(app.session.collection(), Some("Author"));
    }

    #[tokio::test]
    async fn test_schema_view_properties_popup() {
        let mut app = loaded_app().await;
        app.handle_action(AppAction::ToggleSchema);
        app.handle_action(AppAction::ShowProperties);

        assert_eq!(app.view, View::Detail);
        let detail = app.detail.clone().unwrap();
        assert_eq!(detail.title, "Properties for: Article");
        assert_eq!(
            detail.fields[0],
            ("Description".to_string(), "News articles".to_string())
        );
        assert_eq!(detail.fields[1].0, "title");
        let lines: Vec<&str> = detail.fields[1].1.lines().collect();
        assert_eq!(
            lines,
            ["Data type: text", "Tokenization: word", "Description: Headline"]
        );

        // Closing returns to the overview, not the browser
        app.handle_action(AppAction::Escape);
        assert_eq!(app.view, View::Schema);

        app.handle_action(AppAction::MoveDown);
        app.handle_action(AppAction::ShowProperties);
        let detail = app.detail.clone().unwrap();
        assert_eq!(detail.title, "Properties for: Author");
        assert_eq!(detail.fields[0].1, "No description available");
        assert!(detail.fields[1].1.contains("Tokenization: -"));
    }

    #[test]
    fn test_focus_cycle() {
        assert_eq!(Focus::Sidebar.next(), Focus::Query);
        assert_eq!(Focus::Table.next(), Focus::Sidebar);
        assert_eq!(Focus::Sidebar.prev(), Focus::Table);
    }
}
