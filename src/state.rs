//! Global application state and the dispatch loop.
//!
//! State is only mutated inside [`crate::update::update`], driven by
//! [`dispatch_global_message`]. Commands returned by `update` run after the
//! mutable borrow is released, so async work never holds a `RefCell` borrow.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::models::{
    Agent, CurrentUser, HealthStatus, LogRecord, MonitoringOverview, SystemStats, Workflow,
};
use crate::network::{ApiConfig, ApiHandles};
use crate::router::Route;
use crate::theme::ThemeState;
use crate::update::update;

/// Records held in a [`ResourceStore`] expose their backend identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Agent {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Workflow {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for LogRecord {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Last-known collection for one resource type, plus loading/error flags.
///
/// Mutators are synchronous and non-validating; callers hit the REST client
/// first and only store the server's response or locally-known deltas. The
/// `epoch` implements latest-request-wins: a fetch captures the epoch from
/// [`begin_load`](Self::begin_load) and a completion carrying a stale epoch is
/// dropped silently.
#[derive(Debug)]
pub struct ResourceStore<T> {
    items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    epoch: u64,
}

impl<T> Default for ResourceStore<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            epoch: 0,
        }
    }
}

impl<T: Identified> ResourceStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Replace the whole collection (the usual path after a list fetch).
    pub fn set_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Append a record. A record with the same id already present is
    /// replaced instead of duplicated, keeping identifiers unique.
    pub fn add(&mut self, item: T) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id() == item.id()) {
            log::warn!("add: replacing existing record {}", item.id());
            *existing = item;
        } else {
            self.items.push(item);
        }
    }

    /// Merge into the record with the given id; no-op when absent. The
    /// mutator must not touch the identifier (the typed `*Update::apply`
    /// helpers never do).
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut T)) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id() == id) {
            f(item);
        }
    }

    /// Remove by id. Idempotent: removing an absent id changes nothing.
    pub fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
    }

    /// Mark a fetch as started and return the sequencing token for it.
    pub fn begin_load(&mut self) -> u64 {
        self.epoch += 1;
        self.loading = true;
        self.epoch
    }

    /// Complete a fetch started at `epoch`. Stale completions (a newer fetch
    /// has begun since) are ignored. On failure the previous items stay in
    /// place and only the error flag is set.
    pub fn finish_load(&mut self, epoch: u64, result: Result<Vec<T>, String>) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
        true
    }
}

/// Process-wide authentication state.
#[derive(Debug, Default)]
pub struct SessionState {
    pub user: Option<CurrentUser>,
    pub authenticated: bool,
    /// True while a login/register call is in flight; a second submit during
    /// this window is ignored.
    pub loading: bool,
    /// Inline errors for the login/register form currently shown.
    pub field_errors: HashMap<String, String>,
    /// Form-level error banner, if any.
    pub banner: Option<String>,
}

/// Display-only monitoring snapshot with its own latest-request-wins token.
#[derive(Debug, Default)]
pub struct MonitoringState {
    pub overview: Option<MonitoringOverview>,
    pub stats: Option<SystemStats>,
    pub health: Option<HealthStatus>,
    pub loading: bool,
    pub error: Option<String>,
    epoch: u64,
}

impl MonitoringState {
    pub fn begin_load(&mut self) -> u64 {
        self.epoch += 1;
        self.loading = true;
        self.epoch
    }

    pub fn finish_load(
        &mut self,
        epoch: u64,
        result: Result<(MonitoringOverview, SystemStats, HealthStatus), String>,
    ) -> bool {
        if epoch != self.epoch {
            return false;
        }
        self.loading = false;
        match result {
            Ok((overview, stats, health)) => {
                self.overview = Some(overview);
                self.stats = Some(stats);
                self.health = Some(health);
                self.error = None;
            }
            Err(message) => self.error = Some(message),
        }
        true
    }
}

/// Per-agent log panel on the agents page. At most one panel is open at a
/// time; `owner` is the agent whose entries the store holds.
#[derive(Debug, Default)]
pub struct AgentLogsState {
    pub owner: Option<String>,
    pub store: ResourceStore<LogRecord>,
}

impl AgentLogsState {
    pub fn close(&mut self) {
        self.owner = None;
        self.store.set_all(Vec::new());
    }
}

pub struct AppState {
    pub route: Route,
    pub api: ApiHandles,
    pub session: SessionState,
    pub theme: ThemeState,
    pub agents: ResourceStore<Agent>,
    pub agent_logs: AgentLogsState,
    pub workflows: ResourceStore<Workflow>,
    pub logs: ResourceStore<LogRecord>,
    pub monitoring: MonitoringState,
}

impl AppState {
    pub fn new(api: ApiHandles) -> Self {
        Self {
            route: Route::Home,
            api,
            session: SessionState::default(),
            theme: ThemeState::init(),
            agents: ResourceStore::new(),
            agent_logs: AgentLogsState::default(),
            workflows: ResourceStore::new(),
            logs: ResourceStore::new(),
            monitoring: MonitoringState::default(),
        }
    }
}

thread_local! {
    pub static APP_STATE: RefCell<AppState> =
        RefCell::new(AppState::new(ApiHandles::new(ApiConfig::from_env())));
}

/// Run a message through `update`, then execute the produced commands and
/// re-render — both outside the state borrow.
pub fn dispatch_global_message(msg: crate::messages::Message) {
    let commands = APP_STATE.with(|cell| {
        let mut state = cell.borrow_mut();
        update(&mut state, msg)
    });

    for command in commands {
        crate::command_executors::execute(command);
    }

    if let Err(e) = crate::views::refresh_current_view() {
        log::warn!("failed to refresh view after dispatch: {:?}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgentConfig, AgentStatus, AgentUpdate};

    fn agent(id: &str, name: &str) -> Agent {
        Agent {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            agent_type: "general".into(),
            model: "gpt-4o".into(),
            config: AgentConfig::default(),
            status: AgentStatus::Inactive,
            total_executions: 0,
            successful_executions: 0,
            failed_executions: 0,
            created_at: None,
            updated_at: None,
            last_active_at: None,
        }
    }

    #[test]
    fn add_then_get_round_trips() {
        let mut store = ResourceStore::new();
        let a = agent("a-1", "alpha");
        store.add(a.clone());
        assert_eq!(store.get("a-1"), Some(&a));
    }

    #[test]
    fn add_with_duplicate_id_replaces_instead_of_duplicating() {
        let mut store = ResourceStore::new();
        store.add(agent("a-1", "alpha"));
        store.add(agent("a-1", "beta"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a-1").unwrap().name, "beta");
    }

    #[test]
    fn update_merges_partial_and_preserves_id() {
        let mut store = ResourceStore::new();
        store.add(agent("a-1", "alpha"));

        let partial = AgentUpdate {
            name: Some("renamed".into()),
            ..Default::default()
        };
        store.update("a-1", |a| partial.apply(a));

        let stored = store.get("a-1").unwrap();
        assert_eq!(stored.id, "a-1");
        assert_eq!(stored.name, "renamed");
        assert_eq!(stored.model, "gpt-4o"); // untouched

        // Missing id: silent no-op.
        store.update("missing", |a| a.name = "ghost".into());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = ResourceStore::new();
        store.add(agent("a-1", "alpha"));
        store.add(agent("a-2", "beta"));

        store.remove("a-1");
        assert_eq!(store.len(), 1);
        store.remove("a-1");
        assert_eq!(store.len(), 1);
        assert!(store.get("a-2").is_some());
    }

    #[test]
    fn failed_load_sets_error_and_keeps_items() {
        let mut store = ResourceStore::new();
        store.add(agent("a-1", "alpha"));

        let epoch = store.begin_load();
        assert!(store.loading);

        let applied = store.finish_load(epoch, Err("Could not reach the API".into()));
        assert!(applied);
        assert!(!store.loading);
        assert_eq!(store.error.as_deref(), Some("Could not reach the API"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut store = ResourceStore::new();

        let first = store.begin_load();
        let second = store.begin_load();

        // The slow first response arrives after a newer fetch began.
        let applied = store.finish_load(first, Ok(vec![agent("old", "old")]));
        assert!(!applied);
        assert!(store.is_empty());
        assert!(store.loading);

        let applied = store.finish_load(second, Ok(vec![agent("new", "new")]));
        assert!(applied);
        assert!(!store.loading);
        assert_eq!(store.get("new").map(|a| a.name.as_str()), Some("new"));
    }

    #[test]
    fn successful_load_clears_previous_error() {
        let mut store = ResourceStore::<Agent>::new();
        let epoch = store.begin_load();
        store.finish_load(epoch, Err("boom".into()));

        let epoch = store.begin_load();
        store.finish_load(epoch, Ok(vec![agent("a-1", "alpha")]));
        assert_eq!(store.error, None);
        assert_eq!(store.len(), 1);
    }
}
