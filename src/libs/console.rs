//! Presentation shell: tab state, the table list, and the flows it composes

use serde_json::Value;
use tracing::{debug, warn};

use crate::libs::client::SqlBackend;
use crate::libs::create::CreateTableFlow;
use crate::libs::error::{AdminError, Result};
use crate::libs::listing::filter_user_tables;
use crate::libs::statement::StatementBuilder;

/// Top-level navigation tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Tables,
    Create,
    Sql,
}

/// Stamps outgoing refreshes and refuses stale responses.
///
/// A response is applied only if nothing dispatched after it has been
/// applied already; an earlier request resolving late is discarded instead
/// of overwriting newer state.
#[derive(Debug, Default)]
struct RequestSeq {
    next: u64,
    applied: u64,
}

impl RequestSeq {
    fn begin(&mut self) -> u64 {
        self.next += 1;
        self.next
    }

    fn try_apply(&mut self, seq: u64) -> bool {
        if seq > self.applied {
            self.applied = seq;
            true
        } else {
            false
        }
    }
}

/// One operator session against one backend project.
///
/// Owns the connection for its lifetime and every piece of per-session UI
/// state; nothing here is persisted.
pub struct AdminConsole {
    backend: Box<dyn SqlBackend>,
    pub active_tab: Tab,
    pub tables: Vec<String>,
    pub selected_table: Option<String>,
    /// Engaged while a table-list refresh is in flight.
    pub loading: bool,
    pub create: CreateTableFlow,
    listing_seq: RequestSeq,
}

impl AdminConsole {
    pub fn new(backend: Box<dyn SqlBackend>) -> Self {
        Self {
            backend,
            active_tab: Tab::default(),
            tables: Vec::new(),
            selected_table: None,
            loading: false,
            create: CreateTableFlow::new(),
            listing_seq: RequestSeq::default(),
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    /// Track a table chosen from the sidebar.
    pub fn select_table(&mut self, name: impl Into<String>) {
        self.selected_table = Some(name.into());
    }

    pub fn clear_selection(&mut self) {
        self.selected_table = None;
    }

    /// Borrow the backend for read-only collaborators (viewer widgets).
    pub fn backend(&self) -> &dyn SqlBackend {
        &*self.backend
    }

    /// Refresh the sidebar table list from the schema description document.
    ///
    /// Each refresh is stamped with a sequence number; a response older than
    /// the last applied one is discarded rather than written over newer
    /// state.
    pub async fn refresh_tables(&mut self) -> Result<()> {
        let seq = self.listing_seq.begin();
        self.loading = true;
        let outcome = self.backend.list_definitions().await;
        self.loading = false;

        let definitions = outcome?;
        if self.listing_seq.try_apply(seq) {
            self.tables = filter_user_tables(definitions);
        } else {
            warn!(seq, "discarding stale table list response");
        }
        Ok(())
    }

    /// Drive the create flow; on success refresh the list and return to the
    /// Tables tab, the same hand-off the create form's completion callback
    /// performs.
    pub async fn create_table(&mut self) -> Result<()> {
        self.create.submit(&*self.backend).await?;
        let refreshed = self.refresh_tables().await;
        self.set_tab(Tab::Tables);
        refreshed
    }

    /// Render the guarded DROP form for `name` and dispatch it, then drop
    /// the table from session state as well.
    pub async fn delete_table(&mut self, name: &str) -> Result<()> {
        let sql = StatementBuilder::drop_table(name);
        debug!(table = %name, "dropping table");
        self.backend.execute_sql(&sql).await?;
        if self.selected_table.as_deref() == Some(name) {
            self.clear_selection();
        }
        self.refresh_tables().await
    }

    /// Free-text SQL editor path: run one statement and hand back whatever
    /// the backend returned.
    pub async fn run_sql(&mut self, sql: &str) -> Result<Value> {
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(AdminError::Input("SQL statement is required".into()));
        }
        self.backend.execute_sql(sql).await
    }
}
