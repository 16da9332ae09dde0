//! Table create flow: column-builder session state and dispatch

use tracing::debug;

use crate::libs::client::SqlBackend;
use crate::libs::error::{AdminError, Result};
use crate::libs::schema::{ColumnSpec, TableSpec};
use crate::libs::statement::StatementBuilder;

/// In-progress state of one create-table session.
///
/// Starts seeded with a single identity column and is edited in place until
/// the operator submits or resets it. Nothing here outlives the session.
#[derive(Debug, Clone)]
pub struct CreateTableFlow {
    pub table_name: String,
    pub columns: Vec<ColumnSpec>,
    /// Engaged while a create request is in flight.
    pub creating: bool,
    /// Inline error from the last failed submission.
    pub error: Option<String>,
}

impl Default for CreateTableFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CreateTableFlow {
    pub fn new() -> Self {
        Self {
            table_name: String::new(),
            columns: vec![ColumnSpec::seeded_identity()],
            creating: false,
            error: None,
        }
    }

    /// Append a blank column to the end of the list.
    pub fn add_column(&mut self) {
        self.columns.push(ColumnSpec::blank());
    }

    /// Remove the column at `index`. The last remaining column cannot be
    /// removed, matching the builder UI.
    pub fn remove_column(&mut self, index: usize) {
        if self.columns.len() > 1 && index < self.columns.len() {
            self.columns.remove(index);
        }
    }

    /// Mutable access to one column for in-place edits.
    pub fn column_mut(&mut self, index: usize) -> Option<&mut ColumnSpec> {
        self.columns.get_mut(index)
    }

    /// Discard all edits and reseed.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Assemble the transient spec handed to the statement builder.
    fn spec(&self) -> TableSpec {
        TableSpec::new(self.table_name.trim(), self.columns.clone())
    }

    /// Validate, render, and dispatch the CREATE statement.
    ///
    /// On success the flow resets to its seeded state so the next session
    /// starts clean. On failure the edits are kept and the error recorded
    /// for inline display.
    pub async fn submit(&mut self, backend: &dyn SqlBackend) -> Result<()> {
        let spec = self.spec();
        if let Some(problem) = spec.validate().into_iter().next() {
            let err = AdminError::Input(problem.to_string());
            self.error = Some(err.to_string());
            return Err(err);
        }

        self.creating = true;
        self.error = None;
        let sql = StatementBuilder::create_table(&spec);
        debug!(table = %spec.name, columns = spec.columns.len(), "creating table");
        let outcome = backend.execute_sql(&sql).await;
        self.creating = false;

        match outcome {
            Ok(_) => {
                self.reset();
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::client::mock::MockBackend;

    #[test]
    fn new_flow_is_seeded() {
        let flow = CreateTableFlow::new();
        assert!(flow.table_name.is_empty());
        assert_eq!(flow.columns, vec![ColumnSpec::seeded_identity()]);
        assert!(!flow.creating);
        assert!(flow.error.is_none());
    }

    #[test]
    fn last_column_cannot_be_removed() {
        let mut flow = CreateTableFlow::new();
        flow.remove_column(0);
        assert_eq!(flow.columns.len(), 1);

        flow.add_column();
        flow.remove_column(1);
        assert_eq!(flow.columns.len(), 1);
    }

    #[tokio::test]
    async fn submit_renders_and_dispatches() {
        let backend = MockBackend::new(&[]);
        let mut flow = CreateTableFlow::new();
        flow.table_name = "widgets".into();
        flow.add_column();
        if let Some(col) = flow.column_mut(1) {
            col.name = "label".into();
        }

        flow.submit(&backend).await.unwrap();

        assert_eq!(
            backend.statements(),
            vec![
                "CREATE TABLE \"widgets\" (\"id\" uuid PRIMARY KEY DEFAULT gen_random_uuid(), \
                 \"label\" text);"
            ]
        );
        // success resets the session
        assert!(flow.table_name.is_empty());
        assert_eq!(flow.columns, vec![ColumnSpec::seeded_identity()]);
        assert!(flow.error.is_none());
    }

    #[tokio::test]
    async fn empty_table_name_is_not_dispatched() {
        let backend = MockBackend::new(&[]);
        let mut flow = CreateTableFlow::new();

        let err = flow.submit(&backend).await.unwrap_err();
        assert!(matches!(err, AdminError::Input(_)));
        assert!(backend.statements().is_empty());
        assert!(flow.error.is_some());
    }

    #[tokio::test]
    async fn second_primary_column_is_not_dispatched() {
        let backend = MockBackend::new(&[]);
        let mut flow = CreateTableFlow::new();
        flow.table_name = "widgets".into();
        flow.add_column();
        if let Some(col) = flow.column_mut(1) {
            col.name = "code".into();
            col.primary = true;
        }

        assert!(flow.submit(&backend).await.is_err());
        assert!(backend.statements().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_keeps_edits_and_records_error() {
        let backend = MockBackend::failing_execute(
            &[],
            AdminError::Backend("relation \"widgets\" already exists".into()),
        );
        let mut flow = CreateTableFlow::new();
        flow.table_name = "widgets".into();

        assert!(flow.submit(&backend).await.is_err());
        assert_eq!(flow.table_name, "widgets");
        assert_eq!(
            flow.error.as_deref(),
            Some("relation \"widgets\" already exists")
        );
        assert!(!flow.creating);
    }
}
