//! Inspection of an existing table: column metadata and a row preview

use serde::Deserialize;
use serde_json::Value;

use crate::libs::client::SqlBackend;
use crate::libs::error::{AdminError, Result};

/// Rows shown by default when previewing a table.
pub const DEFAULT_ROW_LIMIT: u32 = 100;

/// One column of an existing table, as reported by
/// `information_schema.columns`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnInfo {
    pub column_name: String,
    pub data_type: String,
    pub is_nullable: String,
    pub column_default: Option<String>,
    pub ordinal_position: i32,
}

impl ColumnInfo {
    /// The catalog reports nullability as the strings `YES` / `NO`.
    pub fn nullable(&self) -> bool {
        self.is_nullable.eq_ignore_ascii_case("yes")
    }
}

/// Fetch column metadata for a table through the remote-procedure endpoint.
///
/// The table name is interpolated into the catalog query unescaped, under
/// the same trusted-operator contract as the statement builder.
pub async fn fetch_columns(backend: &dyn SqlBackend, table: &str) -> Result<Vec<ColumnInfo>> {
    let sql = format!(
        "SELECT column_name, data_type, is_nullable, column_default, ordinal_position \
         FROM information_schema.columns \
         WHERE table_name = '{}' AND table_schema = 'public' \
         ORDER BY ordinal_position;",
        table
    );
    let result = backend.execute_sql(&sql).await?;
    if result.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(result).map_err(|e| AdminError::InvalidResponse(e.to_string()))
}

/// First rows of a table for display, newest request wins at the caller.
pub async fn fetch_preview(
    backend: &dyn SqlBackend,
    table: &str,
    limit: u32,
) -> Result<Vec<Value>> {
    backend.fetch_rows(table, limit).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::libs::client::mock::MockBackend;

    #[test]
    fn nullable_parses_catalog_strings() {
        let col = ColumnInfo {
            column_name: "id".into(),
            data_type: "uuid".into(),
            is_nullable: "NO".into(),
            column_default: Some("gen_random_uuid()".into()),
            ordinal_position: 1,
        };
        assert!(!col.nullable());

        let col = ColumnInfo {
            is_nullable: "YES".into(),
            ..col
        };
        assert!(col.nullable());
    }

    #[tokio::test]
    async fn columns_decoded_from_result_set() {
        let mut backend = MockBackend::new(&[]);
        backend.execute_result = json!([
            {
                "column_name": "id",
                "data_type": "uuid",
                "is_nullable": "NO",
                "column_default": "gen_random_uuid()",
                "ordinal_position": 1
            },
            {
                "column_name": "label",
                "data_type": "text",
                "is_nullable": "YES",
                "column_default": null,
                "ordinal_position": 2
            }
        ]);

        let columns = fetch_columns(&backend, "widgets").await.unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].column_name, "id");
        assert!(columns[1].nullable());

        let issued = backend.statements();
        assert_eq!(issued.len(), 1);
        assert!(issued[0].contains("information_schema.columns"));
        assert!(issued[0].contains("table_name = 'widgets'"));
    }

    #[tokio::test]
    async fn null_result_is_empty_column_list() {
        let backend = MockBackend::new(&[]);
        let columns = fetch_columns(&backend, "widgets").await.unwrap();
        assert!(columns.is_empty());
    }

    #[tokio::test]
    async fn preview_respects_limit() {
        let mut backend = MockBackend::new(&[]);
        backend.rows = vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})];
        let rows = fetch_preview(&backend, "widgets", 2).await.unwrap();
        assert_eq!(rows.len(), 2);
    }
}
