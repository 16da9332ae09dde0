use crate::libs::schema::{ColumnSpec, TableSpec};

/// Stateless DDL renderer.
///
/// All methods are associated functions translating a spec into a single SQL
/// string, deterministically: identical input yields byte-identical output.
/// Identifiers and default expressions come from an operator who already
/// holds the privileged key, so they are embedded exactly as given, with no
/// escaping and no validation. Callers run their precondition checks first;
/// an empty column list renders a syntactically incomplete statement.
pub struct StatementBuilder;

impl StatementBuilder {
    /// Wrap an identifier in double quotes. Embedded quote characters are
    /// not escaped.
    fn quote_ident(name: &str) -> String {
        format!("\"{}\"", name)
    }

    fn column_definition(col: &ColumnSpec) -> String {
        let mut def = format!("{} {}", Self::quote_ident(&col.name), col.data_type);
        if col.primary {
            // PRIMARY KEY already implies NOT NULL
            def.push_str(" PRIMARY KEY");
        } else if !col.nullable {
            def.push_str(" NOT NULL");
        }
        if let Some(default) = col.default_expression.as_deref() {
            if !default.is_empty() {
                def.push_str(" DEFAULT ");
                def.push_str(default);
            }
        }
        def
    }

    /// Render a CREATE TABLE statement, one fragment per column in list
    /// order, joined with `", "`.
    pub fn create_table(spec: &TableSpec) -> String {
        let cols: Vec<String> = spec.columns.iter().map(Self::column_definition).collect();
        format!(
            "CREATE TABLE {} ({});",
            Self::quote_ident(&spec.name),
            cols.join(", ")
        )
    }

    /// Render a DROP TABLE guarded with IF EXISTS, so dropping an absent
    /// table is not an error.
    pub fn drop_table(table_name: &str) -> String {
        format!("DROP TABLE IF EXISTS {};", Self::quote_ident(table_name))
    }
}
