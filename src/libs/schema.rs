use serde::{Deserialize, Serialize};

/// Scalar type names offered by the column builder's selection widget.
///
/// Never enforced at render time: the statement builder emits whatever type
/// string a spec carries, verbatim.
pub const DATA_TYPES: [&str; 14] = [
    "text",
    "varchar",
    "integer",
    "bigint",
    "decimal",
    "real",
    "boolean",
    "date",
    "time",
    "timestamp",
    "timestamptz",
    "uuid",
    "json",
    "jsonb",
];

/// One column of an in-progress table definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub default_expression: Option<String>,
}

impl ColumnSpec {
    /// The identity column every create session starts with.
    pub fn seeded_identity() -> Self {
        Self {
            name: "id".into(),
            data_type: "uuid".into(),
            nullable: false,
            primary: true,
            default_expression: Some("gen_random_uuid()".into()),
        }
    }

    /// A freshly added, still-unnamed column.
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            data_type: "text".into(),
            nullable: true,
            primary: false,
            default_expression: None,
        }
    }
}

/// A table definition about to be rendered. Column order is significant and
/// carries through to the rendered statement unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSpec>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Pre-dispatch checks. The statement builder itself performs none of
    /// these; a spec that fails here must not be rendered.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(ValidationError::new("table_name", "table name is required"));
        }

        if self.columns.is_empty() {
            errors.push(ValidationError::new(
                "columns",
                "at least one column is required",
            ));
        }

        for (i, col) in self.columns.iter().enumerate() {
            if col.name.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("columns[{}].name", i),
                    format!("column {} name is required", i + 1),
                ));
            }
            if col.data_type.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("columns[{}].data_type", i),
                    format!("column {} type is required", i + 1),
                ));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for col in &self.columns {
            if !col.name.is_empty() && !seen.insert(col.name.to_lowercase()) {
                errors.push(ValidationError::new(
                    "columns",
                    format!("duplicate column name: {}", col.name),
                ));
            }
        }

        // Most backends reject more than one PRIMARY KEY marker at execution
        // time; refusing here keeps the failure on this side of the wire.
        let primaries = self.columns.iter().filter(|c| c.primary).count();
        if primaries > 1 {
            errors.push(ValidationError::new(
                "columns",
                "only one column may be marked primary",
            ));
        }

        errors
    }
}

/// A single failed pre-dispatch check, tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
