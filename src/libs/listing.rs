//! Table listing service

use crate::libs::client::SqlBackend;
use crate::libs::error::Result;

/// Backend-internal schemas that leak into the description document
/// alongside user tables; the console never shows these.
const HIDDEN_PREFIXES: [&str; 2] = ["auth.", "storage."];

/// Drop definition keys that belong to backend-internal schemas, keeping
/// the backend's reported order otherwise.
pub fn filter_user_tables(definitions: Vec<String>) -> Vec<String> {
    definitions
        .into_iter()
        .filter(|name| !HIDDEN_PREFIXES.iter().any(|p| name.starts_with(p)))
        .collect()
}

/// One read of the schema description document, filtered to user tables.
pub async fn fetch_user_tables(backend: &dyn SqlBackend) -> Result<Vec<String>> {
    let definitions = backend.list_definitions().await?;
    Ok(filter_user_tables(definitions))
}
