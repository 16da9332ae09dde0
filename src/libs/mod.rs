pub mod client;
pub mod config;
pub mod console;
pub mod create;
pub mod error;
pub mod listing;
pub mod schema;
pub mod statement;
pub mod viewer;

// Re-export them for easier access from the crate root
pub use client::*;
pub use config::*;
pub use console::*;
pub use create::*;
pub use error::*;
pub use listing::*;
pub use schema::*;
pub use statement::*;
pub use viewer::*;
