pub mod config;
pub mod constants;
pub mod error;
pub mod schema;
pub mod template;

pub use error::{MigrationError, Result};
pub use schema::{MigrationSession, translate_table};
pub use template::MigrationTemplate;
