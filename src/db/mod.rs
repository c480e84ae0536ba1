//! Database access for sabersql.
//!
//! All SQL is executed by an external `mysql` client process. The narrow
//! [`StatementExecutor`] trait is the seam between the statement-producing
//! logic (schema creation, batched inserts) and the process that runs them,
//! so that logic can be exercised against a stub.

mod load;
mod params;
mod runner;
mod schema;

pub use load::{
    create_database_statement, create_schema, import_data, insert_statement, ImportSummary,
};
pub use params::ConnectionParams;
pub use runner::{CommandRunner, DEFAULT_CLIENT};
pub use schema::load_schema_files;

use crate::error::Result;

/// Number of rows sent per INSERT statement unless configured otherwise.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Whether a statement runs inside the configured database or against the
/// server as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// The session is scoped to the configured database.
    Database,
    /// No database is selected. Used to create the database itself.
    Server,
}

impl Scope {
    /// Returns true if the session should select the configured database.
    pub fn uses_database(&self) -> bool {
        matches!(self, Self::Database)
    }
}

/// Executes a single SQL command (or statement batch) and returns the
/// client's standard output.
pub trait StatementExecutor {
    /// Runs `command` with the given scope.
    fn execute(&self, command: &str, scope: Scope) -> Result<String>;
}

impl<T: StatementExecutor + ?Sized> StatementExecutor for &T {
    fn execute(&self, command: &str, scope: Scope) -> Result<String> {
        (**self).execute(command, scope)
    }
}
