//! Runs SQL through the `mysql` command-line client.
//!
//! Every call writes its SQL to a fresh temporary file and starts one client
//! process with that file as stdin. No session survives between calls.

use super::load::{self, ImportSummary};
use super::{ConnectionParams, Scope, StatementExecutor};
use crate::error::{Result, SaberError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Client executable used unless another is configured.
pub const DEFAULT_CLIENT: &str = "mysql";

/// Environment variable the client reads its password from. Keeps the
/// password out of the argument list and therefore out of process listings.
const PASSWORD_ENV: &str = "MYSQL_PWD";

/// Executes statements against one database by invoking the client binary.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    params: ConnectionParams,
    client: PathBuf,
    schema: Vec<String>,
}

impl CommandRunner {
    /// Creates a runner for the given connection. Performs no I/O.
    pub fn new(params: ConnectionParams) -> Self {
        Self {
            params,
            client: PathBuf::from(DEFAULT_CLIENT),
            schema: Vec::new(),
        }
    }

    /// Uses `client` instead of `mysql` found on `PATH`.
    pub fn with_client(mut self, client: impl Into<PathBuf>) -> Self {
        self.client = client.into();
        self
    }

    /// Sets the ordered schema statements applied by [`create_schema`](Self::create_schema).
    pub fn with_schema(mut self, statements: Vec<String>) -> Self {
        self.schema = statements;
        self
    }

    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    pub fn client(&self) -> &Path {
        &self.client
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    /// Arguments passed to the client for a statement with the given scope.
    ///
    /// `-B` asks for tab-separated output without table borders. The database
    /// name is only passed for [`Scope::Database`].
    pub fn client_args(&self, scope: Scope) -> Vec<String> {
        let mut args = vec![
            format!("-u{}", self.params.user()),
            format!("-h{}", self.params.address()),
        ];
        if let Some(port) = self.params.port() {
            args.push(format!("-P{port}"));
        }
        args.push("-B".to_string());
        if scope.uses_database() {
            args.push(self.params.database().to_string());
        }
        args
    }

    /// Runs `command` and returns the client's standard output.
    ///
    /// Any output on standard error is treated as failure, whatever the exit
    /// status. A client that prints warnings on success is therefore reported
    /// as failing.
    pub fn execute(&self, command: &str, scope: Scope) -> Result<String> {
        let mut statement_file = NamedTempFile::new()?;
        statement_file.write_all(command.as_bytes())?;
        statement_file.flush()?;
        statement_file.as_file().sync_all()?;
        let stdin = statement_file.reopen()?;

        debug!(
            "Running {}-byte statement ({:?} scope) via {}",
            command.len(),
            scope,
            self.client.display()
        );

        let output = Command::new(&self.client)
            .args(self.client_args(scope))
            .env(PASSWORD_ENV, self.params.password())
            .stdin(Stdio::from(stdin))
            .output()
            .map_err(|e| {
                self.connection_failure(format!(
                    "could not run '{}': {e}",
                    self.client.display()
                ))
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            return Err(self.connection_failure(stderr.trim_end()));
        }

        if !output.status.success() {
            warn!(
                "{} exited with {} without writing to stderr",
                self.client.display(),
                output.status
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Creates the database if needed, then applies the configured schema
    /// statements in order. Stops at the first failure without rolling back.
    pub fn create_schema(&self) -> Result<()> {
        load::create_schema(self, self.params.database(), &self.schema)
    }

    /// Inserts `rows` into `table` in batches of `batch_size`.
    ///
    /// Values must already be SQL literals; they are spliced into the
    /// statement without escaping. See [`load::import_data`] for the batching
    /// and failure semantics.
    pub fn import_data<H, I, R, V>(
        &self,
        table: &str,
        headers: &[H],
        rows: I,
        batch_size: usize,
    ) -> Result<ImportSummary>
    where
        H: AsRef<str>,
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<String>,
    {
        load::import_data(self, table, headers, rows, batch_size)
    }

    fn connection_failure(&self, message: impl Into<String>) -> SaberError {
        SaberError::ConnectionFailure {
            database: self.params.database().to_string(),
            user: self.params.user().to_string(),
            address: self.params.address().to_string(),
            port: self.params.port(),
            message: message.into(),
        }
    }
}

impl StatementExecutor for CommandRunner {
    fn execute(&self, command: &str, scope: Scope) -> Result<String> {
        CommandRunner::execute(self, command, scope)
    }
}
