//! Command dispatch for sabersql.
//!
//! Resolves the connection and client settings from the CLI, the config file
//! and the environment, builds a [`CommandRunner`] and runs the requested
//! command against it.

use std::path::Path;

use crate::cli::{Cli, Command};
use crate::config::{Config, ConnectionConfig};
use crate::db::{load_schema_files, CommandRunner, Scope};
use crate::error::{Result, SaberError};
use crate::import::{sql_literal, CsvSource};
use tracing::info;

/// Runs the parsed command line and returns the text to print on stdout.
pub fn run(cli: &Cli) -> Result<String> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = resolve_connection(cli, &config)?;
    info!("Connection: {}", connection.display_string());

    let client = cli.client.clone().unwrap_or_else(|| config.client.binary.clone());
    let runner = CommandRunner::new(connection.to_params()?).with_client(client);

    match &cli.command {
        Command::CreateSchema { schema } => {
            let files = if schema.is_empty() {
                &config.schema.files
            } else {
                schema
            };
            let runner = runner.with_schema(load_schema_files(files)?);
            runner.create_schema()?;
            Ok(format!(
                "Created database '{}' and applied {} schema files\n",
                runner.params().database(),
                runner.schema().len()
            ))
        }
        Command::Import {
            table,
            batch_size,
            file,
        } => {
            let batch_size = match batch_size {
                Some(size) => usize::try_from(*size)
                    .map_err(|_| SaberError::import(format!("batch size {size} is too large")))?,
                None => config.client.batch_size,
            };
            import_csv(&runner, table, file, batch_size)
        }
        Command::Exec { no_database, sql } => {
            let scope = if *no_database {
                Scope::Server
            } else {
                Scope::Database
            };
            runner.execute(sql, scope)
        }
    }
}

/// Resolves the final connection configuration from CLI args, config file, and environment.
///
/// Precedence, highest first: CLI arguments, the named connection, the
/// `default` connection, environment variables.
pub fn resolve_connection(cli: &Cli, config: &Config) -> Result<ConnectionConfig> {
    let mut connection = match cli.connection_name() {
        Some(name) => config.get_connection(Some(name)).cloned().ok_or_else(|| {
            SaberError::config(format!("Connection '{name}' not found in config file"))
        })?,
        None => config.get_connection(None).cloned().unwrap_or_default(),
    };

    if let Some(overrides) = cli.to_connection_config()? {
        connection.merge(&overrides);
    }

    connection.apply_env_defaults();
    Ok(connection)
}

/// Streams `file` into `table`. Each field is turned into a SQL literal
/// before it reaches the runner.
///
/// Reading stops at the first malformed line. Rows read before it are still
/// sent, so a partial import can remain in the table.
fn import_csv(runner: &CommandRunner, table: &str, file: &Path, batch_size: usize) -> Result<String> {
    let mut source = CsvSource::open(file)?;
    let headers = source.headers().to_vec();

    let mut read_error = None;
    let rows = source.by_ref().map_while(|row| match row {
        Ok(fields) => Some(fields.into_iter().map(|field| sql_literal(&field))),
        Err(e) => {
            read_error = Some(e);
            None
        }
    });

    let summary = runner.import_data(table, &headers, rows, batch_size)?;
    if let Some(e) = read_error {
        return Err(e);
    }

    Ok(format!(
        "Imported {} rows into '{}' in {} batches\n",
        summary.rows, table, summary.batches
    ))
}
