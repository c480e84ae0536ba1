//! Schema creation and batched row import.
//!
//! Both operations are written against [`StatementExecutor`] and issue one
//! statement per call. Neither is transactional: a failure leaves whatever
//! ran before it in place.

use super::{Scope, StatementExecutor};
use crate::error::{Result, SaberError};
use tracing::{debug, info};

/// Counts reported by a successful [`import_data`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows sent to the database.
    pub rows: usize,
    /// INSERT statements issued.
    pub batches: usize,
}

/// Returns the statement that creates `database` if it is missing.
pub fn create_database_statement(database: &str) -> String {
    format!("create database if not exists {database};")
}

/// Creates `database`, then applies each schema statement in order.
///
/// The database statement runs without a database selected; the schema
/// statements run inside it. Stops at the first failing statement. Objects
/// created by earlier statements are not rolled back.
pub fn create_schema<E, S>(executor: &E, database: &str, statements: &[S]) -> Result<()>
where
    E: StatementExecutor + ?Sized,
    S: AsRef<str>,
{
    executor.execute(&create_database_statement(database), Scope::Server)?;

    for (index, statement) in statements.iter().enumerate() {
        debug!(
            "Applying schema statement {} of {}",
            index + 1,
            statements.len()
        );
        executor.execute(statement.as_ref(), Scope::Database)?;
    }

    info!(
        "Schema for '{}' applied ({} statements)",
        database,
        statements.len()
    );
    Ok(())
}

/// Inserts `rows` into `table`, `batch_size` rows per INSERT statement.
///
/// `rows` is consumed lazily and only once. Each row must hold one value per
/// header, and every value must already be a SQL literal (`42`, `'O''Neil'`,
/// `NULL`): values are spliced into the statement as-is, see
/// [`insert_statement`].
///
/// Fails on the first batch the database rejects. Batches sent before it
/// remain committed, since nothing wraps the import in a transaction.
pub fn import_data<E, H, I, R, V>(
    executor: &E,
    table: &str,
    headers: &[H],
    rows: I,
    batch_size: usize,
) -> Result<ImportSummary>
where
    E: StatementExecutor + ?Sized,
    H: AsRef<str>,
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = V>,
    V: Into<String>,
{
    if batch_size == 0 {
        return Err(SaberError::import("batch size must be at least 1"));
    }

    let mut summary = ImportSummary::default();
    let mut batch: Vec<Vec<String>> = Vec::new();

    let mut send_batch = |batch: &mut Vec<Vec<String>>| -> Result<()> {
        executor.execute(&insert_statement(table, headers, &batch[..]), Scope::Database)?;
        summary.rows += batch.len();
        summary.batches += 1;
        debug!(
            "Sent batch {} to '{}' ({} rows)",
            summary.batches,
            table,
            batch.len()
        );
        batch.clear();
        Ok(())
    };

    for row in rows {
        batch.push(row.into_iter().map(Into::into).collect());

        if batch.len() == batch_size {
            send_batch(&mut batch)?;
        }
    }
    if !batch.is_empty() {
        send_batch(&mut batch)?;
    }

    info!(
        "Imported {} rows into '{}' in {} batches",
        summary.rows, table, summary.batches
    );
    Ok(summary)
}

/// Renders one multi-row INSERT:
/// `INSERT INTO <table> (<h1>,<h2>) VALUES (<v1>,<v2>),(<v1>,<v2>);`
///
/// This is the only place caller-supplied text is spliced into SQL. The table
/// name, headers and values are inserted verbatim with no quoting or
/// escaping, so everything passed here must already be safe SQL. Row width is
/// not checked against the headers; a mismatch is left for the database to
/// reject.
pub fn insert_statement<H, V>(table: &str, headers: &[H], rows: &[Vec<V>]) -> String
where
    H: AsRef<str>,
    V: AsRef<str>,
{
    let columns = headers
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",");

    let values = rows
        .iter()
        .map(|row| {
            let literals = row
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(",");
            format!("({literals})")
        })
        .collect::<Vec<_>>()
        .join(",");

    format!("INSERT INTO {table} ({columns}) VALUES {values};")
}
