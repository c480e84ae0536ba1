//! Data sources for `import`.
//!
//! Reads rows from delimited text files and formats their fields as SQL
//! literals ready for [`insert_statement`](crate::db::insert_statement).

mod csv;
mod literal;

pub use csv::CsvSource;
pub use literal::sql_literal;
