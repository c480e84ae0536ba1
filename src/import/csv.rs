//! Line-oriented CSV reader.
//!
//! The first non-blank line holds the column names. Every later non-blank
//! line is one row. A leading UTF-8 byte-order mark is dropped. Fields may
//! be wrapped in double quotes, with `""` standing for a literal quote.
//! Quoted fields cannot span lines.

use crate::error::{Result, SaberError};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// A delimited text file read one row at a time.
pub struct CsvSource<R> {
    headers: Vec<String>,
    lines: Lines<R>,
    delimiter: char,
    line_number: usize,
}

impl CsvSource<BufReader<File>> {
    /// Opens `path` and reads its header row.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            SaberError::import(format!("Cannot open {}: {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(file), ',')
    }
}

impl<R: BufRead> CsvSource<R> {
    /// Reads the header row from `reader`.
    pub fn from_reader(reader: R, delimiter: char) -> Result<Self> {
        let mut source = Self {
            headers: Vec::new(),
            lines: reader.lines(),
            delimiter,
            line_number: 0,
        };

        source.headers = match source.next_line()? {
            Some(line) => {
                let line = line.strip_prefix('\u{feff}').unwrap_or(&line);
                parse_line(line, delimiter)
            }
            None => return Err(SaberError::import("file has no header row")),
        };

        Ok(source)
    }

    /// Column names from the header row.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Next non-blank line, with any trailing `\r` removed.
    fn next_line(&mut self) -> Result<Option<String>> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            let line = line?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            if !line.trim().is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
        Ok(None)
    }
}

impl<R: BufRead> Iterator for CsvSource<R> {
    type Item = Result<Vec<String>>;

    fn next(&mut self) -> Option<Self::Item> {
        let line = match self.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => return None,
            Err(e) => return Some(Err(e)),
        };

        let fields = parse_line(&line, self.delimiter);
        if fields.len() != self.headers.len() {
            return Some(Err(SaberError::import(format!(
                "line {}: expected {} fields, found {}",
                self.line_number,
                self.headers.len(),
                fields.len()
            ))));
        }

        Some(Ok(fields))
    }
}

/// Splits one line into trimmed fields.
fn parse_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(current.trim().to_string());
            current = String::new();
        } else {
            current.push(c);
        }
    }

    fields.push(current.trim().to_string());
    fields
}
