//! Text seed format.
//!
//! One board row per line, cells as comma-separated integer tokens. Rows are
//! written top to bottom as `0`/`1`; any nonzero token reads back as live.
//! There is no header, dimensions come from the contents.

use std::io::{self, BufRead, Write};

use super::GridError;

/// Reasons a seed document cannot be parsed. Line and column numbers are
/// 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("seed contains no rows")]
    NoRows,
    #[error("line {line} is empty")]
    EmptyRow { line: usize },
    #[error("line {line}, column {column}: `{token}` is not an integer")]
    InvalidToken {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("line {line} has {found} cells, expected {expected}")]
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Encode one row as a seed line, without the line terminator.
pub fn encode_line(row: &[bool]) -> String {
    let tokens: Vec<&str> = row
        .iter()
        .map(|&alive| if alive { "1" } else { "0" })
        .collect();
    tokens.join(",")
}

/// Write rows in seed format.
pub fn encode_rows<'a, W, I>(writer: &mut W, rows: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a [bool]>,
{
    for row in rows {
        writeln!(writer, "{}", encode_line(row))?;
    }
    Ok(())
}

/// Parse a single seed line (1-based `line` for error reporting).
pub fn decode_line(line: usize, text: &str) -> Result<Vec<bool>, FormatError> {
    if text.trim().is_empty() {
        return Err(FormatError::EmptyRow { line });
    }

    text.split(',')
        .enumerate()
        .map(|(i, token)| {
            parse_cell(token).ok_or_else(|| FormatError::InvalidToken {
                line,
                column: i + 1,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Parse an integer token of any magnitude, optionally signed. Nonzero is live.
fn parse_cell(token: &str) -> Option<bool> {
    let token = token.trim();
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.bytes().any(|b| b != b'0'))
}

/// Read a whole seed document into a rectangular matrix.
pub fn decode_rows<R: BufRead>(reader: R) -> Result<Vec<Vec<bool>>, GridError> {
    let mut rows: Vec<Vec<bool>> = Vec::new();

    for (i, text) in reader.lines().enumerate() {
        let line = i + 1;
        let row = decode_line(line, &text?)?;
        if let Some(first) = rows.first()
            && first.len() != row.len()
        {
            return Err(FormatError::Ragged {
                line,
                expected: first.len(),
                found: row.len(),
            }
            .into());
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(FormatError::NoRows.into());
    }
    Ok(rows)
}
