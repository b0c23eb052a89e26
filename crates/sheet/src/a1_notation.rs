use crate::error::{Result, SheetError};

/// Parse A1-style cell notation (e.g., "A1", "Z99", "AA1")
/// Returns (row, column) as 0-based indices
pub fn parse_a1(notation: &str) -> Result<(usize, usize)> {
    let notation = notation.trim().to_uppercase();

    let split_pos = notation
        .bytes()
        .position(|b| b.is_ascii_digit())
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.clone()))?;

    if split_pos == 0 {
        return Err(SheetError::InvalidCellNotation(notation));
    }

    let col = parse_column_letters(&notation[..split_pos])
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.clone()))?;
    let row = notation[split_pos..]
        .parse::<usize>()
        .map_err(|_| SheetError::InvalidCellNotation(notation.clone()))?;

    if row == 0 {
        return Err(SheetError::InvalidCellNotation(notation));
    }

    Ok((row - 1, col))
}

/// Format a 0-based (row, column) pair as A1 notation
#[must_use]
pub fn to_a1(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row + 1)
}

/// Convert a 0-based column index to letters (0 -> A, 25 -> Z, 26 -> AA)
#[must_use]
pub fn column_letters(col: usize) -> String {
    let mut letters = Vec::new();
    let mut n = col;

    loop {
        letters.push(b'A' + (n % 26) as u8);
        n /= 26;
        if n == 0 {
            break;
        }
        n -= 1;
    }

    letters.iter().rev().map(|&b| b as char).collect()
}

/// Convert column letters to 0-based column index
fn parse_column_letters(col_str: &str) -> Option<usize> {
    if col_str.is_empty() {
        return None;
    }

    let mut col = 0usize;
    for b in col_str.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        col = col.checked_mul(26)?.checked_add((b - b'A') as usize + 1)?;
    }

    Some(col - 1)
}
