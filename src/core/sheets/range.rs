//! A1-notation helpers for addressing sheet data.

use serde_json::Value;

/// Convert a 1-based column index to its letter form (1 -> A, 26 -> Z, 27 -> AA).
///
/// Bijective base-26: there is no zero digit, so every step borrows one
/// before dividing. Returns an empty string for 0, which no caller passes.
pub fn column_letter(n: u32) -> String {
    let mut result = String::new();
    let mut n = n;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

/// Quote a sheet title for use in an A1 range.
///
/// Sheets requires the title wrapped in single quotes, with embedded single
/// quotes doubled (`O'Brien` -> `'O''Brien'`).
pub fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Smallest rectangular range covering the fetched grid, in A1 notation.
///
/// Rows 1..=R and columns 1..=C where R is the row count and C the longest
/// row observed. An empty grid (or one whose rows are all empty) collapses
/// to the single-cell range `A1:A1`.
pub fn used_range(sheet_title: &str, grid: &[Vec<Value>]) -> String {
    let rows = grid.len();
    let cols = grid.iter().map(|row| row.len()).max().unwrap_or(0);
    let title = quote_sheet_title(sheet_title);

    if rows == 0 || cols == 0 {
        return format!("{}!A1:A1", title);
    }

    format!("{}!A1:{}{}", title, column_letter(cols as u32), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn single_letter_columns() {
        for (i, expected) in ('A'..='Z').enumerate() {
            assert_eq!(column_letter(i as u32 + 1), expected.to_string());
        }
    }

    #[test]
    fn multi_letter_columns() {
        assert_eq!(column_letter(26), "Z");
        assert_eq!(column_letter(27), "AA");
        assert_eq!(column_letter(52), "AZ");
        assert_eq!(column_letter(702), "ZZ");
        assert_eq!(column_letter(703), "AAA");
    }

    #[test]
    fn empty_grid_is_single_cell() {
        assert_eq!(used_range("Sheet1", &[]), "'Sheet1'!A1:A1");
        assert_eq!(used_range("Sheet1", &[vec![], vec![]]), "'Sheet1'!A1:A1");
    }

    #[test]
    fn ragged_grid_uses_widest_row() {
        let grid = vec![vec![json!("a"), json!("b")], vec![json!("c")]];
        assert_eq!(used_range("Sheet1", &grid), "'Sheet1'!A1:B2");
    }

    #[test]
    fn apostrophes_in_titles_are_doubled() {
        let grid = vec![vec![json!(1)]];
        assert_eq!(used_range("O'Brien", &grid), "'O''Brien'!A1:A1");
    }
}
