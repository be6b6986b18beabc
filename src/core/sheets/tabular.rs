//! Grid-to-text serialization for model prompts.

use serde_json::Value;

/// Render a grid as tab-separated text, one line per row.
///
/// The values endpoint hands back JSON values, so cells can be strings,
/// numbers, or nulls for blanks. Nulls and missing cells become empty
/// strings rather than the literal word "null". An empty grid yields an
/// empty string.
pub fn to_delimited_text(grid: &[Vec<Value>]) -> String {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(cell_text)
                .collect::<Vec<String>>()
                .join("\t")
        })
        .collect::<Vec<String>>()
        .join("\n")
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_cells_with_tabs_and_rows_with_newlines() {
        let grid = vec![
            vec![json!("a"), json!("b")],
            vec![json!(1), json!(null)],
        ];
        assert_eq!(to_delimited_text(&grid), "a\tb\n1\t");
    }

    #[test]
    fn empty_grid_yields_empty_string() {
        assert_eq!(to_delimited_text(&[]), "");
    }

    #[test]
    fn numbers_keep_their_json_rendering() {
        let grid = vec![vec![json!(2.5), json!(true)]];
        assert_eq!(to_delimited_text(&grid), "2.5\ttrue");
    }
}
