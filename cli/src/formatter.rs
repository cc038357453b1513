//! Output formatters for query results
//!
//! Renders a [`ResultSet`] as a box-drawn table sized to the terminal, or as
//! pretty-printed JSON with one object per row.

use clap::ValueEnum;
use cratedb_link::{CrateValue, ResultSet};
use serde_json::{Map, Value as JsonValue};

use crate::error::{CLIError, Result};

/// Maximum column width before truncation
const MAX_COLUMN_WIDTH: usize = 32;

/// Minimum column width when resizing to fit the terminal
const MIN_COLUMN_WIDTH: usize = 6;

/// Output format for query results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Formats query results for display
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Get terminal width, defaulting to 80 if unavailable
    fn get_terminal_width() -> usize {
        if let Some((w, _h)) = term_size::dimensions() {
            w
        } else {
            80
        }
    }

    /// Truncate a string to max width with ellipsis
    fn truncate_value(value: &str, max_width: usize) -> String {
        if value.chars().count() <= max_width {
            value.to_string()
        } else if max_width <= 3 {
            value.chars().take(max_width).collect()
        } else {
            let take = max_width - 3;
            format!("{}...", value.chars().take(take).collect::<String>())
        }
    }

    /// Format a statement result
    pub fn format_result(&self, result: &ResultSet) -> Result<String> {
        match self.format {
            OutputFormat::Table => Ok(self.format_table(result, Self::get_terminal_width())),
            OutputFormat::Json => self.format_json(result),
        }
    }

    fn took_ms(result: &ResultSet) -> f64 {
        result.duration.unwrap_or(0.0)
    }

    fn format_table(&self, result: &ResultSet, terminal_width: usize) -> String {
        // DDL and DML answer with no columns, only a row count
        if result.cols.is_empty() {
            return format!(
                "Query OK, {} rows affected\n\nTook: {:.3} ms",
                result.rowcount.unwrap_or(0),
                Self::took_ms(result)
            );
        }

        let columns = &result.cols;

        // Precompute string values once to avoid double formatting
        let mut string_rows: Vec<Vec<String>> = Vec::with_capacity(result.json.len());
        let mut col_widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
        for row in &result.json {
            let mut srow: Vec<String> = Vec::with_capacity(columns.len());
            for (i, col) in columns.iter().enumerate() {
                let value = row
                    .get(col)
                    .map(Self::format_value)
                    .unwrap_or_else(|| "NULL".to_string());
                col_widths[i] = col_widths[i].max(value.chars().count());
                srow.push(value);
            }
            string_rows.push(srow);
        }

        Self::fit_widths(&mut col_widths, terminal_width);

        let mut output = String::new();
        Self::push_border(&mut output, &col_widths, '┌', '┬', '┐');
        Self::push_row(&mut output, columns, &col_widths);
        Self::push_border(&mut output, &col_widths, '├', '┼', '┤');
        for srow in &string_rows {
            Self::push_row(&mut output, srow, &col_widths);
        }
        Self::push_border(&mut output, &col_widths, '└', '┴', '┘');

        let row_count = string_rows.len();
        let row_label = if row_count == 1 { "row" } else { "rows" };
        output.push_str(&format!("({} {})\n", row_count, row_label));
        output.push('\n');
        output.push_str(&format!("Took: {:.3} ms", Self::took_ms(result)));
        output
    }

    /// Shrink column widths until the table fits `terminal_width`
    fn fit_widths(col_widths: &mut [usize], terminal_width: usize) {
        let column_count = col_widths.len();
        if column_count == 0 {
            return;
        }

        let border_padding = column_count * 3 + 1;
        let available = terminal_width.saturating_sub(border_padding).max(column_count);

        let mut total_width = col_widths.iter().sum::<usize>();
        if total_width <= available {
            return;
        }

        for width in col_widths.iter_mut() {
            *width = (*width).min(MAX_COLUMN_WIDTH);
        }
        total_width = col_widths.iter().sum();

        while total_width > available {
            let widest = col_widths
                .iter()
                .enumerate()
                .filter(|(_, width)| **width > MIN_COLUMN_WIDTH)
                .max_by_key(|(_, width)| **width)
                .or_else(|| {
                    col_widths
                        .iter()
                        .enumerate()
                        .filter(|(_, width)| **width > 1)
                        .max_by_key(|(_, width)| **width)
                })
                .map(|(idx, _)| idx);

            match widest {
                Some(idx) => col_widths[idx] -= 1,
                None => break,
            }
            total_width = col_widths.iter().sum();
        }
    }

    fn push_border(output: &mut String, col_widths: &[usize], left: char, mid: char, right: char) {
        output.push(left);
        for (idx, width) in col_widths.iter().enumerate() {
            output.push_str(&"─".repeat(width + 2));
            output.push(if idx == col_widths.len() - 1 { right } else { mid });
        }
        output.push('\n');
    }

    fn push_row(output: &mut String, values: &[String], col_widths: &[usize]) {
        output.push('│');
        for (i, value) in values.iter().enumerate() {
            output.push(' ');
            let truncated = Self::truncate_value(value, col_widths[i]);
            output.push_str(&format!("{:width$}", truncated, width = col_widths[i]));
            output.push(' ');
            output.push('│');
        }
        output.push('\n');
    }

    /// Format as JSON: an array of row objects in column order, or the row
    /// count for statements that return no columns.
    fn format_json(&self, result: &ResultSet) -> Result<String> {
        let json = if result.cols.is_empty() {
            serde_json::json!({ "rowcount": result.rowcount.unwrap_or(0) })
        } else {
            let rows = result
                .json
                .iter()
                .map(|row| -> serde_json::Result<JsonValue> {
                    let mut object = Map::new();
                    for col in &result.cols {
                        let value = row.get(col).cloned().unwrap_or(CrateValue::Null);
                        object.insert(col.clone(), serde_json::to_value(value)?);
                    }
                    Ok(JsonValue::Object(object))
                })
                .collect::<serde_json::Result<Vec<_>>>()
                .map_err(|e| CLIError::FormatError(e.to_string()))?;
            JsonValue::Array(rows)
        };

        serde_json::to_string_pretty(&json).map_err(|e| CLIError::FormatError(e.to_string()))
    }

    /// Format a typed cell for table display
    fn format_value(value: &CrateValue) -> String {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratedb_link::SqlResponse;
    use serde_json::json;

    fn result_set(body: JsonValue) -> ResultSet {
        let response: SqlResponse = serde_json::from_value(body).unwrap();
        ResultSet::from_response(response)
    }

    #[test]
    fn test_format_value() {
        assert_eq!(OutputFormatter::format_value(&CrateValue::Null), "NULL");
        assert_eq!(OutputFormatter::format_value(&CrateValue::Bool(true)), "true");
        assert_eq!(OutputFormatter::format_value(&CrateValue::from("test")), "test");
    }

    #[test]
    fn test_truncate_value() {
        assert_eq!(OutputFormatter::truncate_value("short", 10), "short");
        assert_eq!(
            OutputFormatter::truncate_value("this is a very long string that needs truncation", 20),
            "this is a very lo..."
        );
        assert_eq!(OutputFormatter::truncate_value("test", 3), "tes");
        assert_eq!(OutputFormatter::truncate_value("test", 2), "te");
        assert_eq!(OutputFormatter::truncate_value("test", 4), "test");
        assert_eq!(OutputFormatter::truncate_value("hello", 4), "h...");
    }

    #[test]
    fn test_table_layout() {
        let formatter = OutputFormatter::new(OutputFormat::Table);
        let result = result_set(json!({
            "cols": ["name", "age"],
            "rows": [["Ada", 30], ["Grace", null]],
            "rowcount": 2,
            "duration": 1.5
        }));

        let output = formatter.format_table(&result, 120);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "┌───────┬──────┐");
        assert_eq!(lines[1], "│ name  │ age  │");
        assert_eq!(lines[2], "├───────┼──────┤");
        assert_eq!(lines[3], "│ Ada   │ 30   │");
        assert_eq!(lines[4], "│ Grace │ NULL │");
        assert_eq!(lines[5], "└───────┴──────┘");
        assert_eq!(lines[6], "(2 rows)");
        assert_eq!(lines[8], "Took: 1.500 ms");
    }

    #[test]
    fn test_table_timestamp_rendered_rfc3339() {
        let formatter = OutputFormatter::new(OutputFormat::Table);
        let result = result_set(json!({
            "cols": ["joined"],
            "col_types": [11],
            "rows": [[1700000000000i64]],
        }));

        let output = formatter.format_table(&result, 120);
        assert!(output.contains("2023-11-14T22:13:20.000Z"));
    }

    #[test]
    fn test_table_without_columns() {
        let formatter = OutputFormatter::new(OutputFormat::Table);
        let result = result_set(json!({"cols": [], "rowcount": 3, "duration": 0.25}));

        assert_eq!(
            formatter.format_table(&result, 80),
            "Query OK, 3 rows affected\n\nTook: 0.250 ms"
        );
    }

    #[test]
    fn test_narrow_terminal_shrinks_columns() {
        let mut widths = vec![40, 40, 4];
        OutputFormatter::fit_widths(&mut widths, 40);
        assert!(widths.iter().sum::<usize>() <= 40 - (3 * 3 + 1));
        assert_eq!(widths[2], 4);
    }

    #[test]
    fn test_json_rows_keep_column_order() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let result = result_set(json!({
            "cols": ["name", "age", "joined"],
            "col_types": [4, 9, 11],
            "rows": [["Ada", 30, 0]],
        }));

        let output = formatter.format_result(&result).unwrap();
        let parsed: JsonValue = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            json!([{"name": "Ada", "age": 30, "joined": "1970-01-01T00:00:00.000Z"}])
        );
        let name_at = output.find("\"name\"").unwrap();
        let age_at = output.find("\"age\"").unwrap();
        assert!(name_at < age_at);
    }

    #[test]
    fn test_json_without_columns() {
        let formatter = OutputFormatter::new(OutputFormat::Json);
        let result = result_set(json!({"cols": [], "rowcount": 1}));

        let parsed: JsonValue = serde_json::from_str(&formatter.format_result(&result).unwrap()).unwrap();
        assert_eq!(parsed, json!({"rowcount": 1}));
    }

    #[test]
    fn test_terminal_width_detection() {
        let width = OutputFormatter::get_terminal_width();
        assert!(width > 0);
    }
}
