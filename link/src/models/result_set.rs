use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use super::crate_type::ColumnType;
use super::sql_response::SqlResponse;
use super::value::CrateValue;

/// A result row keyed by column name.
pub type TypedRow = HashMap<String, CrateValue>;

/// Outcome of a SQL statement.
///
/// Keeps the positional representation the server sent (`cols`, `col_types`,
/// `rows`) and adds `json`, one [`TypedRow`] per raw row. Timestamp columns
/// are decoded into [`CrateValue::Timestamp`]; all other cells pass through.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSet {
    pub cols: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub col_types: Option<Vec<JsonValue>>,

    pub rows: Vec<Vec<JsonValue>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rowcount: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    pub json: Vec<TypedRow>,
}

impl ResultSet {
    /// Build a result set from a successfully parsed response body.
    ///
    /// A missing `rows` field yields no rows. Every typed row has one entry
    /// per column; cells missing from a short raw row become `Null`.
    pub fn from_response(response: SqlResponse) -> Self {
        let rows = response.rows.unwrap_or_default();
        let column_types: Option<Vec<ColumnType>> = response
            .col_types
            .as_ref()
            .map(|types| types.iter().map(ColumnType::from_wire).collect());

        let json = rows
            .iter()
            .map(|row| type_row(&response.cols, column_types.as_deref(), row))
            .collect();

        Self {
            cols: response.cols,
            col_types: response.col_types,
            rows,
            rowcount: response.rowcount,
            duration: response.duration,
            json,
        }
    }

    /// Decoded column types, if the server reported them.
    ///
    /// Only timestamp columns are decoded into typed rows. Callers that map
    /// rows onto their own types, or render arrays and objects differently,
    /// read the declared type of the remaining columns here.
    pub fn column_types(&self) -> Option<Vec<ColumnType>> {
        self.col_types
            .as_ref()
            .map(|types| types.iter().map(ColumnType::from_wire).collect())
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Typed cell by row index and column name
    pub fn get(&self, row: usize, column: &str) -> Option<&CrateValue> {
        self.json.get(row)?.get(column)
    }
}

fn type_row(cols: &[String], types: Option<&[ColumnType]>, row: &[JsonValue]) -> TypedRow {
    let mut typed = HashMap::with_capacity(cols.len());
    for (i, name) in cols.iter().enumerate() {
        let cell = row.get(i).cloned().unwrap_or(JsonValue::Null);
        let is_timestamp = types
            .and_then(|t| t.get(i))
            .map(ColumnType::is_timestamp)
            .unwrap_or(false);

        let value = if is_timestamp && !cell.is_null() {
            CrateValue::from_timestamp_cell(cell)
        } else {
            CrateValue::from(cell)
        };
        typed.insert(name.clone(), value);
    }
    typed
}
