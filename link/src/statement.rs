//! SQL statement construction.
//!
//! Turns records and schema descriptions into SQL text plus a positional
//! argument list. Table names, column names and WHERE clauses are inserted
//! verbatim; callers are responsible for passing trusted identifiers.

use serde_json::Value as JsonValue;

use crate::error::{CrateLinkError, Result};
use crate::models::Record;

/// Positional placeholder understood by CrateDB's REST endpoint
const PLACEHOLDER: &str = "?";

/// SQL text with its positional arguments, ready for the executor.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStatement {
    pub sql: String,
    pub args: Vec<JsonValue>,
}

impl PreparedStatement {
    pub fn new(sql: impl Into<String>, args: Vec<JsonValue>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Statement without arguments
    pub fn text(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }
}

/// The parts of an INSERT built from a record.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertClause {
    /// Column names, each wrapped in double quotes
    pub columns: Vec<String>,
    pub placeholders: Vec<String>,
    pub args: Vec<JsonValue>,
}

/// Quoted column list, placeholders and coerced arguments for `record`,
/// in record order.
pub fn build_insert_clause(record: &Record) -> Result<InsertClause> {
    if record.is_empty() {
        return Err(CrateLinkError::invalid_input("Record entry is not defined"));
    }

    let mut clause = InsertClause {
        columns: Vec::with_capacity(record.len()),
        placeholders: Vec::with_capacity(record.len()),
        args: Vec::with_capacity(record.len()),
    };
    for (column, value) in record.iter() {
        clause.columns.push(format!("\"{}\"", column));
        clause.placeholders.push(PLACEHOLDER.to_string());
        clause.args.push(value.to_argument());
    }
    Ok(clause)
}

/// `column = 'value'` fragments for an UPDATE ... SET clause.
///
/// Values are interpolated as string literals without escaping, so a value
/// containing a quote changes the statement. Only pass trusted data.
pub fn build_literal_update_assignments(record: &Record) -> Result<Vec<String>> {
    if record.is_empty() {
        return Err(CrateLinkError::invalid_input("Record entry is not defined"));
    }

    Ok(record
        .iter()
        .map(|(column, value)| format!("{} = '{}'", column, value.to_literal()))
        .collect())
}

pub fn build_insert_statement(table: &str, record: &Record) -> Result<PreparedStatement> {
    let clause = build_insert_clause(record)?;
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        clause.columns.join(","),
        clause.placeholders.join(",")
    );
    Ok(PreparedStatement::new(sql, clause.args))
}

/// UPDATE with inlined literal assignments. The argument list is empty.
pub fn build_update_statement(table: &str, record: &Record, where_clause: &str) -> Result<PreparedStatement> {
    let assignments = build_literal_update_assignments(record)?;
    Ok(PreparedStatement::text(format!(
        "UPDATE {} SET {} WHERE {}",
        table,
        assignments.join(","),
        where_clause
    )))
}

pub fn build_delete_statement(table: &str, where_clause: &str) -> PreparedStatement {
    PreparedStatement::text(format!("DELETE FROM {} WHERE {}", table, where_clause))
}

pub fn build_create_table_statement(schema: &TableSchema) -> PreparedStatement {
    let columns: Vec<String> = schema
        .columns
        .iter()
        .map(|(name, column_type)| format!("{} {}", name, column_type))
        .collect();
    PreparedStatement::text(format!("CREATE TABLE {} ({})", schema.name, columns.join(",")))
}

pub fn build_create_blob_table_statement(table: &str, shards: u32, replicas: u32) -> PreparedStatement {
    PreparedStatement::new(
        format!(
            "CREATE BLOB TABLE {} clustered into ? shards with (number_of_replicas=?)",
            table
        ),
        vec![JsonValue::from(shards), JsonValue::from(replicas)],
    )
}

pub fn build_drop_statement(table: &str, is_blob_table: bool) -> PreparedStatement {
    if is_blob_table {
        PreparedStatement::text(format!("DROP BLOB TABLE {}", table))
    } else {
        PreparedStatement::text(format!("DROP TABLE {}", table))
    }
}

/// Table definition for `CREATE TABLE`: a name and ordered `(column, type)`
/// pairs, where the type is raw SQL text such as `string` or `integer`.
///
/// # Examples
///
/// ```rust
/// use cratedb_link::TableSchema;
/// use serde_json::json;
///
/// let schema = TableSchema::new("person").column("name", "string").column("age", "integer");
/// let from_json = TableSchema::from_json(&json!({"person": {"name": "string", "age": "integer"}}));
/// assert_eq!(Some(schema), from_json);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<(String, String)>,
}

impl TableSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, name: impl Into<String>, column_type: impl Into<String>) -> Self {
        self.columns.push((name.into(), column_type.into()));
        self
    }

    /// Read `{"table": {"column": "type", ...}}`.
    ///
    /// Only the first table of the object is used; further keys are ignored.
    /// Column types that are not JSON strings are written as their JSON text.
    pub fn from_json(schema: &JsonValue) -> Option<Self> {
        let (name, table) = schema.as_object()?.iter().next()?;
        let columns = table
            .as_object()?
            .iter()
            .map(|(column, column_type)| {
                let column_type = match column_type {
                    JsonValue::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (column.clone(), column_type)
            })
            .collect();
        Some(Self {
            name: name.clone(),
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    #[test]
    fn test_insert_clause_lengths_and_order() {
        let record = Record::new().set("name", "Ada").set("age", 30).set("active", true);
        let clause = build_insert_clause(&record).unwrap();

        assert_eq!(clause.columns, vec!["\"name\"", "\"age\"", "\"active\""]);
        assert_eq!(clause.placeholders, vec!["?", "?", "?"]);
        assert_eq!(clause.args, vec![json!("Ada"), json!(30), json!(true)]);
    }

    #[test]
    fn test_insert_clause_quotes_each_column_once() {
        let record = Record::new().set("first name", "Ada");
        let clause = build_insert_clause(&record).unwrap();
        let column = &clause.columns[0];
        assert!(column.starts_with('"') && column.ends_with('"'));
        assert_eq!(column.matches('"').count(), 2);
    }

    #[test]
    fn test_insert_clause_coerces_timestamps() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let record = Record::new().set("created", ts).set("note", "x");
        let clause = build_insert_clause(&record).unwrap();
        assert_eq!(clause.args, vec![json!(1_700_000_000_000i64), json!("x")]);
    }

    #[test]
    fn test_insert_clause_rejects_empty_record() {
        let err = build_insert_clause(&Record::new()).unwrap_err();
        assert!(matches!(err, CrateLinkError::InvalidInput(_)));
    }

    #[test]
    fn test_insert_statement_text() {
        let record = Record::new().set("name", "Ada").set("age", 30);
        let stmt = build_insert_statement("people", &record).unwrap();
        assert_eq!(stmt.sql, r#"INSERT INTO people ("name","age") VALUES (?,?)"#);
        assert_eq!(stmt.args, vec![json!("Ada"), json!(30)]);
    }

    #[test]
    fn test_update_inlines_literals() {
        let record = Record::new().set("name", "Ada").set("age", 31);
        let stmt = build_update_statement("people", &record, "id = 1").unwrap();
        assert_eq!(stmt.sql, "UPDATE people SET name = 'Ada',age = '31' WHERE id = 1");
        assert!(stmt.args.is_empty());
    }

    #[test]
    fn test_update_assignments_reject_empty_record() {
        assert!(build_literal_update_assignments(&Record::new()).is_err());
    }

    #[test]
    fn test_delete_keeps_where_clause_verbatim() {
        let stmt = build_delete_statement("people", "name = 'O''Brien' OR age > 3");
        assert_eq!(stmt.sql, "DELETE FROM people WHERE name = 'O''Brien' OR age > 3");
        assert!(stmt.args.is_empty());
    }

    #[test]
    fn test_create_table() {
        let schema = TableSchema::new("person")
            .column("name", "string")
            .column("age", "integer");
        assert_eq!(
            build_create_table_statement(&schema).sql,
            "CREATE TABLE person (name string,age integer)"
        );
    }

    #[test]
    fn test_schema_from_json_reads_first_table_only() {
        let schema = TableSchema::from_json(&json!({
            "person": {"name": "string", "age": "integer"},
            "ignored": {"x": "long"}
        }))
        .unwrap();
        assert_eq!(schema.name, "person");
        assert_eq!(schema.columns.len(), 2);
        assert!(TableSchema::from_json(&json!({})).is_none());
        assert!(TableSchema::from_json(&json!({"t": 1})).is_none());
    }

    #[test]
    fn test_create_blob_table() {
        let stmt = build_create_blob_table_statement("images", 3, 1);
        assert_eq!(
            stmt.sql,
            "CREATE BLOB TABLE images clustered into ? shards with (number_of_replicas=?)"
        );
        assert_eq!(stmt.args, vec![json!(3), json!(1)]);
    }

    #[test]
    fn test_drop_statements() {
        assert_eq!(build_drop_statement("people", false).sql, "DROP TABLE people");
        assert_eq!(build_drop_statement("images", true).sql, "DROP BLOB TABLE images");
    }
}
