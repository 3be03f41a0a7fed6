use eyre::{bail, eyre, Result, WrapErr};
use rusqlite::types::ValueRef;
use rusqlite::{Params, Rows, Statement};

use super::RowSource;
use crate::types::Value;

/// Rows of a running SQLite query.
///
/// ```ignore
/// let conn = rusqlite::Connection::open_in_memory()?;
/// let mut stmt = conn.prepare("SELECT name, age FROM presidents")?;
/// let mut rows = SqliteRows::query(&mut stmt, [])?;
/// let presidents: ContiguousList<President> = collect_rows(&mut rows, &pool)?;
/// ```
///
/// INTEGER columns read as `Long`, REAL as `Double`, TEXT as `String`. BLOB
/// columns are rejected.
pub struct SqliteRows<'stmt> {
    columns: Vec<String>,
    rows: Rows<'stmt>,
    current: Vec<Value>,
}

impl<'stmt> SqliteRows<'stmt> {
    pub fn query<P: Params>(statement: &'stmt mut Statement<'_>, params: P) -> Result<Self> {
        let columns = statement
            .column_names()
            .into_iter()
            .map(String::from)
            .collect();
        let rows = statement.query(params).wrap_err("failed to run query")?;
        Ok(Self {
            columns,
            rows,
            current: Vec::new(),
        })
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }
}

impl RowSource for SqliteRows<'_> {
    fn advance(&mut self) -> Result<bool> {
        self.current.clear();
        let Some(row) = self.rows.next()? else {
            return Ok(false);
        };
        for index in 0..self.columns.len() {
            let value = to_value(row.get_ref(index)?)
                .wrap_err_with(|| format!("column {}", self.columns[index]))?;
            self.current.push(value);
        }
        Ok(true)
    }

    fn column(&self, name: &str) -> Result<Value> {
        let index = self
            .columns
            .iter()
            .position(|column| column.eq_ignore_ascii_case(name))
            .ok_or_else(|| eyre!("query has no column named {}", name))?;
        self.current
            .get(index)
            .cloned()
            .ok_or_else(|| eyre!("no current row, call advance first"))
    }

    fn first_column(&self) -> Result<Value> {
        self.current
            .first()
            .cloned()
            .ok_or_else(|| eyre!("no current row, call advance first"))
    }
}

fn to_value(value: ValueRef<'_>) -> Result<Value> {
    Ok(match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Long(v),
        ValueRef::Real(v) => Value::Double(v),
        ValueRef::Text(bytes) => Value::String(
            std::str::from_utf8(bytes)
                .wrap_err("TEXT column is not valid UTF-8")?
                .to_string(),
        ),
        ValueRef::Blob(_) => bail!("BLOB columns are not supported"),
    })
}
