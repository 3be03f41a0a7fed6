use eyre::{eyre, Result};

use super::RowSource;
use crate::types::Value;

/// Rows held in memory as `(column, value)` pairs, in any column order.
///
/// Column lookup ignores ASCII case, as SQL column labels do.
#[derive(Debug, Clone, Default)]
pub struct MemoryRows {
    rows: Vec<Vec<(String, Value)>>,
    current: Option<usize>,
}

impl MemoryRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_row<I, K, V>(&mut self, row: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.rows.push(
            row.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        );
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Move back before the first row.
    pub fn rewind(&mut self) {
        self.current = None;
    }

    fn row(&self) -> Result<&[(String, Value)]> {
        self.current
            .and_then(|index| self.rows.get(index))
            .map(Vec::as_slice)
            .ok_or_else(|| eyre!("no current row, call advance first"))
    }
}

impl RowSource for MemoryRows {
    fn advance(&mut self) -> Result<bool> {
        let next = self.current.map_or(0, |index| index + 1);
        self.current = Some(next.min(self.rows.len()));
        Ok(next < self.rows.len())
    }

    fn column(&self, name: &str) -> Result<Value> {
        self.row()?
            .iter()
            .find(|(column, _)| column.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
            .ok_or_else(|| eyre!("no column named {}", name))
    }

    fn first_column(&self) -> Result<Value> {
        self.row()?
            .first()
            .map(|(_, value)| value.clone())
            .ok_or_else(|| eyre!("row has no columns"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_rows_once() {
        let mut rows = MemoryRows::new();
        rows.push_row([("a", 1)]).push_row([("a", 2)]);
        assert_eq!(rows.len(), 2);

        assert!(rows.column("a").is_err());
        assert!(rows.advance().unwrap());
        assert_eq!(rows.column("A").unwrap(), Value::Int(1));
        assert!(rows.advance().unwrap());
        assert_eq!(rows.first_column().unwrap(), Value::Int(2));
        assert!(!rows.advance().unwrap());
        assert!(!rows.advance().unwrap());
        assert!(rows.column("a").is_err());

        rows.rewind();
        assert!(rows.advance().unwrap());
        assert_eq!(rows.column("a").unwrap(), Value::Int(1));
    }

    #[test]
    fn unknown_column_is_an_error() {
        let mut rows = MemoryRows::new();
        rows.push_row([("name", "Arthur")]);
        rows.advance().unwrap();
        assert!(rows.column("age").is_err());
    }
}
