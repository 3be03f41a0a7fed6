//! # Row Sources
//!
//! Adapters that fill a [`ContiguousList`] from tabular results without
//! building an intermediate record per row. Each row is pushed straight into
//! the list's [`FieldWriter`](crate::list::FieldWriter): for every leaf of the
//! element schema the column of the same name is read and coerced to the
//! leaf's kind.
//!
//! ```text
//! RowSource ──advance()──> row ──column(leaf name)──> Value ──set()──> buffer
//!                                                            └── finish_record()
//! ```
//!
//! Lists of plain values have no leaf names and read the first column.
//!
//! A leaf name can be mapped to a different column name; the mapper returns
//! `None` for names it leaves alone. A row that fails part-way (missing
//! column, value that does not coerce) aborts the load and leaves no partial
//! element behind; rows loaded before it stay in the list.

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

use std::borrow::Cow;

use eyre::{Result, WrapErr};
use tracing::debug;

use crate::list::ContiguousList;
use crate::memory::BufferPool;
use crate::schema::Record;
use crate::types::Value;

pub use memory::MemoryRows;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRows;

/// A forward-only cursor over rows of named columns.
pub trait RowSource {
    /// Move to the next row. Returns `false` once rows are exhausted.
    fn advance(&mut self) -> Result<bool>;

    /// Value of the named column in the current row.
    fn column(&self, name: &str) -> Result<Value>;

    /// Value of the first column in the current row.
    fn first_column(&self) -> Result<Value>;
}

/// Append every remaining row of `source` to `list`, matching columns to
/// leaves by name. Returns the number of rows appended.
pub fn append_rows<T, S>(source: &mut S, list: &mut ContiguousList<T>) -> Result<usize>
where
    T: Record,
    S: RowSource + ?Sized,
{
    append_rows_mapped(source, list, |_| None)
}

/// Like [`append_rows`], reading the column `mapper(leaf)` when it returns a
/// name instead of the column named after the leaf.
pub fn append_rows_mapped<T, S, F>(
    source: &mut S,
    list: &mut ContiguousList<T>,
    mapper: F,
) -> Result<usize>
where
    T: Record,
    S: RowSource + ?Sized,
    F: Fn(&str) -> Option<String>,
{
    let mut writer = list.field_writer();
    let mut rows = 0;

    while source.advance()? {
        while let Some(field) = writer.next_field() {
            let value = match field.name() {
                Some(name) => {
                    let column: Cow<'_, str> = mapper(name).map_or(Cow::Borrowed(name), Cow::Owned);
                    source
                        .column(&column)
                        .wrap_err_with(|| format!("row {}: column {}", rows, column))?
                }
                None => source
                    .first_column()
                    .wrap_err_with(|| format!("row {}: first column", rows))?,
            };
            let path = field.leaf().path().to_string();
            field
                .set(value)
                .wrap_err_with(|| format!("row {}: field {}", rows, path))?;
        }
        writer.finish_record()?;
        rows += 1;
    }

    debug!(rows, "appended rows from row source");
    Ok(rows)
}

/// Create a list on `pool` holding every remaining row of `source`.
pub fn collect_rows<T, S>(source: &mut S, pool: &BufferPool) -> Result<ContiguousList<T>>
where
    T: Record,
    S: RowSource + ?Sized,
{
    let mut list = ContiguousList::with_pool(pool)?;
    append_rows(source, &mut list)?;
    Ok(list)
}
