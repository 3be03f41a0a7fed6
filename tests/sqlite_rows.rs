//! Loading lists from SQLite queries.
//!
//! ```sh
//! cargo test --features sqlite --test sqlite_rows
//! ```

#![cfg(feature = "sqlite")]

use contiguous::rows::SqliteRows;
use contiguous::{append_rows_mapped, collect_rows, BufferPool, ContiguousList, Record, SchemaBuilder};
use rusqlite::Connection;

#[derive(Debug, Default, PartialEq)]
struct President {
    name: String,
    age: i32,
    approval: Option<f64>,
}

impl Record for President {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("name", |p| &p.name, |p, v| p.name = v)
            .scalar("age", |p| &p.age, |p, v| p.age = v)
            .scalar("approval", |p| &p.approval, |p, v| p.approval = v);
    }
}

fn galaxy() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE presidents (name TEXT, age INTEGER, approval_rating REAL);
         INSERT INTO presidents VALUES ('Zaphod Beeblebrox', 200, 0.75);
         INSERT INTO presidents VALUES ('Yooden Vranx', 350, NULL);",
    )
    .unwrap();
    conn
}

#[test]
fn query_of_text_column_fills_string_list() {
    let conn = galaxy();
    let mut stmt = conn
        .prepare("SELECT name FROM presidents ORDER BY age")
        .unwrap();
    let mut rows = SqliteRows::query(&mut stmt, []).unwrap();

    let names: ContiguousList<String> = collect_rows(&mut rows, &BufferPool::new()).unwrap();
    assert_eq!(
        names.to_vec().unwrap(),
        vec!["Zaphod Beeblebrox".to_string(), "Yooden Vranx".to_string()]
    );
}

#[test]
fn query_fills_records_with_mapped_columns() {
    let conn = galaxy();
    let mut stmt = conn
        .prepare("SELECT * FROM presidents WHERE age > ?1 ORDER BY age")
        .unwrap();
    let mut rows = SqliteRows::query(&mut stmt, [100]).unwrap();
    assert_eq!(rows.column_names(), ["name", "age", "approval_rating"]);

    let mut presidents = ContiguousList::<President>::new().unwrap();
    append_rows_mapped(&mut rows, &mut presidents, |field| {
        (field == "approval").then(|| "approval_rating".to_string())
    })
    .unwrap();

    assert_eq!(
        presidents.get(0).unwrap(),
        President {
            name: "Zaphod Beeblebrox".to_string(),
            age: 200,
            approval: Some(0.75),
        }
    );
    assert_eq!(presidents.get(1).unwrap().approval, None);
}
