//! Fuzz testing for the streaming field writer.
//!
//! This fuzz target drives a `FieldWriter` with arbitrary operations and
//! checks that every sealed element reads back, renders to valid JSON, and
//! that abandoned or rejected elements leave nothing behind.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use contiguous::{ContiguousList, Record, SchemaBuilder, Value};

#[derive(Debug, Default)]
struct Entry {
    title: Option<String>,
    count: i16,
    weight: Option<f64>,
}

impl Record for Entry {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("title", |e| &e.title, |e, v| e.title = v)
            .scalar("count", |e| &e.count, |e, v| e.count = v)
            .scalar("weight", |e| &e.weight, |e, v| e.weight = v);
    }
}

#[derive(Debug, Arbitrary)]
enum Operation {
    SetNull,
    SetLong(i64),
    SetDouble(f64),
    SetText(String),
    Finish,
    Abandon,
}

fuzz_target!(|operations: Vec<Operation>| {
    let Ok(mut list) = ContiguousList::<Entry>::new() else {
        return;
    };

    let mut sealed = 0;
    {
        let mut writer = list.field_writer();
        for operation in operations {
            let _ = match operation {
                Operation::SetNull => writer.set(Value::Null),
                Operation::SetLong(v) => writer.set(v),
                Operation::SetDouble(v) => writer.set(v),
                Operation::SetText(text) => writer.set(text),
                Operation::Finish => writer.finish_record().map(|_| sealed += 1),
                Operation::Abandon => {
                    writer.abandon_record();
                    Ok(())
                }
            };
        }
    }

    assert_eq!(list.len(), sealed);
    for index in 0..list.len() {
        assert!(list.get(index).is_ok());
        let rendered = list.render(index).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&rendered).is_ok());
    }
});
