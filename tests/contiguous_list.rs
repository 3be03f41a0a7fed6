//! End-to-end tests of the public list API.
//!
//! These exercise lists the way a caller outside the crate would: records
//! declared through `Record`, a shared `BufferPool`, errors inspected through
//! `ContiguousError`.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use contiguous::{
    BufferPool, ContiguousError, ContiguousList, Record, SchemaBuilder, SchemaRegistry, Value,
};
use num_bigint::BigInt;

#[derive(Debug, Default, Clone, PartialEq)]
struct Coordinates {
    sector: String,
    x: f64,
    y: f64,
}

impl Record for Coordinates {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("sector", |c| &c.sector, |c, v| c.sector = v)
            .scalar("x", |c| &c.x, |c, v| c.x = v)
            .scalar("y", |c| &c.y, |c, v| c.y = v);
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Planet {
    name: String,
    population: Option<i64>,
    mass: Option<BigInt>,
    location: Coordinates,
    rating: Option<BigDecimal>,
}

impl Record for Planet {
    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .scalar("name", |p| &p.name, |p, v| p.name = v)
            .scalar("population", |p| &p.population, |p, v| p.population = v)
            .scalar("mass", |p| &p.mass, |p, v| p.mass = v)
            .nested("location", |p| &p.location, |p, v| p.location = v)
            .scalar("rating", |p| &p.rating, |p, v| p.rating = v);
    }
}

fn magrathea() -> Planet {
    Planet {
        name: "Magrathea".to_string(),
        population: Some(2),
        mass: Some(BigInt::from_str("598000000000000000000000000").unwrap()),
        location: Coordinates {
            sector: "ZZ9 Plural Z Alpha".to_string(),
            x: 42.5,
            y: -7.25,
        },
        rating: Some(BigDecimal::from_str("4.20").unwrap()),
    }
}

fn earth(index: i64) -> Planet {
    Planet {
        name: format!("Earth Mk {}", index),
        population: Some(7_000_000_000 + index),
        mass: None,
        location: Coordinates {
            sector: "ZZ9 Plural Z Alpha".to_string(),
            x: index as f64,
            y: 0.0,
        },
        rating: None,
    }
}

#[test]
fn schema_is_shared_by_every_list_of_a_type() {
    let first = ContiguousList::<Planet>::new().unwrap();
    let second = ContiguousList::<Planet>::new().unwrap();

    assert!(SchemaRegistry::global().contains::<Planet>());
    assert!(std::ptr::eq(first.schema(), second.schema()));

    let paths: Vec<_> = first.schema().leaves().iter().map(|l| l.path()).collect();
    assert_eq!(
        paths,
        [
            "name",
            "population",
            "mass",
            "location.sector",
            "location.x",
            "location.y",
            "rating"
        ]
    );
}

#[test]
fn planets_round_trip_through_growth() {
    let pool = BufferPool::new();
    let mut planets = ContiguousList::<Planet>::builder()
        .pool(pool.clone())
        .initial_capacity(128)
        .build()
        .unwrap();

    planets.push(&magrathea()).unwrap();
    for i in 0..500 {
        planets.push(&earth(i)).unwrap();
    }

    assert_eq!(planets.len(), 501);
    assert_eq!(planets.get(0).unwrap(), magrathea());
    assert_eq!(planets.get(1).unwrap(), earth(0));
    assert_eq!(planets.get(500).unwrap(), earth(499));
    assert!(pool.stats().misses > 1);
}

#[test]
fn flat_scan_matches_materialized_leaves() {
    let mut planets = ContiguousList::<Planet>::new().unwrap();
    planets.push(&magrathea()).unwrap();
    planets.push(&earth(3)).unwrap();

    let values: Vec<Value> = planets.values().collect::<eyre::Result<_>>().unwrap();
    assert_eq!(values.len(), 2 * planets.schema().leaf_count());

    let planet = magrathea();
    assert_eq!(
        &values[..7],
        &[
            Value::String(planet.name),
            Value::Long(2),
            Value::BigInteger(planet.mass.unwrap()),
            Value::String(planet.location.sector),
            Value::Double(42.5),
            Value::Double(-7.25),
            Value::BigDecimal(planet.rating.unwrap()),
        ]
    );
    assert_eq!(values[8], Value::Long(7_000_000_003));
    assert_eq!(values[9], Value::Null);
}

#[test]
fn rendered_planet_is_valid_json() {
    let mut planets = ContiguousList::<Planet>::new().unwrap();
    planets.push(&magrathea()).unwrap();
    planets.push(&earth(1)).unwrap();

    assert_eq!(
        planets.render(0).unwrap(),
        concat!(
            r#"{"name": "Magrathea", "population": 2, "mass": 598000000000000000000000000, "#,
            r#""location": {"sector": "ZZ9 Plural Z Alpha", "x": 42.5, "y": -7.25}, "#,
            r#""rating": 4.20}"#
        )
    );

    let array = planets.to_json_array().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&array).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[1]["name"], "Earth Mk 1");
    assert_eq!(parsed[1]["mass"], serde_json::Value::Null);
    assert_eq!(parsed[1]["location"]["x"], 1.0);
}

#[test]
fn list_embeds_in_a_serde_document() {
    #[derive(serde::Serialize)]
    struct Guide<'a> {
        edition: u32,
        entries: &'a ContiguousList<String>,
    }

    let mut entries = ContiguousList::<String>::new().unwrap();
    entries.push(&"Mostly harmless".to_string()).unwrap();

    let json = serde_json::to_string(&Guide {
        edition: 2,
        entries: &entries,
    })
    .unwrap();
    assert_eq!(json, r#"{"edition":2,"entries":["Mostly harmless"]}"#);
}

#[test]
fn typed_errors_survive_the_report() {
    let mut planets = ContiguousList::<Planet>::new().unwrap();
    let report = planets.get(0).unwrap_err();
    assert!(matches!(
        report.downcast_ref::<ContiguousError>(),
        Some(ContiguousError::IndexOutOfRange { index: 0, len: 0 })
    ));

    let report = planets.remove(0).unwrap_err();
    assert!(matches!(
        report.downcast_ref::<ContiguousError>(),
        Some(ContiguousError::UnsupportedOperation { operation: "remove" })
    ));
}

#[test]
fn lists_on_one_pool_from_many_threads() {
    let pool = BufferPool::new();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let pool = pool.clone();
            std::thread::spawn(move || {
                let mut list = ContiguousList::<i64>::builder()
                    .pool(pool)
                    .initial_capacity(64)
                    .build()
                    .unwrap();
                for i in 0..1000 {
                    list.push(&(i * t)).unwrap();
                }
                list.to_vec().unwrap().iter().sum::<i64>()
            })
        })
        .collect();

    let sums: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(sums, vec![0, 499_500, 999_000, 1_498_500]);
    assert!(pool.available() > 0);
}
