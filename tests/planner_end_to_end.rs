//! End-to-end Planning Tests
//!
//! Clauses are parsed, planned and executed against tables backed by the
//! in-memory store:
//! - Same-column subtrees fold into a single interval set
//! - Mixed-column subtrees fall back to row-id merges
//! - Results always come back sorted and deduplicated

use halo::codec::DataType;
use halo::executor::PlanExecutor;
use halo::parser::{WhereClause, MAX_CLAUSE_DEPTH};
use halo::planner::{Planner, QueryPlan, RowIdSet};
use halo::schema::{ColumnProperty, TableSchema};
use halo::storage::{KeySpace, MemoryStore};
use halo::table::Table;

// =============================================================================
// Helper Functions
// =============================================================================

/// One indexed INT32 column `c0` holding 0..999, plus an unindexed label
fn numbers() -> Table<MemoryStore> {
    let schema = TableSchema::new(
        "numbers",
        vec![
            ColumnProperty::indexed("c0", DataType::Int32),
            ColumnProperty::plain("label", DataType::Varchar(8)),
        ],
    )
    .unwrap();

    let mut table = Table::open(schema, MemoryStore::new()).unwrap();
    for i in 0..1000 {
        let value = i.to_string();
        let label = if i % 2 == 0 { "even" } else { "odd" };
        table
            .insert(&["c0", "label"], &[value.as_str(), label])
            .unwrap();
    }
    table
}

/// Two indexed columns so clauses can mix them
fn people() -> Table<MemoryStore> {
    let schema = TableSchema::new(
        "people",
        vec![
            ColumnProperty::indexed("name", DataType::Varchar(16)),
            ColumnProperty::indexed("age", DataType::Int64),
            ColumnProperty::indexed("height", DataType::Double),
        ],
    )
    .unwrap();

    let mut table = Table::open(schema, MemoryStore::new()).unwrap();
    let rows = [
        ("ann", "31", "1.62"),
        ("bob", "-4", "0.5"),
        ("cat", "31", "1.80"),
        ("dan", "58", "1.75"),
        ("eve", "17", "-0.25"),
    ];
    for (name, age, height) in rows {
        table
            .insert(&["name", "age", "height"], &[name, age, height])
            .unwrap();
    }
    table
}

fn values(table: &Table<MemoryStore>, column: &str, rows: &RowIdSet) -> Vec<String> {
    table
        .select(&[column], rows)
        .unwrap()
        .column_values(column)
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect()
}

// =============================================================================
// Single Column Tests
// =============================================================================

#[test]
fn test_between_and_or_folds_into_one_interval_set() {
    let table = numbers();
    let clause =
        WhereClause::parse("WHERE c0 BETWEEN 10 AND 110 and (c0 > 100 or c0 < 20);").unwrap();

    let plan = table.plan(&clause).unwrap();
    assert_eq!(plan.strategy(), "INDEX_SCAN");
    // [10, 20) and (100, 110]
    assert_eq!(plan.scan_count(), 2);

    let rows = table.find_clause(&clause).unwrap();
    assert_eq!(rows.len(), 20);

    let found = values(&table, "c0", &rows);
    assert_eq!(found.first().map(String::as_str), Some("10"));
    assert_eq!(found.last().map(String::as_str), Some("110"));

    let expected: Vec<String> = (10..20).chain(101..=110).map(|i| i.to_string()).collect();
    assert_eq!(found, expected);
}

#[test]
fn test_comparison_operators() {
    let table = numbers();
    let count = |text: &str| table.find(text).unwrap().len();

    assert_eq!(count("WHERE c0 < 10"), 10);
    assert_eq!(count("WHERE c0 <= 10"), 11);
    assert_eq!(count("WHERE c0 = 500"), 1);
    assert_eq!(count("WHERE c0 != 500"), 999);
    assert_eq!(count("WHERE c0 >= 990"), 10);
    assert_eq!(count("WHERE c0 > 990"), 9);
    assert_eq!(count("WHERE c0 = 5000"), 0);
    assert_eq!(count("WHERE c0 BETWEEN 20 AND 10"), 0);
}

#[test]
fn test_empty_clause_is_full_scan() {
    let table = numbers();
    let plan = table.plan(&WhereClause::all()).unwrap();
    assert_eq!(plan, QueryPlan::FullScan);

    let rows = table.find_clause(&WhereClause::all()).unwrap();
    assert_eq!(rows.len(), 1000);
    assert!(rows.is_sorted());
}

#[test]
fn test_unindexed_column_rejected() {
    let table = numbers();
    let err = table.find("WHERE label = even").unwrap_err();
    assert_eq!(err.code().code(), "HALO_COLUMN_NOT_INDEXED");

    let explain = table.explain("WHERE label = even");
    assert!(!explain.accepted);
    assert_eq!(
        explain.rejection_code.as_deref(),
        Some("HALO_COLUMN_NOT_INDEXED")
    );
}

// =============================================================================
// Mixed Column Tests
// =============================================================================

#[test]
fn test_mixed_columns_merge_row_ids() {
    let table = people();
    let clause = WhereClause::parse("WHERE age = 31 AND height > 1.7 OR name = eve").unwrap();

    let plan = table.plan(&clause).unwrap();
    assert_eq!(plan.strategy(), "ROW_ID_MERGE");
    assert_eq!(plan.scan_count(), 3);

    let rows = table.find_clause(&clause).unwrap();
    assert_eq!(values(&table, "name", &rows), vec!["cat", "eve"]);
}

#[test]
fn test_negative_and_fractional_ranges() {
    let table = people();
    assert_eq!(
        values(&table, "name", &table.find("WHERE age < 0").unwrap()),
        vec!["bob"]
    );
    assert_eq!(
        values(&table, "name", &table.find("WHERE height < 1").unwrap()),
        vec!["bob", "eve"]
    );
    assert_eq!(
        values(&table, "name", &table.find("WHERE name >= c AND name < e").unwrap()),
        vec!["cat", "dan"]
    );
}

#[test]
fn test_update_and_delete_keep_indexes_consistent() {
    let mut table = people();

    let rows = table.find("WHERE age = 31").unwrap();
    assert_eq!(table.update(&["age"], &["32"], &rows).unwrap(), 2);
    assert!(table.find("WHERE age = 31").unwrap().is_empty());
    assert_eq!(table.find("WHERE age = 32").unwrap().len(), 2);

    let rows = table.find("WHERE name = bob").unwrap();
    assert_eq!(table.delete(&rows).unwrap(), 1);
    assert!(table.find("WHERE age < 0").unwrap().is_empty());
    assert_eq!(table.store().key_count(KeySpace::Primary), 4);
}

#[test]
fn test_planner_and_executor_directly() {
    let table = numbers();
    let clause = WhereClause::parse("WHERE c0 < 3 OR c0 >= 998").unwrap();

    let plan = Planner::new(table.schema()).plan(clause.tree()).unwrap();
    match &plan {
        QueryPlan::IndexScan(intervals) => assert_eq!(intervals.len(), 2),
        other => panic!("expected an index scan, got {:?}", other),
    }

    let rows = PlanExecutor::new(table.store()).execute(&plan).unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(values(&table, "c0", &rows), vec!["0", "1", "2", "998", "999"]);
}

// =============================================================================
// Edge Value Tests
// =============================================================================

fn heights() -> Table<MemoryStore> {
    let schema = TableSchema::new(
        "heights",
        vec![
            ColumnProperty::indexed("h", DataType::Double),
            ColumnProperty::plain("name", DataType::Varchar(8)),
        ],
    )
    .unwrap();
    Table::open(schema, MemoryStore::new()).unwrap()
}

#[test]
fn test_signed_zero_and_nan() {
    let mut table = heights();
    table.insert(&["h", "name"], &["-0", "neg"]).unwrap();
    let err = table.insert(&["h", "name"], &["NaN", "nan"]).unwrap_err();
    assert_eq!(err.code().code(), "HALO_ENCODING_ERROR");
    table.insert(&["h", "name"], &["1", "one"]).unwrap();

    let names = |text: &str| values(&table, "name", &table.find(text).unwrap());
    assert_eq!(names("WHERE h = 0"), vec!["neg"]);
    assert_eq!(names("WHERE h = -0.0"), vec!["neg"]);
    assert_eq!(names("WHERE h >= 0"), vec!["neg", "one"]);
    assert!(names("WHERE h > 1").is_empty());
    assert!(names("WHERE h < 0").is_empty());
}

#[test]
fn test_long_clauses_resolve_or_reject() {
    let mut table = heights();
    table.insert(&["h", "name"], &["1", "x"]).unwrap();

    let clause = |count: usize| {
        let mut text = String::from("WHERE h=1");
        for _ in 1..count {
            text.push_str(" AND h>=0");
        }
        text
    };

    let rows = table.find(&clause(MAX_CLAUSE_DEPTH)).unwrap();
    assert_eq!(rows.len(), 1);

    let err = table.find(&clause(5_000)).unwrap_err();
    assert_eq!(err.code().code(), "HALO_BAD_SQL_STATEMENT");
}
