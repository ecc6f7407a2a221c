//! Clause construction through the public API
//!
//! These tests need no database.

use jobly_store::{
    COMPANY_RENAMES, CompanyField, Field, FieldSet, FilterOperator, FilterSpec, JOB_RENAMES,
    JobField, JobFilter, RenameTable, ScalarKind, SqlValue, StoreError, build_filter_clause,
    build_set_clause,
};
use serde_json::json;

/// Placeholder numbers in the order they appear in `sql`
fn placeholders(sql: &str) -> Vec<usize> {
    sql.split('$')
        .skip(1)
        .map(|rest| {
            let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().expect("placeholder number")
        })
        .collect()
}

// ==================== SET-list ====================

#[test]
fn test_partial_update_example() {
    let fields = FieldSet::<CompanyField>::from_json(&json!({
        "name": "new name",
        "description": "new description",
        "numEmployees": 1
    }))
    .unwrap();

    let fragment = build_set_clause(fields, &COMPANY_RENAMES).unwrap();

    assert_eq!(
        fragment.sql(),
        "\"name\"=$1, \"description\"=$2, \"num_employees\"=$3"
    );
    assert_eq!(
        serde_json::to_value(fragment.values()).unwrap(),
        json!(["new name", "new description", 1])
    );
}

#[test]
fn test_empty_update_is_rejected() {
    let err = build_set_clause(FieldSet::<JobField>::new(), &JOB_RENAMES).unwrap_err();

    assert!(matches!(err, StoreError::EmptyInput(_)));
    assert!(err.is_client_error());
}

#[test]
fn test_set_values_match_field_count() {
    for n in 1..=CompanyField::ALL.len() {
        let fields: FieldSet<CompanyField> = CompanyField::ALL[..n]
            .iter()
            .map(|&field| (field, SqlValue::Null(ScalarKind::Text)))
            .collect();

        let fragment = build_set_clause(fields, &COMPANY_RENAMES).unwrap();
        assert_eq!(fragment.values().len(), n);
        assert_eq!(placeholders(fragment.sql()), (1..=n).collect::<Vec<_>>());
    }
}

#[test]
fn test_rename_table_only_touches_listed_fields() {
    let fields = FieldSet::new()
        .with(JobField::Title, "Engineer")
        .with(JobField::Equity, SqlValue::Null(ScalarKind::Numeric));

    let renamed = build_set_clause(fields.clone(), &RenameTable::new(&[("title", "job_title")]))
        .unwrap();
    let unchanged = build_set_clause(fields, &RenameTable::identity()).unwrap();

    assert_eq!(renamed.sql(), "\"job_title\"=$1, \"equity\"=$2");
    assert_eq!(unchanged.sql(), "\"title\"=$1, \"equity\"=$2");
}

// ==================== WHERE-list ====================

#[test]
fn test_title_and_salary_filters() {
    let filters = [
        FilterSpec::new(
            "title",
            FilterOperator::PatternMatch,
            Some(SqlValue::from("%engineer%")),
        )
        .unwrap(),
        FilterSpec::new(
            "salary",
            FilterOperator::GreaterOrEqual,
            Some(SqlValue::from(50000)),
        )
        .unwrap(),
    ];

    let fragment = build_filter_clause(&filters);

    assert_eq!(fragment.sql(), "title ILIKE $1 AND salary >= $2");
    assert_eq!(
        serde_json::to_value(fragment.values()).unwrap(),
        json!(["%engineer%", 50000])
    );
}

#[test]
fn test_equity_predicate_alone() {
    let fragment = build_filter_clause(&[FilterSpec::positive("equity")]);

    assert_eq!(fragment.sql(), "equity > 0");
    assert!(fragment.values().is_empty());
    assert!(!fragment.sql().contains('$'));
}

#[test]
fn test_no_filters_means_no_condition() {
    let fragment = build_filter_clause(&[]);

    assert!(fragment.is_empty());
    assert!(fragment.values().is_empty());
}

#[test]
fn test_job_filter_end_to_end() {
    let filter: JobFilter = serde_json::from_value(json!({
        "title": "net",
        "hasEquity": true,
        "minSalary": 1000
    }))
    .unwrap();

    let fragment = build_filter_clause(&filter.to_filter_specs());

    assert_eq!(
        fragment.sql(),
        "title ILIKE $1 AND salary >= $2 AND equity > 0"
    );
    assert_eq!(placeholders(fragment.sql()), vec![1, 2]);
    assert_eq!(fragment.values().len(), 2);
}
