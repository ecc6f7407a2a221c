//! SQL utilities for Store
//!
//! Provides clause construction, field-to-column mapping, DDL generation and
//! identifier sanitization.

pub mod clause;
pub mod ddl;
pub mod mapper;
pub mod sanitize;

pub use clause::{
    ClauseFragment, FieldSet, FilterOperator, FilterSpec, build_filter_clause, build_set_clause,
};
pub use ddl::DdlGenerator;
pub use mapper::{Field, RenameTable};
pub use sanitize::{POSTGRES_RESERVED_WORDS, quote_identifier, validate_identifier};
