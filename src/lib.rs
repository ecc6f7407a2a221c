//! # jobly-store
//!
//! PostgreSQL data access for the Jobly job board: companies and the jobs
//! they post.
//!
//! The interesting part is dynamic clause construction. Partial updates and
//! optional filters arrive as arbitrary subsets of an entity's fields; they
//! are turned into SQL fragments with `$1, $2, ...` placeholders and a value
//! list in the same order:
//!
//! - [`build_set_clause`] renders the SET-list of a partial update and
//!   rejects an empty field set with [`StoreError::EmptyInput`].
//! - [`build_filter_clause`] renders the WHERE-list of a filtered read; an
//!   empty filter list yields an empty fragment and means "match everything".
//!
//! Field names become column names through a per-entity [`RenameTable`]
//! (`numEmployees` -> `num_employees`), with unlisted fields kept as-is.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jobly_store::{CompanyField, FieldSet, JobFilter, NewCompany, Store, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoreConfig::from_env()?.build();
//!     let store = Store::new(config).await?;
//!
//!     store
//!         .create_company(
//!             NewCompany::new("acme", "Acme", "Makes everything").with_num_employees(40),
//!         )
//!         .await?;
//!
//!     // PATCH body, decoded in key order
//!     let fields = FieldSet::<CompanyField>::from_json(&serde_json::json!({
//!         "numEmployees": 42,
//!         "logoUrl": "https://acme.test/logo.png"
//!     }))?;
//!     let company = store.update_company("acme", fields).await?;
//!     assert_eq!(company.num_employees, Some(42));
//!
//!     let jobs = store
//!         .list_jobs(&JobFilter::new().title("engineer").has_equity(true))
//!         .await?;
//!     println!("{} matching jobs", jobs.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use jobly_store::StoreConfig;
//!
//! let config = StoreConfig::builder("postgres://localhost/jobly")
//!     .companies_table("companies") // default
//!     .jobs_table("jobs")           // default
//!     .max_connections(10)
//!     .create_tables(false)
//!     .build();
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Logging
//!
//! Statements are reported through `tracing` at debug level (SQL text and
//! parameter count, never values). Install a subscriber to see them.

pub mod company;
pub mod config;
pub mod error;
pub mod job;
pub mod sql;
pub mod store;
pub mod types;

pub use company::{
    COMPANY_RENAMES, Company, CompanyField, CompanyFilter, CompanyWithJobs, NewCompany,
};
pub use config::{StoreConfig, StoreConfigBuilder};
pub use error::{Result, StoreError};
pub use job::{JOB_RENAMES, Job, JobField, JobFilter, NewJob};
pub use sql::clause::{
    ClauseFragment, FieldSet, FilterOperator, FilterSpec, build_filter_clause, build_set_clause,
};
pub use sql::mapper::{Field, RenameTable};
pub use store::Store;
pub use types::{ScalarKind, SqlValue};
