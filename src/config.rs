//! Configuration for Store
//!
//! Provides a builder pattern for configuring the store, plus loading from
//! the process environment.

use crate::error::{Result, StoreError};
use crate::sql::sanitize::validate_identifier;

/// Database used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/jobly";

/// Configuration for the store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// PostgreSQL database URL
    pub database_url: String,
    /// Name of the companies table (default: "companies")
    pub companies_table: String,
    /// Name of the jobs table (default: "jobs")
    pub jobs_table: String,
    /// Maximum number of pooled connections (default: 5)
    pub max_connections: u32,
    /// Whether to create missing tables on startup (default: true)
    pub create_tables: bool,
}

impl StoreConfig {
    /// Create a new configuration builder
    pub fn builder(database_url: impl Into<String>) -> StoreConfigBuilder {
        StoreConfigBuilder::new(database_url)
    }

    /// Create a builder from the environment
    ///
    /// Reads `DATABASE_URL` (default [`DEFAULT_DATABASE_URL`]) and the optional
    /// `JOBLY_MAX_CONNECTIONS`.
    pub fn from_env() -> Result<StoreConfigBuilder> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<StoreConfigBuilder> {
        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let mut builder = StoreConfigBuilder::new(database_url);

        if let Some(raw) = lookup("JOBLY_MAX_CONNECTIONS") {
            let max = raw.trim().parse::<u32>().map_err(|_| {
                StoreError::validation(format!(
                    "JOBLY_MAX_CONNECTIONS must be a positive integer, got '{}'",
                    raw
                ))
            })?;
            builder = builder.max_connections(max);
        }

        Ok(builder)
    }

    /// Check the table names and pool size
    ///
    /// Table names are interpolated into statements, so they must pass
    /// [`validate_identifier`].
    pub fn validate(&self) -> Result<()> {
        for table in [&self.companies_table, &self.jobs_table] {
            validate_identifier(table).map_err(StoreError::validation)?;
        }

        if self.companies_table == self.jobs_table {
            return Err(StoreError::validation(format!(
                "Companies and jobs cannot share table '{}'",
                self.jobs_table
            )));
        }

        if self.max_connections == 0 {
            return Err(StoreError::validation(
                "max_connections must be at least 1",
            ));
        }

        Ok(())
    }
}

/// Builder for StoreConfig
#[derive(Debug)]
pub struct StoreConfigBuilder {
    database_url: String,
    companies_table: String,
    jobs_table: String,
    max_connections: u32,
    create_tables: bool,
}

impl StoreConfigBuilder {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            companies_table: "companies".to_string(),
            jobs_table: "jobs".to_string(),
            max_connections: 5,
            create_tables: true,
        }
    }

    /// Set the companies table name (default: "companies")
    pub fn companies_table(mut self, name: impl Into<String>) -> Self {
        self.companies_table = name.into();
        self
    }

    /// Set the jobs table name (default: "jobs")
    pub fn jobs_table(mut self, name: impl Into<String>) -> Self {
        self.jobs_table = name.into();
        self
    }

    /// Prefix both table names, e.g. `test_` gives `test_companies` and `test_jobs`
    pub fn table_prefix(mut self, prefix: &str) -> Self {
        self.companies_table = format!("{}companies", prefix);
        self.jobs_table = format!("{}jobs", prefix);
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Enable or disable table creation on startup (default: true)
    pub fn create_tables(mut self, enabled: bool) -> Self {
        self.create_tables = enabled;
        self
    }

    pub fn build(self) -> StoreConfig {
        StoreConfig {
            database_url: self.database_url,
            companies_table: self.companies_table,
            jobs_table: self.jobs_table,
            max_connections: self.max_connections,
            create_tables: self.create_tables,
        }
    }
}
