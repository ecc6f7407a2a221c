//! Store - entry point for company and job data access
//!
//! Every statement with a variable shape is assembled from clause fragments:
//! fragment text goes into the statement, fragment values are bound as
//! parameters in placeholder order.

use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use crate::company::{
    COMPANY_COLUMNS, COMPANY_RENAMES, Company, CompanyField, CompanyFilter, CompanyWithJobs,
    NewCompany,
};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::job::{JOB_COLUMNS, JOB_RENAMES, Job, JobField, JobFilter, NewJob};
use crate::sql::clause::{ClauseFragment, FieldSet, build_filter_clause, build_set_clause};
use crate::sql::ddl::DdlGenerator;
use crate::sql::sanitize::quote_identifier;
use crate::types::{ScalarKind, SqlValue};

type PgQuery<'q> = Query<'q, Postgres, PgArguments>;

/// PostgreSQL-backed store for companies and jobs
pub struct Store {
    /// Database connection pool
    pool: PgPool,
    /// Store configuration
    config: StoreConfig,
}

impl Store {
    /// Create a new Store from configuration
    ///
    /// This will:
    /// 1. Validate the configuration
    /// 2. Connect to the database
    /// 3. Create the tables if `create_tables` is enabled
    pub async fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .map_err(|e| StoreError::Connection(format!("Database connection failed: {}", e)))?;

        Self::from_pool(pool, config).await
    }

    /// Create a new Store from an existing pool
    pub async fn from_pool(pool: PgPool, config: StoreConfig) -> Result<Self> {
        config.validate()?;

        let store = Self { pool, config };
        if store.config.create_tables {
            store.ensure_tables().await?;
        }
        Ok(store)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Create the companies and jobs tables if they do not exist
    pub async fn ensure_tables(&self) -> Result<()> {
        let ddl = DdlGenerator::new(&self.config);
        for statement in ddl.generate_schema() {
            sqlx::query(&statement).execute(&self.pool).await?;
        }

        tracing::info!(
            companies = %self.config.companies_table,
            jobs = %self.config.jobs_table,
            "tables ready"
        );
        Ok(())
    }

    fn companies_table(&self) -> String {
        quote_identifier(&self.config.companies_table)
    }

    fn jobs_table(&self) -> String {
        quote_identifier(&self.config.jobs_table)
    }

    // =========================================================================
    // Company Operations
    // =========================================================================

    /// Create a company
    ///
    /// Fails with [`StoreError::Conflict`] if the handle is already taken.
    pub async fn create_company(&self, company: NewCompany) -> Result<Company> {
        let exists_sql = format!(
            "SELECT handle FROM {} WHERE handle = $1",
            self.companies_table()
        );
        let duplicate = sqlx::query(&exists_sql)
            .bind(&company.handle)
            .fetch_optional(&self.pool)
            .await?;

        if duplicate.is_some() {
            return Err(StoreError::conflict(format!(
                "Duplicate company: {}",
                company.handle
            )));
        }

        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            self.companies_table(),
            COMPANY_COLUMNS,
            COMPANY_COLUMNS
        );
        tracing::debug!(sql = %insert_sql, params = 5, "create company");

        let row = sqlx::query(&insert_sql)
            .bind(&company.handle)
            .bind(&company.name)
            .bind(&company.description)
            .bind(company.num_employees)
            .bind(&company.logo_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from_constraint(e, &company.handle))?;

        row_to_company(&row)
    }

    /// List companies matching the filter, ordered by name
    pub async fn list_companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>> {
        let fragment = build_filter_clause(&filter.to_filter_specs()?);

        let mut select_sql = format!(
            "SELECT {} FROM {}",
            COMPANY_COLUMNS,
            self.companies_table()
        );
        push_where(&mut select_sql, &fragment);
        select_sql.push_str(" ORDER BY name");
        tracing::debug!(sql = %select_sql, params = fragment.values().len(), "list companies");

        let rows = bind_values(sqlx::query(&select_sql), fragment.values())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_company).collect()
    }

    /// Get a company and its jobs
    pub async fn get_company(&self, handle: &str) -> Result<CompanyWithJobs> {
        let select_sql = format!(
            "SELECT {} FROM {} WHERE handle = $1",
            COMPANY_COLUMNS,
            self.companies_table()
        );
        let row = sqlx::query(&select_sql)
            .bind(handle)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("No company: {}", handle)))?;
        let company = row_to_company(&row)?;

        let jobs_sql = format!(
            "SELECT {} FROM {} WHERE company_handle = $1 ORDER BY id",
            JOB_COLUMNS,
            self.jobs_table()
        );
        let jobs = sqlx::query(&jobs_sql)
            .bind(handle)
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(row_to_job)
            .collect::<Result<Vec<_>>>()?;

        Ok(CompanyWithJobs { company, jobs })
    }

    /// Partially update a company
    ///
    /// Only the fields present in `fields` change. Fails with
    /// [`StoreError::EmptyInput`] before touching the database when `fields`
    /// is empty.
    pub async fn update_company(
        &self,
        handle: &str,
        fields: FieldSet<CompanyField>,
    ) -> Result<Company> {
        let set = build_set_clause(fields, &COMPANY_RENAMES)?;

        let update_sql = format!(
            "UPDATE {} SET {} WHERE handle = ${} RETURNING {}",
            self.companies_table(),
            set.sql(),
            set.next_placeholder(),
            COMPANY_COLUMNS
        );
        tracing::debug!(sql = %update_sql, params = set.next_placeholder(), "update company");

        let row = bind_values(sqlx::query(&update_sql), set.values())
            .bind(handle)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_constraint(e, handle))?
            .ok_or_else(|| StoreError::not_found(format!("No company: {}", handle)))?;

        row_to_company(&row)
    }

    /// Delete a company and, through the foreign key, its jobs
    pub async fn remove_company(&self, handle: &str) -> Result<()> {
        let delete_sql = format!(
            "DELETE FROM {} WHERE handle = $1",
            self.companies_table()
        );
        let result = sqlx::query(&delete_sql)
            .bind(handle)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("No company: {}", handle)));
        }

        Ok(())
    }

    // =========================================================================
    // Job Operations
    // =========================================================================

    /// Create a job
    ///
    /// Fails with [`StoreError::Validation`] if the company does not exist.
    pub async fn create_job(&self, job: NewJob) -> Result<Job> {
        let insert_sql = format!(
            "INSERT INTO {} (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            self.jobs_table(),
            JOB_COLUMNS
        );
        tracing::debug!(sql = %insert_sql, params = 4, "create job");

        let row = sqlx::query(&insert_sql)
            .bind(&job.title)
            .bind(job.salary)
            .bind(job.equity)
            .bind(&job.company_handle)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::from_constraint(e, &job.company_handle))?;

        row_to_job(&row)
    }

    /// List jobs matching the filter, ordered by title
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>> {
        let fragment = build_filter_clause(&filter.to_filter_specs());

        let mut select_sql = format!("SELECT {} FROM {}", JOB_COLUMNS, self.jobs_table());
        push_where(&mut select_sql, &fragment);
        select_sql.push_str(" ORDER BY title, id");
        tracing::debug!(sql = %select_sql, params = fragment.values().len(), "list jobs");

        let rows = bind_values(sqlx::query(&select_sql), fragment.values())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_job).collect()
    }

    pub async fn get_job(&self, id: i32) -> Result<Job> {
        let select_sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            JOB_COLUMNS,
            self.jobs_table()
        );
        let row = sqlx::query(&select_sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::not_found(format!("No job: {}", id)))?;

        row_to_job(&row)
    }

    /// Partially update a job
    ///
    /// Only the fields present in `fields` change. Fails with
    /// [`StoreError::EmptyInput`] before touching the database when `fields`
    /// is empty.
    pub async fn update_job(&self, id: i32, fields: FieldSet<JobField>) -> Result<Job> {
        let set = build_set_clause(fields, &JOB_RENAMES)?;

        let update_sql = format!(
            "UPDATE {} SET {} WHERE id = ${} RETURNING {}",
            self.jobs_table(),
            set.sql(),
            set.next_placeholder(),
            JOB_COLUMNS
        );
        tracing::debug!(sql = %update_sql, params = set.next_placeholder(), "update job");

        let row = bind_values(sqlx::query(&update_sql), set.values())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::from_constraint(e, &id.to_string()))?
            .ok_or_else(|| StoreError::not_found(format!("No job: {}", id)))?;

        row_to_job(&row)
    }

    pub async fn remove_job(&self, id: i32) -> Result<()> {
        let delete_sql = format!("DELETE FROM {} WHERE id = $1", self.jobs_table());
        let result = sqlx::query(&delete_sql)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found(format!("No job: {}", id)));
        }

        Ok(())
    }
}

// =============================================================================
// Internal Helpers
// =============================================================================

/// Append ` WHERE <fragment>` unless the fragment is empty
fn push_where(sql: &mut String, fragment: &ClauseFragment) {
    if !fragment.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(fragment.sql());
    }
}

/// Bind fragment values in placeholder order
fn bind_values<'q>(mut query: PgQuery<'q>, values: &'q [SqlValue]) -> PgQuery<'q> {
    for value in values {
        query = bind_value(query, value);
    }
    query
}

fn bind_value<'q>(query: PgQuery<'q>, value: &'q SqlValue) -> PgQuery<'q> {
    match value {
        SqlValue::Null(kind) => match kind {
            ScalarKind::Text => query.bind(None::<String>),
            ScalarKind::Integer => query.bind(None::<i64>),
            ScalarKind::Float => query.bind(None::<f64>),
            ScalarKind::Numeric => query.bind(None::<Decimal>),
            ScalarKind::Boolean => query.bind(None::<bool>),
        },
        SqlValue::Bool(b) => query.bind(*b),
        SqlValue::Int(i) => query.bind(*i),
        SqlValue::Float(f) => query.bind(*f),
        SqlValue::Decimal(d) => query.bind(*d),
        SqlValue::Text(s) => query.bind(s.as_str()),
    }
}

fn row_to_company(row: &PgRow) -> Result<Company> {
    Ok(Company {
        handle: row.try_get("handle")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        num_employees: row.try_get("num_employees")?,
        logo_url: row.try_get("logo_url")?,
    })
}

fn row_to_job(row: &PgRow) -> Result<Job> {
    Ok(Job {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        salary: row.try_get("salary")?,
        equity: row.try_get("equity")?,
        company_handle: row.try_get("company_handle")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::clause::FilterSpec;

    #[test]
    fn test_push_where_skips_empty_fragment() {
        let mut sql = "SELECT id FROM jobs".to_string();
        push_where(&mut sql, &build_filter_clause(&[]));
        assert_eq!(sql, "SELECT id FROM jobs");
    }

    #[test]
    fn test_push_where_appends_conditions() {
        let mut sql = "SELECT id FROM jobs".to_string();
        let fragment = build_filter_clause(&[FilterSpec::positive("equity")]);
        push_where(&mut sql, &fragment);
        assert_eq!(sql, "SELECT id FROM jobs WHERE equity > 0");
    }
}
