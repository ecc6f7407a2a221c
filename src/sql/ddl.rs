//! DDL generation for the company and job tables

use crate::config::StoreConfig;
use crate::sql::sanitize::quote_identifier;

/// Generates the `CREATE` and `DROP` statements for the configured tables
pub struct DdlGenerator<'a> {
    config: &'a StoreConfig,
}

impl<'a> DdlGenerator<'a> {
    pub fn new(config: &'a StoreConfig) -> Self {
        Self { config }
    }

    /// `CREATE TABLE IF NOT EXISTS` for companies
    pub fn generate_create_companies(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\
             handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)), \
             name TEXT UNIQUE NOT NULL, \
             num_employees INTEGER CHECK (num_employees >= 0), \
             description TEXT NOT NULL, \
             logo_url TEXT)",
            quote_identifier(&self.config.companies_table)
        )
    }

    /// `CREATE TABLE IF NOT EXISTS` for jobs
    ///
    /// Jobs reference their company and are removed with it.
    pub fn generate_create_jobs(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\
             id SERIAL PRIMARY KEY, \
             title TEXT NOT NULL, \
             salary INTEGER CHECK (salary >= 0), \
             equity NUMERIC CHECK (equity <= 1.0), \
             company_handle VARCHAR(25) NOT NULL REFERENCES {} ON DELETE CASCADE)",
            quote_identifier(&self.config.jobs_table),
            quote_identifier(&self.config.companies_table)
        )
    }

    /// Index backing the company detail lookup of jobs
    pub fn generate_company_handle_index(&self) -> String {
        let index_name = format!("{}_company_handle_idx", self.config.jobs_table);
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} (company_handle)",
            quote_identifier(&index_name),
            quote_identifier(&self.config.jobs_table)
        )
    }

    /// Statements creating every table, in dependency order
    pub fn generate_schema(&self) -> Vec<String> {
        vec![
            self.generate_create_companies(),
            self.generate_create_jobs(),
            self.generate_company_handle_index(),
        ]
    }

    pub fn generate_drop_table(&self, table_name: &str) -> String {
        format!(
            "DROP TABLE IF EXISTS {} CASCADE",
            quote_identifier(table_name)
        )
    }
}
