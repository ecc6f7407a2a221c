//! Job types for Store
//!
//! Includes Job, NewJob, JobFilter and the fields a job update may carry.
//! Jobs are identified by their numeric `id` for lookup, update and removal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sql::clause::FilterSpec;
use crate::sql::mapper::{Field, RenameTable};
use crate::types::ScalarKind;

/// Renames from external job field names to columns
pub const JOB_RENAMES: RenameTable = RenameTable::new(&[("companyHandle", "company_handle")]);

/// Columns selected and returned for a job, in [`Job`] field order
pub(crate) const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// A job row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Request to create a job
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn new(title: impl Into<String>, company_handle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            salary: None,
            equity: None,
            company_handle: company_handle.into(),
        }
    }

    pub fn with_salary(mut self, salary: i32) -> Self {
        self.salary = Some(salary);
        self
    }

    pub fn with_equity(mut self, equity: Decimal) -> Self {
        self.equity = Some(equity);
        self
    }
}

/// Fields a job update may set
///
/// Neither the id nor the owning company can be changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobField {
    Title,
    Salary,
    Equity,
}

impl Field for JobField {
    const ALL: &'static [Self] = &[JobField::Title, JobField::Salary, JobField::Equity];

    fn name(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Salary => "salary",
            JobField::Equity => "equity",
        }
    }

    fn kind(self) -> ScalarKind {
        match self {
            JobField::Title => ScalarKind::Text,
            JobField::Salary => ScalarKind::Integer,
            JobField::Equity => ScalarKind::Numeric,
        }
    }
}

/// Optional filters for listing jobs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    /// Case-insensitive substring of the title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_salary: Option<i32>,
    /// Only `true` filters; `false` and absent both match every job
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_equity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_handle: Option<String>,
}

impl JobFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.title = Some(text.into());
        self
    }

    pub fn min_salary(mut self, min: i32) -> Self {
        self.min_salary = Some(min);
        self
    }

    pub fn has_equity(mut self, has_equity: bool) -> Self {
        self.has_equity = Some(has_equity);
        self
    }

    pub fn company_handle(mut self, handle: impl Into<String>) -> Self {
        self.company_handle = Some(handle.into());
        self
    }

    /// Resolve the set filters into column filters, in a fixed order
    pub fn to_filter_specs(&self) -> Vec<FilterSpec> {
        let mut specs = Vec::new();

        if let Some(text) = &self.title {
            specs.push(FilterSpec::contains("title", text));
        }
        if let Some(min) = self.min_salary {
            specs.push(FilterSpec::gte("salary", min));
        }
        if self.has_equity == Some(true) {
            specs.push(FilterSpec::positive("equity"));
        }
        if let Some(handle) = &self.company_handle {
            specs.push(FilterSpec::eq(
                JOB_RENAMES.column_for("companyHandle"),
                handle.as_str(),
            ));
        }

        specs
    }
}
