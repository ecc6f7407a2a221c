//! Company types for Store
//!
//! Includes Company, NewCompany, CompanyFilter and the fields a company
//! update may carry.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::job::Job;
use crate::sql::clause::FilterSpec;
use crate::sql::mapper::{Field, RenameTable};
use crate::types::ScalarKind;

/// Renames from external company field names to columns
pub const COMPANY_RENAMES: RenameTable =
    RenameTable::new(&[("numEmployees", "num_employees"), ("logoUrl", "logo_url")]);

/// Columns selected and returned for a company, in [`Company`] field order
pub(crate) const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// A company row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company together with its jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyWithJobs {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<Job>,
}

/// Request to create a company
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl NewCompany {
    pub fn new(
        handle: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            handle: handle.into(),
            name: name.into(),
            description: description.into(),
            num_employees: None,
            logo_url: None,
        }
    }

    pub fn with_num_employees(mut self, num_employees: i32) -> Self {
        self.num_employees = Some(num_employees);
        self
    }

    pub fn with_logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self
    }
}

/// Fields a company update may set
///
/// The handle is the company's key and cannot be changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompanyField {
    Name,
    Description,
    NumEmployees,
    LogoUrl,
}

impl Field for CompanyField {
    const ALL: &'static [Self] = &[
        CompanyField::Name,
        CompanyField::Description,
        CompanyField::NumEmployees,
        CompanyField::LogoUrl,
    ];

    fn name(self) -> &'static str {
        match self {
            CompanyField::Name => "name",
            CompanyField::Description => "description",
            CompanyField::NumEmployees => "numEmployees",
            CompanyField::LogoUrl => "logoUrl",
        }
    }

    fn kind(self) -> ScalarKind {
        match self {
            CompanyField::NumEmployees => ScalarKind::Integer,
            _ => ScalarKind::Text,
        }
    }
}

/// Optional filters for listing companies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyFilter {
    /// Case-insensitive substring of the company name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_like: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_employees: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name_like(mut self, text: impl Into<String>) -> Self {
        self.name_like = Some(text.into());
        self
    }

    pub fn min_employees(mut self, min: i32) -> Self {
        self.min_employees = Some(min);
        self
    }

    pub fn max_employees(mut self, max: i32) -> Self {
        self.max_employees = Some(max);
        self
    }

    /// Resolve the set filters into column filters, in a fixed order
    ///
    /// # Errors
    /// [`StoreError::Validation`] when `minEmployees` exceeds `maxEmployees`.
    pub fn to_filter_specs(&self) -> Result<Vec<FilterSpec>> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(StoreError::validation(format!(
                    "minEmployees ({}) cannot be greater than maxEmployees ({})",
                    min, max
                )));
            }
        }

        let employees = COMPANY_RENAMES.column_for("numEmployees");
        let mut specs = Vec::new();

        if let Some(text) = &self.name_like {
            specs.push(FilterSpec::contains("name", text));
        }
        if let Some(min) = self.min_employees {
            specs.push(FilterSpec::gte(employees, min));
        }
        if let Some(max) = self.max_employees {
            specs.push(FilterSpec::lte(employees, max));
        }

        Ok(specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::clause::build_filter_clause;
    use crate::types::SqlValue;
    use serde_json::json;

    #[test]
    fn test_company_field_names_resolve() {
        let columns: Vec<&str> = CompanyField::ALL
            .iter()
            .map(|f| COMPANY_RENAMES.column_for(f.name()))
            .collect();
        assert_eq!(
            columns,
            vec!["name", "description", "num_employees", "logo_url"]
        );
    }

    #[test]
    fn test_company_field_from_key() {
        assert_eq!(
            CompanyField::from_key("numEmployees"),
            Some(CompanyField::NumEmployees)
        );
        assert_eq!(CompanyField::from_key("num_employees"), None);
        assert_eq!(CompanyField::from_key("handle"), None);
    }

    #[test]
    fn test_company_serializes_camel_case() {
        let company = Company {
            handle: "c1".to_string(),
            name: "C1".to_string(),
            description: "Desc1".to_string(),
            num_employees: Some(1),
            logo_url: None,
        };
        assert_eq!(
            serde_json::to_value(&company).unwrap(),
            json!({
                "handle": "c1",
                "name": "C1",
                "description": "Desc1",
                "numEmployees": 1,
                "logoUrl": null
            })
        );
    }

    #[test]
    fn test_new_company_rejects_unknown_fields() {
        let result: std::result::Result<NewCompany, _> = serde_json::from_value(json!({
            "handle": "new",
            "name": "New",
            "description": "New Description",
            "ceo": "someone"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_company_optional_fields() {
        let company: NewCompany = serde_json::from_value(json!({
            "handle": "new",
            "name": "New",
            "description": "New Description",
            "numEmployees": 10
        }))
        .unwrap();
        assert_eq!(company.num_employees, Some(10));
        assert!(company.logo_url.is_none());
    }

    #[test]
    fn test_empty_filter() {
        let specs = CompanyFilter::new().to_filter_specs().unwrap();
        assert!(specs.is_empty());
        assert!(build_filter_clause(&specs).is_empty());
    }

    #[test]
    fn test_all_filters() {
        let specs = CompanyFilter::new()
            .name_like("net")
            .min_employees(10)
            .max_employees(300)
            .to_filter_specs()
            .unwrap();
        let fragment = build_filter_clause(&specs);

        assert_eq!(
            fragment.sql(),
            "name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
        );
        assert_eq!(
            fragment.values(),
            &[SqlValue::from("%net%"), SqlValue::Int(10), SqlValue::Int(300)]
        );
    }

    #[test]
    fn test_min_greater_than_max() {
        let result = CompanyFilter::new()
            .min_employees(500)
            .max_employees(10)
            .to_filter_specs();
        assert!(matches!(result, Err(StoreError::Validation(_))));
    }

    #[test]
    fn test_min_equal_max_is_allowed() {
        let specs = CompanyFilter::new()
            .min_employees(3)
            .max_employees(3)
            .to_filter_specs()
            .unwrap();
        assert_eq!(specs.len(), 2);
    }

    #[test]
    fn test_filter_deserializes_camel_case() {
        let filter: CompanyFilter =
            serde_json::from_value(json!({"nameLike": "c", "maxEmployees": 2})).unwrap();
        assert_eq!(filter, CompanyFilter::new().name_like("c").max_employees(2));

        let bad: std::result::Result<CompanyFilter, _> =
            serde_json::from_value(json!({"handle": "c1"}));
        assert!(bad.is_err());
    }
}
