//! Dynamic SET and WHERE clause construction
//!
//! Turns a partial update payload or an optional filter set into a SQL
//! fragment with `$n` placeholders plus the values to bind, in placeholder
//! order. Column names come only from code-defined fields and rename
//! tables; values are always bound, never interpolated.

use crate::error::{Result, StoreError};
use crate::sql::mapper::{Field, RenameTable};
use crate::types::SqlValue;

// ============================================================================
// Clause Fragments
// ============================================================================

/// A SQL text snippet paired with its bound values
///
/// `values()[k - 1]` is the value for placeholder `$k`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClauseFragment {
    sql: String,
    values: Vec<SqlValue>,
}

impl ClauseFragment {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    pub fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.values)
    }

    /// True when no condition or assignment was produced
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Number of the next free placeholder
    ///
    /// Statement assembly uses this to append its own parameters after the
    /// fragment's, e.g. the key in `UPDATE ... SET <fragment> WHERE id = $n`.
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Hands out `$1, $2, ...` in the order values are pushed
#[derive(Debug, Default)]
struct Placeholders {
    values: Vec<SqlValue>,
}

impl Placeholders {
    fn bind(&mut self, value: SqlValue) -> String {
        self.values.push(value);
        format!("${}", self.values.len())
    }

    fn finish(self, tokens: Vec<String>, separator: &str) -> ClauseFragment {
        ClauseFragment {
            sql: tokens.join(separator),
            values: self.values,
        }
    }
}

// ============================================================================
// Field Sets (SET-list input)
// ============================================================================

/// Ordered field/value pairs supplied for a partial update
///
/// Order is significant: it decides placeholder numbering.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet<F> {
    entries: Vec<(F, SqlValue)>,
}

impl<F: Field> FieldSet<F> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set a field, keeping its original position if it is already present
    pub fn insert(&mut self, field: F, value: impl Into<SqlValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Builder form of [`FieldSet::insert`]
    pub fn with(mut self, field: F, value: impl Into<SqlValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Decode a JSON object payload, preserving its key order
    ///
    /// Every key must name a field of `F` and every value must fit that
    /// field's column kind.
    pub fn from_json(payload: &serde_json::Value) -> Result<Self> {
        let object = payload
            .as_object()
            .ok_or_else(|| StoreError::validation("Update payload must be a JSON object"))?;

        let mut fields = Self::new();
        for (key, value) in object {
            let field = F::from_key(key).ok_or_else(|| {
                StoreError::validation(format!("Field '{}' cannot be updated", key))
            })?;
            let value = SqlValue::from_json(value, field.kind()).map_err(|e| {
                StoreError::validation(format!("Invalid value for field '{}': {}", key, e))
            })?;
            fields.insert(field, value);
        }

        Ok(fields)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, field: F) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &SqlValue)> {
        self.entries.iter().map(|(field, value)| (*field, value))
    }
}

impl<F: Field> Default for FieldSet<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Field, V: Into<SqlValue>> FromIterator<(F, V)> for FieldSet<F> {
    fn from_iter<I: IntoIterator<Item = (F, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (field, value) in iter {
            fields.insert(field, value);
        }
        fields
    }
}

/// Build the SET-list of a partial update
///
/// Produces `"<column>"=$1, "<column>"=$2, ...` in field order, with each
/// field's column resolved through `renames`.
///
/// # Errors
/// [`StoreError::EmptyInput`] when `fields` is empty.
///
/// # Example
/// ```
/// use jobly_store::{build_set_clause, CompanyField, FieldSet, COMPANY_RENAMES};
///
/// let fields = FieldSet::new()
///     .with(CompanyField::Name, "new name")
///     .with(CompanyField::NumEmployees, 1);
/// let fragment = build_set_clause(fields, &COMPANY_RENAMES).unwrap();
/// assert_eq!(fragment.sql(), "\"name\"=$1, \"num_employees\"=$2");
/// ```
pub fn build_set_clause<F: Field>(
    fields: FieldSet<F>,
    renames: &RenameTable,
) -> Result<ClauseFragment> {
    if fields.is_empty() {
        return Err(StoreError::empty_input("no fields to update"));
    }

    let mut placeholders = Placeholders::default();
    let tokens: Vec<String> = fields
        .entries
        .into_iter()
        .map(|(field, value)| {
            let column = renames.column_for(field.name());
            format!("\"{}\"={}", column, placeholders.bind(value))
        })
        .collect();

    Ok(placeholders.finish(tokens, ", "))
}

// ============================================================================
// Filters (WHERE-list input)
// ============================================================================

/// Comparison applied by a single filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// `column = $n`
    Equality,
    /// `column ILIKE $n`; the pattern is bound as given
    PatternMatch,
    /// `column >= $n`
    GreaterOrEqual,
    /// `column <= $n`
    LessOrEqual,
    /// `column > 0`, takes no operand
    PositiveBoolean,
}

impl FilterOperator {
    fn takes_operand(self) -> bool {
        !matches!(self, FilterOperator::PositiveBoolean)
    }

    fn as_sql(self) -> &'static str {
        match self {
            FilterOperator::Equality => "=",
            FilterOperator::PatternMatch => "ILIKE",
            FilterOperator::GreaterOrEqual => ">=",
            FilterOperator::LessOrEqual => "<=",
            FilterOperator::PositiveBoolean => "> 0",
        }
    }
}

/// One already-resolved filter: storage column, operator and operand
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    column: &'static str,
    operator: FilterOperator,
    operand: Option<SqlValue>,
}

impl FilterSpec {
    /// Create a filter, checking the operand against the operator
    ///
    /// Only [`FilterOperator::PositiveBoolean`] may (and must) omit the operand.
    pub fn new(
        column: &'static str,
        operator: FilterOperator,
        operand: Option<SqlValue>,
    ) -> Result<Self> {
        match (operator.takes_operand(), operand.is_some()) {
            (true, false) => Err(StoreError::validation(format!(
                "Filter on '{}' with {:?} requires an operand",
                column, operator
            ))),
            (false, true) => Err(StoreError::validation(format!(
                "Filter on '{}' with {:?} takes no operand",
                column, operator
            ))),
            _ => Ok(Self {
                column,
                operator,
                operand,
            }),
        }
    }

    pub fn eq(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::with_operand(column, FilterOperator::Equality, value.into())
    }

    /// Pattern match with the pattern bound exactly as given
    pub fn ilike(column: &'static str, pattern: impl Into<String>) -> Self {
        Self::with_operand(
            column,
            FilterOperator::PatternMatch,
            SqlValue::Text(pattern.into()),
        )
    }

    /// Case-insensitive substring match: wraps `text` as `%text%`
    pub fn contains(column: &'static str, text: &str) -> Self {
        Self::ilike(column, format!("%{}%", text))
    }

    pub fn gte(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::with_operand(column, FilterOperator::GreaterOrEqual, value.into())
    }

    pub fn lte(column: &'static str, value: impl Into<SqlValue>) -> Self {
        Self::with_operand(column, FilterOperator::LessOrEqual, value.into())
    }

    /// `column > 0`
    pub fn positive(column: &'static str) -> Self {
        Self {
            column,
            operator: FilterOperator::PositiveBoolean,
            operand: None,
        }
    }

    fn with_operand(column: &'static str, operator: FilterOperator, operand: SqlValue) -> Self {
        Self {
            column,
            operator,
            operand: Some(operand),
        }
    }

    pub fn column(&self) -> &'static str {
        self.column
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    pub fn operand(&self) -> Option<&SqlValue> {
        self.operand.as_ref()
    }
}

/// Build the WHERE-list of a filtered read
///
/// Filters are joined with ` AND ` in order. An empty slice yields an empty
/// fragment, meaning "no filter"; the caller must then leave out `WHERE`.
pub fn build_filter_clause(filters: &[FilterSpec]) -> ClauseFragment {
    let mut placeholders = Placeholders::default();
    let tokens: Vec<String> = filters
        .iter()
        .map(|filter| match &filter.operand {
            Some(operand) if filter.operator.takes_operand() => format!(
                "{} {} {}",
                filter.column,
                filter.operator.as_sql(),
                placeholders.bind(operand.clone())
            ),
            _ => format!("{} {}", filter.column, filter.operator.as_sql()),
        })
        .collect();

    placeholders.finish(tokens, " AND ")
}
