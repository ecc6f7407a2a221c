//! SQL identifier sanitization
//!
//! Table names are configurable and end up interpolated in statement text,
//! so they are validated once when the store starts and quoted every time
//! they are used.

use std::sync::LazyLock;

use regex::Regex;

/// PostgreSQL reserved keywords that cannot be used as table names
pub const POSTGRES_RESERVED_WORDS: &[&str] = &[
    "ALL", "ANALYSE", "ANALYZE", "AND", "ANY", "ARRAY", "AS", "ASC", "ASYMMETRIC", "BOTH",
    "CASE", "CAST", "CHECK", "COLLATE", "COLUMN", "CONSTRAINT", "CREATE", "CURRENT_CATALOG",
    "CURRENT_DATE", "CURRENT_ROLE", "CURRENT_TIME", "CURRENT_TIMESTAMP", "CURRENT_USER",
    "DEFAULT", "DEFERRABLE", "DESC", "DISTINCT", "DO", "ELSE", "END", "EXCEPT", "FALSE",
    "FETCH", "FOR", "FOREIGN", "FROM", "GRANT", "GROUP", "HAVING", "IN", "INITIALLY",
    "INTERSECT", "INTO", "LATERAL", "LEADING", "LIMIT", "LOCALTIME", "LOCALTIMESTAMP", "NOT",
    "NULL", "OFFSET", "ON", "ONLY", "OR", "ORDER", "PLACING", "PRIMARY", "REFERENCES",
    "RETURNING", "SELECT", "SESSION_USER", "SOME", "SYMMETRIC", "TABLE", "THEN", "TO",
    "TRAILING", "TRUE", "UNION", "UNIQUE", "USER", "USING", "VARIADIC", "WHEN", "WHERE",
    "WINDOW", "WITH",
];

/// Longest identifier PostgreSQL keeps without truncation
pub const MAX_IDENTIFIER_LEN: usize = 63;

static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("identifier pattern is valid"));

/// Quote a SQL identifier, doubling any embedded double quotes
///
/// # Example
/// ```
/// use jobly_store::sql::quote_identifier;
///
/// assert_eq!(quote_identifier("jobs"), "\"jobs\"");
/// ```
pub fn quote_identifier(identifier: &str) -> String {
    let escaped = identifier.replace('"', "\"\"");
    format!("\"{}\"", escaped)
}

/// Validate a table name
///
/// Must start with a lowercase letter, contain only lowercase letters,
/// digits and underscores, fit in 63 bytes and not be a reserved keyword.
///
/// # Example
/// ```
/// use jobly_store::sql::validate_identifier;
///
/// assert!(validate_identifier("companies").is_ok());
/// assert!(validate_identifier("select").is_err());
/// ```
pub fn validate_identifier(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Identifier cannot be empty".to_string());
    }

    if name.len() > MAX_IDENTIFIER_LEN {
        return Err(format!(
            "Identifier '{}' is longer than {} characters",
            name, MAX_IDENTIFIER_LEN
        ));
    }

    if !IDENTIFIER_PATTERN.is_match(name) {
        return Err(format!(
            "Identifier '{}' is invalid. Must start with a lowercase letter and contain only lowercase letters, numbers, and underscores.",
            name
        ));
    }

    if POSTGRES_RESERVED_WORDS.contains(&name.to_uppercase().as_str()) {
        return Err(format!(
            "Identifier '{}' is a PostgreSQL reserved keyword and cannot be used.",
            name
        ));
    }

    Ok(())
}
