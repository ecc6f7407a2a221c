//! Logical field names and their storage columns
//!
//! Request payloads use external (camelCase) field names while tables use
//! snake_case columns. A [`RenameTable`] lists the fields whose names differ;
//! every other field maps to a column of the same name.

use std::fmt;

use crate::types::ScalarKind;

/// A closed set of fields an entity accepts in update payloads
///
/// Implementors are plain enums. Request keys are only ever *matched*
/// against [`Field::ALL`]; the `'static` name of the matched variant is what
/// reaches SQL text, so a request cannot smuggle its own column name into a
/// statement.
pub trait Field: Copy + Eq + fmt::Debug + 'static {
    /// Every field of the entity, in declaration order
    const ALL: &'static [Self];

    /// External (logical) name of the field
    fn name(self) -> &'static str;

    /// Storage kind of the column backing this field
    fn kind(self) -> ScalarKind;

    /// Look up a field by its external name
    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == key)
    }
}

/// Static mapping from logical field name to storage column name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenameTable {
    entries: &'static [(&'static str, &'static str)],
}

impl RenameTable {
    /// Create a rename table from `(field, column)` pairs
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// A table with no entries; every field maps to itself
    pub const fn identity() -> Self {
        Self { entries: &[] }
    }

    /// Storage column for a logical field name
    ///
    /// Returns the table's entry when present, otherwise `field` unchanged.
    pub fn column_for<'a>(&self, field: &'a str) -> &'a str {
        match self.entries.iter().find(|(logical, _)| *logical == field) {
            Some(&(_, column)) => column,
            None => field,
        }
    }

    pub fn entries(&self) -> &'static [(&'static str, &'static str)] {
        self.entries
    }
}

impl Default for RenameTable {
    fn default() -> Self {
        Self::identity()
    }
}
