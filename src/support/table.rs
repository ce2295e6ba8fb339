//! In-memory reference tables.
//!
//! Reference data (for example a propeller database) is consumed as a
//! read-only collection of [`Record`]s, each mapping field names to
//! [`FieldValue`]s. Records are selected by their unique integer identifier
//! in the [`ID_FIELD`] column, or by [`NAME_FIELD`]. How the table is loaded
//! is up to the caller.
//!
//! ```
//! use propeller_models::support::table::{Record, Table};
//!
//! let table: Table = [
//!     Record::from_iter([("myid", 1_i64.into()), ("Name", "APC 10x5".into())]),
//!     Record::from_iter([("myid", 2_i64.into()), ("Name", "APC 11x7".into())]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let record = table.get_by_id(2).unwrap();
//! assert_eq!(record.text("Name").unwrap(), "APC 11x7");
//! ```

use std::{collections::HashMap, fmt};

use thiserror::Error;

/// Name of the unique identifier field.
pub const ID_FIELD: &str = "myid";

/// Name of the display name field.
pub const NAME_FIELD: &str = "Name";

/// A single value stored in a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// The key a record was looked up by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
    Id(i64),
    Name(String),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{ID_FIELD}={id}"),
            Self::Name(name) => write!(f, "{NAME_FIELD}={name:?}"),
        }
    }
}

/// Errors that can occur while selecting or reading a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// No record matches the key.
    #[error("no record with {key}")]
    NotFound { key: RecordKey },

    /// More than one record matches a key expected to be unique.
    #[error("{count} records with {key}, expected exactly one")]
    MultipleRecords { key: RecordKey, count: usize },

    /// A required field is absent from the record.
    #[error("missing field `{field}`")]
    MissingField { field: String },

    /// A field is present but its value is unusable.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: String, reason: String },
}

impl RecordError {
    /// Creates an invalid field error with a reason.
    pub fn invalid_field(field: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.to_string(),
        }
    }
}

/// One row of a reference table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    /// Returns the value of a field, if present.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Sets the value of a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.fields.insert(field.into(), value)
    }

    /// Reads a required numeric field as `f64`.
    ///
    /// Integer values are widened.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] if the field is absent and
    /// [`RecordError::InvalidField`] if it holds text.
    #[allow(clippy::cast_precision_loss)]
    pub fn real(&self, field: &str) -> Result<f64, RecordError> {
        match self.required(field)? {
            FieldValue::Real(value) => Ok(*value),
            FieldValue::Integer(value) => Ok(*value as f64),
            FieldValue::Text(text) => Err(RecordError::invalid_field(
                field,
                format!("expected a number, found text {text:?}"),
            )),
        }
    }

    /// Reads a required text field.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MissingField`] if the field is absent and
    /// [`RecordError::InvalidField`] if it is not text.
    pub fn text(&self, field: &str) -> Result<&str, RecordError> {
        match self.required(field)? {
            FieldValue::Text(text) => Ok(text.as_str()),
            other => Err(RecordError::invalid_field(
                field,
                format!("expected text, found {other:?}"),
            )),
        }
    }

    fn required(&self, field: &str) -> Result<&FieldValue, RecordError> {
        self.get(field).ok_or_else(|| RecordError::MissingField {
            field: field.to_owned(),
        })
    }

    fn matches(&self, key: &RecordKey) -> bool {
        match (key, self.get(key.field())) {
            (RecordKey::Id(id), Some(FieldValue::Integer(value))) => value == id,
            (RecordKey::Name(name), Some(FieldValue::Text(value))) => value == name,
            _ => false,
        }
    }
}

impl RecordKey {
    fn field(&self) -> &'static str {
        match self {
            Self::Id(_) => ID_FIELD,
            Self::Name(_) => NAME_FIELD,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(field, value)| (field.into(), value))
                .collect(),
        }
    }
}

/// A read-only collection of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Creates a table from its records.
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Returns all records in table order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the single record whose [`ID_FIELD`] equals `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] if no record matches and
    /// [`RecordError::MultipleRecords`] if more than one does.
    pub fn get_by_id(&self, id: i64) -> Result<&Record, RecordError> {
        self.get_unique(RecordKey::Id(id))
    }

    /// Returns the single record whose [`NAME_FIELD`] equals `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::NotFound`] if no record matches and
    /// [`RecordError::MultipleRecords`] if more than one does.
    pub fn get_by_name(&self, name: &str) -> Result<&Record, RecordError> {
        self.get_unique(RecordKey::Name(name.to_owned()))
    }

    fn get_unique(&self, key: RecordKey) -> Result<&Record, RecordError> {
        let mut matches = self.records.iter().filter(|record| record.matches(&key));

        match (matches.next(), matches.next()) {
            (Some(record), None) => Ok(record),
            (None, _) => Err(RecordError::NotFound { key }),
            (Some(_), Some(_)) => {
                let count = 2 + matches.count();
                Err(RecordError::MultipleRecords { key, count })
            }
        }
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str) -> Record {
        Record::from_iter([
            (ID_FIELD, FieldValue::from(id)),
            (NAME_FIELD, name.into()),
            ("Dia", 10.0.into()),
        ])
    }

    fn table() -> Table {
        [record(1, "APC 10x5"), record(2, "APC 11x7"), record(2, "Graupner 9x5")]
            .into_iter()
            .collect()
    }

    #[test]
    fn get_by_id() {
        let table = table();
        assert_eq!(table.len(), 3);

        let found = table.get_by_id(1).unwrap();
        assert_eq!(found.text(NAME_FIELD).unwrap(), "APC 10x5");

        assert_eq!(
            table.get_by_id(99),
            Err(RecordError::NotFound {
                key: RecordKey::Id(99)
            })
        );
    }

    #[test]
    fn duplicate_ids_are_an_error() {
        assert_eq!(
            table().get_by_id(2),
            Err(RecordError::MultipleRecords {
                key: RecordKey::Id(2),
                count: 2,
            })
        );
    }

    #[test]
    fn get_by_name() {
        let table = table();

        let found = table.get_by_name("Graupner 9x5").unwrap();
        assert_eq!(found.get(ID_FIELD), Some(&FieldValue::Integer(2)));

        assert!(matches!(
            table.get_by_name("APC 10x4"),
            Err(RecordError::NotFound { .. })
        ));
    }

    #[test]
    fn typed_field_access() {
        let mut record = record(1, "APC 10x5");
        record.insert("n10N", FieldValue::Integer(8000));

        assert_eq!(record.real("Dia"), Ok(10.0));
        assert_eq!(record.real("n10N"), Ok(8000.0));
        assert_eq!(
            record.real("Pitch"),
            Err(RecordError::MissingField {
                field: "Pitch".into()
            })
        );
        assert!(matches!(
            record.real(NAME_FIELD),
            Err(RecordError::InvalidField { .. })
        ));
        assert!(matches!(
            record.text("Dia"),
            Err(RecordError::InvalidField { .. })
        ));
    }

    #[test]
    fn key_display() {
        assert_eq!(RecordKey::Id(7).to_string(), "myid=7");
        assert_eq!(
            RecordKey::Name("APC 10x5".into()).to_string(),
            "Name=\"APC 10x5\""
        );
    }
}
