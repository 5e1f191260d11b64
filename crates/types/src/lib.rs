//! # Clinident Types
//!
//! Small shared types at the bottom of the workspace dependency graph:
//! the scalar field value used by the filter and export engines, the
//! dynamic field-access trait entities implement, and a validated
//! non-empty text newtype for required inputs.

use serde::{Deserialize, Serialize};

/// A single scalar value read out of an entity record.
///
/// The remote API serves flat JSON objects whose values are strings,
/// numbers, booleans or date-strings. Anything composite is out of scope
/// for the filter and export engines, which only ever compare and render
/// scalars. Dates travel as strings and stay strings here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Free text, including ISO-8601 date strings.
    Text(String),
    /// Any JSON number.
    Number(f64),
    /// A JSON boolean.
    Bool(bool),
    /// An explicit JSON null.
    Null,
}

impl FieldValue {
    /// Render the value as the string form the engines compare and export.
    ///
    /// `Null` renders as the empty string, matching how a missing field is
    /// treated everywhere else.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Null => String::new(),
        }
    }

    /// Whether the value carries nothing a filter could match on.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Null => true,
            _ => false,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

/// Dynamic, by-name access to an entity's scalar fields.
///
/// The filter engine tests fields it only knows by name, and the export
/// engine projects them into rows. `field` returns `None` for a name the
/// entity does not have; an absent field is an ordinary non-match, never
/// an error.
pub trait Fields {
    /// Look up a field by its wire name.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// The field's string form, with absent and null fields coerced to the
    /// empty string.
    fn field_text(&self, name: &str) -> String {
        self.field(name).map(|v| v.to_text()).unwrap_or_default()
    }
}

/// A display-oriented export row: ordered `(column label, rendered value)`
/// pairs. Produced only at export time, never persisted.
pub type ExportRecord = Vec<(String, String)>;

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace.
    #[error("text cannot be empty")]
    Empty,
}

/// Text that is guaranteed trimmed and non-empty.
///
/// Required form fields (names, document numbers, specialties) pass
/// through this type before a create or update request is assembled, so a
/// blank value is rejected before it ever reaches the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequiredText(String);

impl RequiredText {
    /// Trim the input and reject it if nothing remains.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The validated text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RequiredText {
    type Error = TextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RequiredText::new(value)
    }
}

impl From<RequiredText> for String {
    fn from(value: RequiredText) -> Self {
        value.0
    }
}

impl std::fmt::Display for RequiredText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
