use std::fmt;
use std::fmt::{Display, Formatter};

use thiserror::Error;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Field {
    Description,
    Price,
    Category,
    Type
}

impl Display for Field {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Description => "description",
            Field::Price => "price",
            Field::Category => "category",
            Field::Type => "type"
        };

        formatter.write_str(name)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum FieldErrorKind {
    Required,
    NotANumber,
    Negative,
    TooPrecise,
    InvalidChoice(String)
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("{field}: {}", describe(.kind))]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind
}

impl FieldError {
    pub fn new(field: Field, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }

    /// Inline message shown next to the input.
    pub fn message(&self) -> String {
        describe(&self.kind)
    }
}

/// Every field that failed a schema, in form order.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("Validation failed for [{}]", field_names(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn fields(&self) -> Vec<Field> {
        self.errors.iter().map(|error| error.field).collect()
    }

    pub fn has(&self, field: Field) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    pub fn message_for(&self, field: Field) -> Option<String> {
        self.errors.iter().find(|error| error.field == field).map(FieldError::message)
    }
}

fn describe(kind: &FieldErrorKind) -> String {
    match kind {
        FieldErrorKind::Required => "This field is required".to_string(),
        FieldErrorKind::NotANumber => "Expected a number".to_string(),
        FieldErrorKind::Negative => "Must not be negative".to_string(),
        FieldErrorKind::TooPrecise => "Too many decimal places".to_string(),
        FieldErrorKind::InvalidChoice(value) => format!("Expected 'income' or 'outcome', received '{value}'")
    }
}

fn field_names(errors: &[FieldError]) -> String {
    errors.iter()
        .map(|error| error.field.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
