use std::str::FromStr;

use serde::Deserialize;

use crate::models::{NewTransaction, TransactionType};
use crate::schema::errors::{Field, FieldError, FieldErrorKind, ValidationError};
use crate::types::{Price, PriceError};

/// The new-transaction form exactly as the user filled it in.
///
/// Every field is optional text so that missing and malformed values reach
/// the schema instead of failing earlier during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewTransactionInput {
    pub description: Option<String>,
    pub price: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>
}

impl NewTransactionInput {
    pub fn new(description: &str, price: &str, category: &str, transaction_type: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            price: Some(price.to_string()),
            category: Some(category.to_string()),
            transaction_type: Some(transaction_type.to_string())
        }
    }
}

pub struct NewTransactionSchema;

impl NewTransactionSchema {
    /// Checks every field and coerces the price into a number.
    ///
    /// # Errors
    /// Returns a `ValidationError` listing each field that failed, in form order.
    pub fn validate(input: &NewTransactionInput) -> Result<NewTransaction, ValidationError> {
        let mut errors = Vec::new();

        let description = required_text(Field::Description, input.description.as_deref(), &mut errors);
        let price = Self::price(input.price.as_deref(), &mut errors);
        let category = required_text(Field::Category, input.category.as_deref(), &mut errors);
        let transaction_type = Self::transaction_type(input.transaction_type.as_deref(), &mut errors);

        match (description, price, category, transaction_type) {
            (Some(description), Some(price), Some(category), Some(transaction_type)) if errors.is_empty() => {
                Ok(NewTransaction { description, price, category, transaction_type })
            }
            _ => Err(ValidationError::new(errors))
        }
    }

    fn price(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<Price> {
        let value = match value {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                errors.push(FieldError::new(Field::Price, FieldErrorKind::Required));
                return None;
            }
        };

        match Price::from_str(value) {
            Ok(price) => Some(price),
            Err(error) => {
                let kind = match error {
                    PriceError::Negative => FieldErrorKind::Negative,
                    PriceError::TooPrecise(_) => FieldErrorKind::TooPrecise,
                    PriceError::InvalidFormat(_) | PriceError::Decimal(_) => FieldErrorKind::NotANumber
                };

                errors.push(FieldError::new(Field::Price, kind));
                None
            }
        }
    }

    fn transaction_type(value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<TransactionType> {
        let value = match value {
            Some(value) if !value.trim().is_empty() => value,
            _ => return Some(TransactionType::default())
        };

        let parsed = TransactionType::parse(value);

        if parsed.is_none() {
            errors.push(FieldError::new(Field::Type, FieldErrorKind::InvalidChoice(value.to_string())));
        }

        parsed
    }
}

fn required_text(field: Field, value: Option<&str>, errors: &mut Vec<FieldError>) -> Option<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Some(value.to_string()),
        _ => {
            errors.push(FieldError::new(field, FieldErrorKind::Required));
            None
        }
    }
}
