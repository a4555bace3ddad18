use rust_decimal::Error as DecimalError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PriceError {
    #[error("Price error: {0}")]
    InvalidFormat(String),
    #[error("Price error: {0}")]
    Decimal(#[from] DecimalError),
    #[error("Price error: Value must not be negative")]
    Negative,
    #[error("Price error: Value has more than {0} decimal places")]
    TooPrecise(u32)
}
