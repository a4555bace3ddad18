use rust_decimal::Decimal;
use tracing::error;

use crate::models::{Transaction, TransactionType};

/// Totals shown above the transaction list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub income: Decimal,
    pub outcome: Decimal,
    /// Income minus outcome, negative when more went out than came in.
    pub total: Decimal
}

impl Summary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut income = Decimal::ZERO;
        let mut outcome = Decimal::ZERO;

        for transaction in transactions {
            let bucket = match transaction.transaction_type {
                TransactionType::Income => &mut income,
                TransactionType::Outcome => &mut outcome
            };

            match bucket.checked_add(transaction.price.amount()) {
                Some(value) => *bucket = value,
                None => error!("Summary overflow while adding transaction [{}]", transaction.id)
            }
        }

        let total = income.checked_sub(outcome).unwrap_or_else(|| {
            error!("Summary overflow while computing the total");
            Decimal::ZERO
        });

        Self { income, outcome, total }
    }
}
