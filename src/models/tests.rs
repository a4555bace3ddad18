use super::{DomainError, NewTransaction, Summary, Transaction, TransactionType};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;
use time::OffsetDateTime;

use crate::types::Price;

fn create_payload(description: &str, price: &str, category: &str, transaction_type: TransactionType) -> Result<NewTransaction> {
    Ok(NewTransaction {
        description: description.to_string(),
        price: Price::from_str(price)?,
        category: category.to_string(),
        transaction_type
    })
}

fn create_transaction(id: u32, description: &str, price: &str, transaction_type: TransactionType) -> Result<Transaction> {
    let payload = create_payload(description, price, "General", transaction_type)?;
    Ok(Transaction::from_payload(id, &payload, OffsetDateTime::now_utc()))
}

#[test]
fn test_transaction_type_parses_toggle_values() {
    assert_eq!(TransactionType::parse("income"), Some(TransactionType::Income));
    assert_eq!(TransactionType::parse(" Outcome "), Some(TransactionType::Outcome));
    assert_eq!(TransactionType::parse("refund"), None);
    assert_eq!(TransactionType::default(), TransactionType::Income);
    assert_eq!(TransactionType::Outcome.to_string(), "outcome");
}

#[test]
fn test_valid_payload_passes_the_domain_check() -> Result<()> {
    let payload = create_payload("Salary", "5000", "Work", TransactionType::Income)?;

    assert!(payload.check().is_ok());

    Ok(())
}

#[test]
fn test_blank_description_is_a_domain_error() -> Result<()> {
    let payload = create_payload("   ", "10", "Food", TransactionType::Outcome)?;

    assert!(matches!(payload.check(), Err(DomainError::BlankDescription { .. })));

    Ok(())
}

#[test]
fn test_blank_category_is_a_domain_error() -> Result<()> {
    let payload = create_payload("Lunch", "10", "", TransactionType::Outcome)?;

    assert!(matches!(payload.check(), Err(DomainError::BlankCategory { .. })));

    Ok(())
}

#[test]
fn test_transaction_keeps_the_submitted_fields() -> Result<()> {
    let payload = create_payload("Uber ride", "23.90", "Transport", TransactionType::Outcome)?;
    let transaction = Transaction::from_payload(7, &payload, OffsetDateTime::now_utc());

    assert_eq!(transaction.id, 7);
    assert!(transaction.matches_payload(&payload));

    let other = create_payload("Uber ride", "23.91", "Transport", TransactionType::Outcome)?;

    assert!(!transaction.matches_payload(&other));

    Ok(())
}

#[test]
fn test_query_matching_is_case_insensitive_substring() -> Result<()> {
    let transaction = create_transaction(1, "Uber Eats", "30", TransactionType::Outcome)?;

    assert!(transaction.matches_query("uber"));
    assert!(transaction.matches_query("EATS"));
    assert!(transaction.matches_query(""));
    assert!(!transaction.matches_query("netflix"));

    Ok(())
}

#[test]
fn test_summary_folds_income_and_outcome() -> Result<()> {
    let transactions = vec![
        create_transaction(1, "Salary", "1000.00", TransactionType::Income)?,
        create_transaction(2, "Rent", "750.50", TransactionType::Outcome)?,
        create_transaction(3, "Freelance", "200", TransactionType::Income)?,
        create_transaction(4, "Groceries", "600", TransactionType::Outcome)?,
    ];

    let summary = Summary::from_transactions(&transactions);

    assert_eq!(summary.income, Decimal::from_str("1200")?);
    assert_eq!(summary.outcome, Decimal::from_str("1350.50")?);
    assert_eq!(summary.total, Decimal::from_str("-150.50")?);

    Ok(())
}

#[test]
fn test_summary_of_nothing_is_zero() {
    let summary = Summary::from_transactions(&[]);

    assert!(summary.income.is_zero());
    assert!(summary.outcome.is_zero());
    assert!(summary.total.is_zero());
}
