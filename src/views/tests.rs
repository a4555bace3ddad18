use super::{Header, Modal, TransactionsTable};

use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;

use crate::models::{NewTransaction, TransactionType};
use crate::schema::SearchQuery;
use crate::storage::InMemoryRepository;
use crate::store::TransactionStore;
use crate::types::Price;

fn create_payload(description: &str, price: &str, transaction_type: TransactionType) -> Result<NewTransaction> {
    Ok(NewTransaction {
        description: description.to_string(),
        price: Price::from_str(price)?,
        category: "General".to_string(),
        transaction_type
    })
}

#[test]
fn test_modal_only_reports_real_state_changes() {
    let modal = Modal::new();
    let mut receiver = modal.subscribe();

    modal.close();
    assert!(!receiver.has_changed().unwrap_or(true));

    modal.on_open_change(true);
    assert!(modal.is_open());
    assert!(receiver.has_changed().unwrap_or(false));

    let _ = receiver.borrow_and_update();
    modal.open();
    assert!(!receiver.has_changed().unwrap_or(true));
}

#[test]
fn test_header_shares_its_modal_with_the_form() {
    let header = Header::new();
    let modal = header.new_transaction_modal();

    header.open_new_transaction();
    assert!(modal.is_open());

    modal.close();
    assert!(!header.is_new_transaction_open());
}

#[tokio::test]
async fn test_table_renders_signed_prices_and_a_summary() -> Result<()> {
    let store = TransactionStore::new(Arc::new(InMemoryRepository::new()));
    let mut table = TransactionsTable::subscribe(&store);

    store.create_transaction(create_payload("Salary", "3000", TransactionType::Income)?).await?;
    store.create_transaction(create_payload("Rent", "1200.5", TransactionType::Outcome)?).await?;

    assert!(table.refresh());

    let rows = table.rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].description, "Rent");
    assert_eq!(rows[0].price, "- 1200.50");
    assert_eq!(rows[1].price, "3000.00");
    assert_eq!(rows[1].date.len(), "17/10/2026".len());
    assert_eq!(table.summary().total, Decimal::from_str("1799.5")?);

    Ok(())
}

#[tokio::test]
async fn test_table_does_not_re_render_for_query_only_changes() -> Result<()> {
    let store = TransactionStore::new(Arc::new(InMemoryRepository::new()));
    store.create_transaction(create_payload("Netflix", "39.90", TransactionType::Outcome)?).await?;

    let mut table = TransactionsTable::subscribe(&store);

    store.fetch_transactions(SearchQuery::matching("netflix")).await?;

    assert!(!table.refresh());
    assert_eq!(table.render_count(), 1);

    store.fetch_transactions(SearchQuery::matching("uber")).await?;

    assert!(table.refresh());
    assert_eq!(table.render_count(), 2);
    assert!(table.rows().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_table_stops_waiting_when_the_store_is_dropped() -> Result<()> {
    let store = TransactionStore::new(Arc::new(InMemoryRepository::new()));
    let mut table = TransactionsTable::subscribe(&store);

    drop(store);

    assert!(!table.wait_for_change().await);

    Ok(())
}
