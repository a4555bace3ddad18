mod header;
mod modal;
#[cfg(test)]
mod tests;
mod transactions_table;

pub use header::Header;
pub use modal::Modal;
pub use transactions_table::{TransactionRow, TransactionsTable};
