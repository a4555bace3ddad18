use crate::views::Modal;

/// Top bar holding the "new transaction" trigger and its dialog.
pub struct Header {
    new_transaction: Modal
}

impl Header {
    pub fn new() -> Self {
        Self { new_transaction: Modal::new() }
    }

    /// The dialog handle the transaction form closes on success.
    pub fn new_transaction_modal(&self) -> Modal {
        self.new_transaction.clone()
    }

    pub fn open_new_transaction(&self) {
        self.new_transaction.open();
    }

    pub fn is_new_transaction_open(&self) -> bool {
        self.new_transaction.is_open()
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
