use std::sync::Arc;

use tokio::sync::watch;

/// Open/close state of a dialog, shared between its trigger and its content.
#[derive(Clone)]
pub struct Modal {
    open: Arc<watch::Sender<bool>>
}

impl Modal {
    pub fn new() -> Self {
        let (open, _) = watch::channel(false);

        Self { open: Arc::new(open) }
    }

    pub fn is_open(&self) -> bool {
        *self.open.borrow()
    }

    pub fn open(&self) {
        self.on_open_change(true);
    }

    pub fn close(&self) {
        self.on_open_change(false);
    }

    /// Applies a requested state, subscribers only hear about actual changes.
    pub fn on_open_change(&self, open: bool) {
        self.open.send_if_modified(|current| {
            let changed = *current != open;
            *current = open;
            changed
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.open.subscribe()
    }
}

impl Default for Modal {
    fn default() -> Self {
        Self::new()
    }
}
