use tokio::sync::watch;

use crate::store::StoreState;

/// A subscription to one projection of the store state.
///
/// Changes to the state that leave the projected value equal are swallowed,
/// so a subscriber only wakes up for the slice it reads.
pub struct Selector<T> {
    receiver: watch::Receiver<StoreState>,
    project: fn(&StoreState) -> T,
    current: T
}

impl<T: Clone + PartialEq> Selector<T> {
    pub fn new(mut receiver: watch::Receiver<StoreState>, project: fn(&StoreState) -> T) -> Self {
        let current = project(&receiver.borrow_and_update());

        Self { receiver, project, current }
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    /// Waits for the projected value to change. Returns `None` once the store is gone.
    pub async fn changed(&mut self) -> Option<T> {
        loop {
            if self.receiver.changed().await.is_err() {
                return None;
            }

            if let Some(next) = self.take_if_different() {
                return Some(next);
            }
        }
    }

    /// Non-blocking variant of `changed` for callers that render on their own schedule.
    pub fn try_changed(&mut self) -> Option<T> {
        match self.receiver.has_changed() {
            Ok(true) => self.take_if_different(),
            _ => None
        }
    }

    fn take_if_different(&mut self) -> Option<T> {
        let next = (self.project)(&self.receiver.borrow_and_update());

        if next == self.current {
            return None;
        }

        self.current = next.clone();
        Some(next)
    }
}
