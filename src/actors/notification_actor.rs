use std::fmt;
use std::fmt::{Display, Formatter};

use anyhow::Result;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// The user-visible notification channel.
pub trait Notifier: Send + Sync + 'static {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum NotificationLevel {
    Success,
    Error
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String
}

impl Notification {
    pub fn success(message: &str) -> Self {
        Self { level: NotificationLevel::Success, message: message.to_string() }
    }

    pub fn error(message: &str) -> Self {
        Self { level: NotificationLevel::Error, message: message.to_string() }
    }
}

impl Display for Notification {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self.level {
            NotificationLevel::Success => write!(formatter, "[success] {}", self.message),
            NotificationLevel::Error => write!(formatter, "[error] {}", self.message)
        }
    }
}

/// Owns the toast queue of a session.
///
/// Toasts are delivered in the order they were raised. Once despawned, the
/// actor hands back everything it delivered.
pub struct NotificationActor {
    sender: mpsc::UnboundedSender<Notification>,
    handle: JoinHandle<Vec<Notification>>
}

impl NotificationActor {
    /// Spawns a new actor on the current runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Notification>();

        let handle = spawn(async move {
            let mut delivered = Vec::new();

            while let Some(notification) = receiver.recv().await {
                match notification.level {
                    NotificationLevel::Success => info!("Toast: {}", notification.message),
                    NotificationLevel::Error => warn!("Toast: {}", notification.message)
                }

                delivered.push(notification);
            }

            delivered
        });

        Self { sender, handle }
    }

    /// Queues a notification. Returns false if the actor has already stopped.
    pub fn accept(&self, notification: Notification) -> bool {
        self.sender.send(notification).is_ok()
    }

    /// A cheap handle that forms can keep to raise toasts.
    pub fn notifier(&self) -> Toaster {
        Toaster { sender: self.sender.clone() }
    }

    /// Closes the queue once every `Toaster` is gone and returns the delivered toasts.
    pub async fn despawn(self) -> Result<Vec<Notification>> {
        drop(self.sender);
        Ok(self.handle.await?)
    }
}

#[derive(Clone)]
pub struct Toaster {
    sender: mpsc::UnboundedSender<Notification>
}

impl Toaster {
    fn raise(&self, notification: Notification) {
        if self.sender.send(notification).is_err() {
            warn!("Notification actor has stopped, dropping toast");
        }
    }
}

impl Notifier for Toaster {
    fn success(&self, message: &str) {
        self.raise(Notification::success(message));
    }

    fn error(&self, message: &str) {
        self.raise(Notification::error(message));
    }
}
