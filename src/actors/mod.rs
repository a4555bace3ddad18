mod notification_actor;
#[cfg(test)]
mod tests;

pub use notification_actor::{Notification, NotificationActor, NotificationLevel, Notifier, Toaster};
