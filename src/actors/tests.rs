use super::{Notification, NotificationActor, NotificationLevel, Notifier};
use anyhow::Result;

#[tokio::test]
async fn test_actor_delivers_toasts_in_order() -> Result<()> {
    let actor = NotificationActor::new();
    let toaster = actor.notifier();

    toaster.success("Transaction added");
    toaster.error("Could not add transaction");
    assert!(actor.accept(Notification::success("Search complete")));

    drop(toaster);
    let delivered = actor.despawn().await?;

    assert_eq!(delivered.len(), 3);
    assert_eq!(delivered[0], Notification::success("Transaction added"));
    assert_eq!(delivered[1].level, NotificationLevel::Error);
    assert_eq!(delivered[2].to_string(), "[success] Search complete");

    Ok(())
}

#[tokio::test]
async fn test_actor_without_toasts_returns_an_empty_history() -> Result<()> {
    let actor = NotificationActor::new();
    let toaster = actor.notifier();
    let toaster_clone = toaster.clone();

    drop(toaster);
    drop(toaster_clone);
    let delivered = actor.despawn().await?;

    assert!(delivered.is_empty());

    Ok(())
}
