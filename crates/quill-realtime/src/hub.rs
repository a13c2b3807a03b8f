//! Per-user notification fan-out hub.

use parking_lot::{Mutex, RwLock};
use quill_core::UserId;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Buffered events per client before deliveries start being dropped.
const CHANNEL_CAPACITY: usize = 10;

/// A connected client's delivery channel.
///
/// The sender half stays with the hub for pushes; the receiver half is taken
/// exactly once by the connection that drains it.
pub struct Client {
    user_id: UserId,
    tx: mpsc::Sender<String>,
    rx: Mutex<Option<mpsc::Receiver<String>>>,
}

impl Client {
    fn new(user_id: UserId) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        Self {
            user_id,
            tx,
            rx: Mutex::new(Some(rx)),
        }
    }

    /// The user this channel belongs to.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Takes the receiving half. Returns `None` if it was already taken.
    #[must_use]
    pub fn take_receiver(&self) -> Option<mpsc::Receiver<String>> {
        self.rx.lock().take()
    }
}

/// Deregisters a client's channel when the connection that owns it ends.
///
/// Held by the delivery stream so teardown happens on any exit path,
/// including abrupt disconnects.
pub struct ConnectionGuard {
    hub: Arc<NotificationHub>,
    client: Arc<Client>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.hub.deregister_client(&self.client);
    }
}

/// Registry mapping each user to at most one active delivery channel.
///
/// Sends never block: a full buffer or an absent recipient drops the event,
/// since durable notification state lives in the database.
#[derive(Default)]
pub struct NotificationHub {
    clients: RwLock<HashMap<UserId, Arc<Client>>>,
}

impl NotificationHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a channel for the user, or returns the existing one.
    ///
    /// Idempotent: a second call for the same user hands back the same
    /// client rather than displacing the live channel.
    pub fn register(&self, user_id: UserId) -> Arc<Client> {
        let mut clients = self.clients.write();
        Arc::clone(clients.entry(user_id).or_insert_with(|| {
            debug!("Registering notification channel for user {}", user_id);
            Arc::new(Client::new(user_id))
        }))
    }

    /// Opens a drainable connection for the user.
    ///
    /// Returns the receiver for the user's channel plus a guard that
    /// deregisters it on drop. If the user's existing channel already has its
    /// receiver taken, that connection is considered superseded: the stale
    /// channel is replaced and the new connection wins.
    pub fn subscribe(self: &Arc<Self>, user_id: UserId) -> (mpsc::Receiver<String>, ConnectionGuard) {
        let client = self.register(user_id);
        let (client, rx) = match client.take_receiver() {
            Some(rx) => (client, rx),
            None => {
                debug!("Replacing superseded notification channel for user {}", user_id);
                let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
                let fresh = Arc::new(Client {
                    user_id,
                    tx,
                    rx: Mutex::new(None),
                });
                self.clients.write().insert(user_id, Arc::clone(&fresh));
                (fresh, rx)
            }
        };

        let guard = ConnectionGuard {
            hub: Arc::clone(self),
            client,
        };
        (rx, guard)
    }

    /// Removes the user's channel. A no-op when none is registered.
    pub fn deregister(&self, user_id: UserId) {
        if self.clients.write().remove(&user_id).is_some() {
            debug!("Deregistered notification channel for user {}", user_id);
        }
    }

    /// Removes the mapping for this specific client only.
    ///
    /// A newer connection may have replaced the entry; its channel must not
    /// be torn down by the old connection's exit.
    fn deregister_client(&self, client: &Arc<Client>) {
        let mut clients = self.clients.write();
        if let Some(current) = clients.get(&client.user_id) {
            if Arc::ptr_eq(current, client) {
                clients.remove(&client.user_id);
                debug!(
                    "Deregistered notification channel for user {}",
                    client.user_id
                );
            }
        }
    }

    /// Serializes the event and pushes it to the user's channel, if any.
    ///
    /// Best-effort: no registered channel or a full buffer means the event is
    /// dropped, never an error and never a blocked caller.
    pub fn send_to_user<T: Serialize>(&self, user_id: UserId, event: &T) {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize notification event: {}", e);
                return;
            }
        };

        let tx = {
            let clients = self.clients.read();
            clients.get(&user_id).map(|client| client.tx.clone())
        };

        if let Some(tx) = tx {
            if tx.try_send(payload).is_err() {
                trace!(
                    "Dropping notification for user {}: channel full or closed",
                    user_id
                );
            }
        }
    }

    /// Pushes the event to every connected user, best-effort per channel.
    pub fn broadcast<T: Serialize>(&self, event: &T) {
        let payload = match serde_json::to_string(event) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Failed to serialize broadcast event: {}", e);
                return;
            }
        };

        let senders: Vec<(UserId, mpsc::Sender<String>)> = {
            let clients = self.clients.read();
            clients
                .values()
                .map(|client| (client.user_id, client.tx.clone()))
                .collect()
        };

        for (user_id, tx) in senders {
            if tx.try_send(payload.clone()).is_err() {
                trace!(
                    "Dropping broadcast for user {}: channel full or closed",
                    user_id
                );
            }
        }
    }

    /// Whether the user currently has a registered channel.
    #[must_use]
    pub fn is_connected(&self, user_id: UserId) -> bool {
        self.clients.read().contains_key(&user_id)
    }

    /// Number of currently registered channels.
    #[must_use]
    pub fn connected_count(&self) -> usize {
        self.clients.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestEvent {
        message: &'static str,
    }

    #[test]
    fn register_is_idempotent() {
        let hub = NotificationHub::new();
        let first = hub.register(UserId::new(1));
        let second = hub.register(UserId::new(1));

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(hub.connected_count(), 1);
    }

    #[test]
    fn deregister_is_idempotent() {
        let hub = NotificationHub::new();
        hub.register(UserId::new(1));

        hub.deregister(UserId::new(1));
        hub.deregister(UserId::new(1));

        assert!(!hub.is_connected(UserId::new(1)));
        assert_eq!(hub.connected_count(), 0);
    }

    #[tokio::test]
    async fn send_to_user_delivers_serialized_event() {
        let hub = Arc::new(NotificationHub::new());
        let (mut rx, _guard) = hub.subscribe(UserId::new(1));

        hub.send_to_user(UserId::new(1), &TestEvent { message: "hello" });

        let payload = rx.recv().await.unwrap();
        assert_eq!(payload, r#"{"message":"hello"}"#);
    }

    #[test]
    fn send_to_unregistered_user_is_a_noop() {
        let hub = NotificationHub::new();
        hub.send_to_user(UserId::new(42), &TestEvent { message: "nobody" });
    }

    #[tokio::test]
    async fn full_channel_drops_events_without_blocking() {
        let hub = Arc::new(NotificationHub::new());
        let (mut rx, _guard) = hub.subscribe(UserId::new(1));

        for _ in 0..CHANNEL_CAPACITY + 5 {
            hub.send_to_user(UserId::new(1), &TestEvent { message: "burst" });
        }

        let mut received = 0;
        while rx.try_recv().is_ok() {
            received += 1;
        }
        assert_eq!(received, CHANNEL_CAPACITY);
    }

    #[tokio::test]
    async fn broadcast_reaches_all_connected_users() {
        let hub = Arc::new(NotificationHub::new());
        let (mut rx1, _g1) = hub.subscribe(UserId::new(1));
        let (mut rx2, _g2) = hub.subscribe(UserId::new(2));

        hub.broadcast(&TestEvent { message: "all" });

        assert!(rx1.recv().await.unwrap().contains("all"));
        assert!(rx2.recv().await.unwrap().contains("all"));
    }

    #[tokio::test]
    async fn guard_drop_deregisters_channel() {
        let hub = Arc::new(NotificationHub::new());
        let (rx, guard) = hub.subscribe(UserId::new(1));
        assert!(hub.is_connected(UserId::new(1)));

        drop(rx);
        drop(guard);
        assert!(!hub.is_connected(UserId::new(1)));
    }

    #[tokio::test]
    async fn newer_connection_survives_old_guard_drop() {
        let hub = Arc::new(NotificationHub::new());
        let (_rx_old, guard_old) = hub.subscribe(UserId::new(1));
        let (mut rx_new, _guard_new) = hub.subscribe(UserId::new(1));

        // Old connection tears down after being superseded.
        drop(guard_old);
        assert!(hub.is_connected(UserId::new(1)));

        hub.send_to_user(UserId::new(1), &TestEvent { message: "fresh" });
        assert!(rx_new.recv().await.unwrap().contains("fresh"));
    }
}
