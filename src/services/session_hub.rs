use tokio::sync::broadcast;

use crate::types::internal::session::{SessionEndReason, SessionEvent};

/// Broadcasts session lifecycle changes to explicit subscribers
#[derive(Debug, Clone)]
pub struct SessionHub {
    tx: broadcast::Sender<SessionEvent>,
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new(64)
    }
}

impl SessionHub {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    pub fn started(&self, user_id: &str) {
        self.emit(SessionEvent::Started {
            user_id: user_id.to_string(),
        });
    }

    pub fn ended(&self, user_id: &str, reason: SessionEndReason) {
        self.emit(SessionEvent::Ended {
            user_id: user_id.to_string(),
            reason,
        });
    }

    fn emit(&self, event: SessionEvent) {
        tracing::debug!(?event, "Session event");
        let _ = self.tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_start_and_end() {
        let hub = SessionHub::default();
        let mut rx = hub.subscribe();

        hub.started("user-1");
        hub.ended("user-1", SessionEndReason::Logout);

        assert_eq!(
            rx.recv().await.unwrap(),
            SessionEvent::Started {
                user_id: "user-1".to_string()
            }
        );
        assert_eq!(
            rx.recv().await.unwrap(),
            SessionEvent::Ended {
                user_id: "user-1".to_string(),
                reason: SessionEndReason::Logout
            }
        );
    }

    #[test]
    fn test_emit_without_subscribers_does_not_fail() {
        SessionHub::default().started("nobody");
    }
}
