//! User-facing notifications for loan actions
//!
//! Every approval, rejection or failed action produces a transient
//! notification that connected dashboards receive over the WebSocket.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::loan::LoanId;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A transient toast
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_id: Option<LoanId>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        level: NotificationLevel,
        message: impl Into<String>,
        loan_id: Option<LoanId>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            loan_id,
            created_at: Utc::now(),
        }
    }

    pub fn success(message: impl Into<String>, loan_id: &LoanId) -> Self {
        Self::new(NotificationLevel::Success, message, Some(loan_id.clone()))
    }

    pub fn info(message: impl Into<String>, loan_id: &LoanId) -> Self {
        Self::new(NotificationLevel::Info, message, Some(loan_id.clone()))
    }

    pub fn error(message: impl Into<String>, loan_id: &LoanId) -> Self {
        Self::new(NotificationLevel::Error, message, Some(loan_id.clone()))
    }
}

/// Fan-out of notifications to every subscriber
#[derive(Clone)]
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish to current subscribers; having none is not an error
    pub fn publish(&self, notification: Notification) {
        tracing::debug!(
            level = ?notification.level,
            loan_id = ?notification.loan_id,
            message = %notification.message,
            "Publishing notification"
        );
        if self.tx.send(notification).is_err() {
            tracing::debug!("No notification subscribers connected");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(100)
    }
}
