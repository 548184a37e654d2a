//! WebSocket server for real-time loan notifications

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::loan::LoanId;
use crate::notifications::{Notification, Notifier};

/// WebSocket server state
#[derive(Clone)]
pub struct WsState {
    pub notifier: Notifier,
    /// Connected clients registry
    pub clients: Arc<RwLock<HashMap<String, ClientInfo>>>,
}

/// Client connection information
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub client_id: String,
    /// Empty means every loan
    pub subscribed_loans: Vec<LoanId>,
}

/// Client message types
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ClientMessage {
    Subscribe { loan_ids: Vec<LoanId> },
    Unsubscribe { loan_ids: Vec<LoanId> },
    Ping,
}

/// Server message types
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ServerMessage {
    Notification { notification: Notification },
    Subscribed { loan_ids: Vec<LoanId> },
    Unsubscribed { loan_ids: Vec<LoanId> },
    Pong,
}

impl WsState {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            notifier,
            clients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn register_client(&self, client_id: String) {
        let mut clients = self.clients.write().await;
        clients.insert(
            client_id.clone(),
            ClientInfo {
                client_id,
                subscribed_loans: vec![],
            },
        );
    }

    async fn unregister_client(&self, client_id: &str) {
        let mut clients = self.clients.write().await;
        clients.remove(client_id);
        tracing::info!("Client {} disconnected", client_id);
    }

    async fn update_subscriptions(&self, client_id: &str, loan_ids: Vec<LoanId>) {
        let mut clients = self.clients.write().await;
        if let Some(client) = clients.get_mut(client_id) {
            client.subscribed_loans = loan_ids;
        }
    }

    /// Whether a client should receive a notification
    async fn wants(&self, client_id: &str, notification: &Notification) -> bool {
        let clients = self.clients.read().await;
        match clients.get(client_id) {
            Some(client) => match &notification.loan_id {
                Some(loan_id) => {
                    client.subscribed_loans.is_empty() || client.subscribed_loans.contains(loan_id)
                }
                None => true,
            },
            None => false,
        }
    }
}

/// WebSocket handler - upgrades HTTP connection to WebSocket
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WsState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle WebSocket connection
async fn handle_socket(socket: WebSocket, state: WsState) {
    let client_id = Uuid::new_v4().to_string();
    state.register_client(client_id.clone()).await;
    tracing::info!("Client {} connected", client_id);

    let (mut sender, mut receiver) = socket.split();

    // Replies produced by the receive loop are funneled through the sender task
    let (internal_tx, mut internal_rx) = mpsc::channel::<ServerMessage>(32);

    let mut rx = state.notifier.subscribe();
    let client_id_send = client_id.clone();
    let state_send = state.clone();

    let mut send_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                Ok(notification) = rx.recv() => {
                    if state_send.wants(&client_id_send, &notification).await {
                        let msg = ServerMessage::Notification { notification };
                        if let Ok(text) = serde_json::to_string(&msg) {
                            if sender.send(Message::Text(text)).await.is_err() {
                                break;
                            }
                        }
                    }
                }
                Some(msg) = internal_rx.recv() => {
                    if let Ok(text) = serde_json::to_string(&msg) {
                        if sender.send(Message::Text(text)).await.is_err() {
                            break;
                        }
                    }
                }
                else => break,
            }
        }
    });

    let state_recv = state.clone();
    let client_id_recv = client_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    let Ok(client_msg) = serde_json::from_str::<ClientMessage>(&text) else {
                        tracing::debug!("Ignoring malformed message from {}", client_id_recv);
                        continue;
                    };
                    match client_msg {
                        ClientMessage::Subscribe { loan_ids } => {
                            state_recv
                                .update_subscriptions(&client_id_recv, loan_ids.clone())
                                .await;
                            let _ = internal_tx
                                .send(ServerMessage::Subscribed { loan_ids })
                                .await;
                        }
                        ClientMessage::Unsubscribe { loan_ids } => {
                            let current = {
                                let clients = state_recv.clients.read().await;
                                clients
                                    .get(&client_id_recv)
                                    .map(|client| client.subscribed_loans.clone())
                                    .unwrap_or_default()
                            };
                            let remaining = current
                                .into_iter()
                                .filter(|id| !loan_ids.contains(id))
                                .collect();
                            state_recv
                                .update_subscriptions(&client_id_recv, remaining)
                                .await;
                            let _ = internal_tx
                                .send(ServerMessage::Unsubscribed { loan_ids })
                                .await;
                        }
                        ClientMessage::Ping => {
                            tracing::debug!("Ping from client {}", client_id_recv);
                            let _ = internal_tx.send(ServerMessage::Pong).await;
                        }
                    }
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    state.unregister_client(&client_id).await;
}

// Re-export futures traits for split() and send()
use futures_util::{SinkExt, StreamExt};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_parsing() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"subscribe","loan_ids":["1","3"]}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Subscribe { loan_ids } if loan_ids.len() == 2));

        let msg: ClientMessage = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[tokio::test]
    async fn test_subscription_filtering() {
        let state = WsState::new(Notifier::default());
        state.register_client("c1".to_string()).await;

        let for_loan_1 = Notification::success("ok", &LoanId::from("1"));
        let for_loan_2 = Notification::success("ok", &LoanId::from("2"));
        assert!(state.wants("c1", &for_loan_2).await);

        state
            .update_subscriptions("c1", vec![LoanId::from("1")])
            .await;
        assert!(state.wants("c1", &for_loan_1).await);
        assert!(!state.wants("c1", &for_loan_2).await);

        state.unregister_client("c1").await;
        assert!(!state.wants("c1", &for_loan_1).await);
    }
}
