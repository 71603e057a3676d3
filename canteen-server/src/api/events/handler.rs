//! Observer Stream Handler
//!
//! Upgrades to a WebSocket and forwards every broadcast event as a JSON
//! frame. There is no replay: observers receive events published after
//! they connect and re-fetch current state through the query API. An
//! observer that cannot keep up lags on the broadcast channel and is
//! disconnected rather than ever back-pressuring the publisher.

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::auth::CurrentActor;
use crate::core::ServerState;
use shared::actor::Actor;
use shared::order::OrderEvent;

/// GET /api/events - observer WebSocket stream
pub async fn stream(
    ws: WebSocketUpgrade,
    State(state): State<ServerState>,
    CurrentActor(actor): CurrentActor,
) -> Response {
    let rx = state.engine.subscribe();
    let shutdown = state.broadcaster().shutdown_token().clone();
    ws.on_upgrade(move |socket| forward_events(socket, rx, shutdown, actor))
}

/// Forward broadcast events to one observer until it disconnects
async fn forward_events(
    mut socket: WebSocket,
    mut rx: broadcast::Receiver<OrderEvent>,
    shutdown: CancellationToken,
    actor: Actor,
) {
    tracing::info!(actor_id = %actor.id, role = %actor.role, "Observer connected");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,

            // Inbound frames are ignored; None means the peer went away
            incoming = socket.recv() => {
                match incoming {
                    Some(Ok(_)) => continue,
                    _ => break,
                }
            }

            event = rx.recv() => {
                match event {
                    Ok(event) => {
                        let frame = match serde_json::to_string(&event) {
                            Ok(frame) => frame,
                            Err(e) => {
                                tracing::error!(error = %e, "Failed to serialize event");
                                continue;
                            }
                        };
                        if socket.send(Message::Text(frame.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // The observer fell behind the channel capacity;
                        // drop it so it reconnects and re-fetches state
                        tracing::warn!(
                            actor_id = %actor.id,
                            skipped,
                            "Observer lagged, disconnecting"
                        );
                        break;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::info!(actor_id = %actor.id, "Observer disconnected");
}
