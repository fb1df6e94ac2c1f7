use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use dealwire_core::events::AnnouncementSender;
use dealwire_sdk::objects::ws::WsServerMessage;
use tokio::sync::broadcast::error::RecvError;

use crate::state::AppState;

/// `GET /api/ws` – operator deal feed.
///
/// Upgrades the HTTP connection to a WebSocket and pushes a
/// [`WsServerMessage::NewDeal`] frame for every deal submitted while the
/// connection is up. There is no backlog: only the live pending flow
/// matters to an operator, so late joiners start from the next event.
pub(super) async fn deal_feed_ws(
    state: State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let announcements = state.announcements.clone();
    ws.on_upgrade(move |socket| handle_deal_feed(socket, announcements))
}

/// Background task that drives a single feed connection.
///
/// Subscribes before entering the relay loop, forwards every announcement
/// as a JSON text frame, and drops the connection when the client goes
/// away. A consumer that lags behind the channel buffer loses the oldest
/// events; that is logged and the stream continues with newer ones.
async fn handle_deal_feed(mut socket: WebSocket, announcements: AnnouncementSender) {
    let mut feed_rx = announcements.subscribe();
    tracing::debug!("operator connected to the deal feed");

    loop {
        tokio::select! {
            result = feed_rx.recv() => {
                match result {
                    Ok(deal) => {
                        let frame = WsServerMessage::NewDeal { deal };
                        if send_json(&mut socket, &frame).await.is_err() {
                            return;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "deal feed consumer lagged, events dropped");
                    }
                    Err(RecvError::Closed) => {
                        break;
                    }
                }
            }

            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        tracing::debug!("operator disconnected from the deal feed");
                        return;
                    }
                    Some(Ok(_)) => {
                        // Operators only listen; ignore anything they send.
                    }
                    Some(Err(_)) => {
                        return;
                    }
                }
            }
        }
    }

    let _ = socket.send(Message::Close(None)).await;
}

/// Serialize `value` as JSON and send it as a text WebSocket frame.
///
/// Returns `Err(())` if the send fails (client disconnected).
async fn send_json<T: serde::Serialize>(socket: &mut WebSocket, value: &T) -> Result<(), ()> {
    let json = serde_json::to_string(value).map_err(|_| ())?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}
