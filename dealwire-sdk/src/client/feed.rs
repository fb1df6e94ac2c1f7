//! WebSocket listener for the operator deal feed.

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use super::ClientError;
use crate::objects::deal::DealAnnouncement;
use crate::objects::ws::WsServerMessage;

/// A connected operator deal feed.
///
/// Wraps the `GET /api/ws` WebSocket stream and yields one
/// [`DealAnnouncement`] per `new_deal` frame. There is no backlog: the
/// feed starts from the first deal submitted after the connection was
/// established.
pub struct DealFeed {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl DealFeed {
    /// Connect to the deal feed of the server at `base_url`.
    ///
    /// `http`/`https` base URLs are mapped to `ws`/`wss`.
    pub async fn connect(base_url: &Url) -> Result<Self, ClientError> {
        let mut ws_url = base_url.join("/api/ws")?;
        let scheme = match ws_url.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => return Err(ClientError::WsScheme(other.to_owned())),
        };
        ws_url
            .set_scheme(scheme)
            .map_err(|_| ClientError::WsScheme(scheme.to_owned()))?;

        let (stream, _response) = connect_async(ws_url.as_str()).await?;
        Ok(Self { stream })
    }

    /// Wait for the next deal announcement.
    ///
    /// Returns `Ok(None)` once the server closes the connection. Non-text
    /// frames (pings, pongs) are handled transparently.
    pub async fn next_deal(&mut self) -> Result<Option<DealAnnouncement>, ClientError> {
        while let Some(frame) = self.stream.next().await {
            match frame? {
                Message::Text(text) => {
                    let msg: WsServerMessage = serde_json::from_str(&text)?;
                    let WsServerMessage::NewDeal { deal } = msg;
                    return Ok(Some(deal));
                }
                Message::Close(_) => return Ok(None),
                _ => continue,
            }
        }
        Ok(None)
    }
}
