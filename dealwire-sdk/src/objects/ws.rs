//! WebSocket message types for the operator deal feed.
//!
//! The `GET /api/ws` endpoint upgrades to a WebSocket connection and pushes
//! [`WsServerMessage`] JSON frames.
//!
//! # Protocol
//!
//! 1. Nothing is replayed on connect: a late-joining operator starts from
//!    the next announcement, never from a backlog.
//! 2. A [`WsServerMessage::NewDeal`] frame is pushed for every deal
//!    submitted after the connection was established.
//! 3. The server closes the connection with a normal close frame when it
//!    shuts down; slow consumers may silently miss frames under load.

use serde::{Deserialize, Serialize};

use super::deal::DealAnnouncement;

/// Server-to-client WebSocket message.
///
/// Serialized as an internally-tagged JSON object so the client can
/// dispatch on the `"type"` field:
///
/// ```json
/// {"type":"new_deal","deal":{ ... }}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsServerMessage {
    /// A freshly submitted deal, redacted for broadcast.
    NewDeal {
        /// The announcement, without the contact field.
        deal: DealAnnouncement,
    },
}
