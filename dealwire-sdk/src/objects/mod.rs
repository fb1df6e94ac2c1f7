//! Wire types shared by the Dealwire server and its clients.

pub mod deal;
pub mod webhook;
pub mod ws;

pub use deal::{
    ClaimGrant, CreateDealAck, CreateDealRequest, DealAnnouncement, HealthResponse,
    ReleaseRequest, SkipReason,
};
pub use webhook::DealClaimedPayload;
pub use ws::WsServerMessage;
