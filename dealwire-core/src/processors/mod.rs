//! Background processors.
//!
//! Both run as independent tasks beside the request path and stop on the
//! shared shutdown watch channel: the `WebhookSender` drains claim events
//! into best-effort downstream notifications, and the `RetentionSweeper`
//! bounds memory by evicting stale deals.

pub mod retention;
pub mod webhook_sender;

pub use retention::RetentionSweeper;
pub use webhook_sender::{WebhookConfig, WebhookSender};
