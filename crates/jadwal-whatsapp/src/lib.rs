//! jadwal-whatsapp: WhatsApp integration for the jadwal booking gateway
//!
//! Receives inbound message notifications from UltraMsg over a webhook and
//! sends replies back through the UltraMsg messaging API.

pub mod error;
pub mod ultramsg;
pub mod webhook;

pub use error::{Result, WhatsAppError};
pub use ultramsg::UltraMsgClient;
pub use webhook::{WebhookServer, WebhookState};
