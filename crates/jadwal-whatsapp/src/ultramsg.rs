//! UltraMsg API client for WhatsApp

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, WhatsAppError};

const ULTRAMSG_BASE_URL: &str = "https://api.ultramsg.com";

/// UltraMsg API client
#[derive(Debug, Clone)]
pub struct UltraMsgClient {
    client: Client,
    instance_id: String,
    token: String,
    base_url: String,
}

/// Outgoing message payload
#[derive(Debug, Serialize)]
struct SendMessagePayload {
    to: String,
    body: String,
}

impl UltraMsgClient {
    /// Create a new UltraMsg client
    pub fn new(instance_id: String, token: String) -> Self {
        Self {
            client: Client::new(),
            instance_id,
            token,
            base_url: ULTRAMSG_BASE_URL.to_string(),
        }
    }

    /// Send a WhatsApp message.
    ///
    /// Best-effort delivery: callers treat a failure as log-only and never
    /// surface it to the webhook source.
    pub async fn send_message(&self, to: &str, body: &str) -> Result<()> {
        info!("Sending WhatsApp message to {}", to);

        let url = format!("{}/{}/messages/chat", self.base_url, self.instance_id);

        let payload = SendMessagePayload {
            to: to.to_string(),
            body: body.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .query(&[("token", self.token.as_str())])
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(WhatsAppError::Api(format!(
                "Failed to send message: {} - {}",
                status, text
            )));
        }

        debug!("UltraMsg accepted message for {}", to);
        Ok(())
    }
}
