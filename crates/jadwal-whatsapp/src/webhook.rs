//! Webhook server for receiving WhatsApp messages from UltraMsg
//!
//! Hosts two routes: the inbound message webhook and the operator-facing
//! schedule viewer. The webhook never fails outwardly once the payload
//! shape is valid; command failures travel back as chat replies only.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use jadwal_core::{parse_command, reply, Command, Schedule, ScheduleStore};

use crate::error::{Result, WhatsAppError};
use crate::ultramsg::UltraMsgClient;

/// Webhook server state
#[derive(Clone)]
pub struct WebhookState {
    pub client: Arc<UltraMsgClient>,
    pub store: Arc<ScheduleStore>,
    pub access_token: Option<String>,
}

/// Webhook server
pub struct WebhookServer {
    addr: SocketAddr,
    state: WebhookState,
}

impl WebhookServer {
    /// Create a new webhook server
    pub fn new(
        addr: SocketAddr,
        client: Arc<UltraMsgClient>,
        store: Arc<ScheduleStore>,
        access_token: Option<String>,
    ) -> Self {
        let state = WebhookState {
            client,
            store,
            access_token,
        };

        Self { addr, state }
    }

    /// Start the webhook server
    pub async fn start(self) -> Result<()> {
        info!("Starting WhatsApp webhook server on {}", self.addr);

        let app = routes().with_state(Arc::new(self.state));

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| WhatsAppError::Config(e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| WhatsAppError::Http(e.to_string()))?;

        Ok(())
    }
}

/// Create the webhook router
pub fn routes() -> Router<Arc<WebhookState>> {
    Router::new()
        .route("/webhook", post(handle_webhook))
        .route("/lihat-jadwal", get(view_schedule))
}

// ============================================================================
// Request/Response types
// ============================================================================

/// Inbound UltraMsg webhook payload
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    data: Option<MessageData>,
}

/// Nested message data
#[derive(Debug, Default, Deserialize)]
pub struct MessageData {
    #[serde(default)]
    body: String,
    #[serde(default)]
    from: String,
}

/// Acknowledgement body for accepted webhooks
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub status: &'static str,
}

/// Generic error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

// ============================================================================
// Handler functions
// ============================================================================

/// Handle an inbound WhatsApp message notification
async fn handle_webhook(
    State(state): State<Arc<WebhookState>>,
    payload: std::result::Result<Json<WebhookPayload>, JsonRejection>,
) -> std::result::Result<Json<AckResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Ok(Json(payload)) = payload else {
        return Err(bad_request("Invalid payload"));
    };
    let Some(data) = payload.data else {
        return Err(bad_request("Invalid payload"));
    };

    if data.body.is_empty() || data.from.is_empty() {
        return Err(bad_request("Missing 'body' or 'from' in data"));
    }

    info!("Received WhatsApp message from {}: {}", data.from, data.body);

    // Parse and apply under one store guard so concurrent deliveries cannot
    // race on the same slot. A successful booking is persisted before the
    // reply text leaves this block.
    let reply_text = state
        .store
        .update(|schedule| match parse_command(&data.body, schedule) {
            Command::ShowSchedule => (reply::schedule_overview(schedule), false),
            Command::Book { slot, team } => {
                schedule.book(&slot, &team);
                info!("Booked slot {} for {}", slot, team);
                (reply::booking_confirmed(&slot, &team), true)
            }
            Command::MalformedBooking => (reply::MALFORMED_BOOKING.to_string(), false),
            Command::SlotUnavailable => (reply::SLOT_UNAVAILABLE.to_string(), false),
            Command::Unrecognized => (reply::GREETING.to_string(), false),
        })
        .await;

    match reply_text {
        Ok(text) => {
            // Fire-and-forget: delivery failure is logged and never alters
            // the webhook acknowledgement.
            let client = Arc::clone(&state.client);
            let to = data.from.clone();
            tokio::spawn(async move {
                if let Err(e) = client.send_message(&to, &text).await {
                    error!("Failed to send reply to {}: {}", to, e);
                }
            });
        }
        Err(e) => {
            error!("Schedule store error: {}", e);
        }
    }

    Ok(Json(AckResponse { status: "ok" }))
}

/// Query parameters for the schedule viewer
#[derive(Debug, Deserialize)]
pub struct ViewQuery {
    token: Option<String>,
}

/// Operator endpoint returning the raw schedule, gated by a shared secret
async fn view_schedule(
    State(state): State<Arc<WebhookState>>,
    Query(query): Query<ViewQuery>,
) -> std::result::Result<Json<Schedule>, (StatusCode, Json<ErrorResponse>)> {
    let authorized = match (&state.access_token, &query.token) {
        (Some(expected), Some(provided)) => provided == expected,
        _ => false,
    };

    if !authorized {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Unauthorized".to_string(),
            }),
        ));
    }

    match state.store.load().await {
        Ok(schedule) => Ok(Json(schedule)),
        Err(e) => {
            error!("Failed to load schedule: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
