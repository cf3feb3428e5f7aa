use crate::push as push_service;
use crate::state;
use crate::types::push::PushMessage;

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use serde::Deserialize;
use serde::Serialize;

use super::ErrorResponse;
use super::subscriptions::owner_from_headers;

fn not_configured() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorResponse {
            error: "Push notifications are not configured.",
        }),
    )
}

#[derive(Serialize)]
pub(crate) struct PublicKeyResponse {
    #[serde(rename = "publicKey")]
    pub(crate) public_key: String,
}

pub(crate) async fn push_public_key(
    State(state): State<state::AppState>,
) -> Result<Json<PublicKeyResponse>, (StatusCode, Json<ErrorResponse>)> {
    let vapid = match push_service::load_vapid_config(&state.config) {
        push_service::VapidConfigStatus::Ready(vapid) => vapid,
        push_service::VapidConfigStatus::Incomplete
        | push_service::VapidConfigStatus::Invalid(_)
        | push_service::VapidConfigStatus::Missing => return Err(not_configured()),
    };

    Ok(Json(PublicKeyResponse {
        public_key: vapid.public_key,
    }))
}

#[derive(Debug, Deserialize)]
pub(crate) struct BroadcastRequest {
    pub(crate) message: String,
    pub(crate) uri: Option<String>,
}

pub(crate) async fn push_broadcast(
    State(state): State<state::AppState>,
    headers: HeaderMap,
    Json(request): Json<BroadcastRequest>,
) -> Result<Json<push_service::BroadcastReport>, (StatusCode, Json<ErrorResponse>)> {
    let Some(sender) = state.sender.as_ref() else {
        return Err(not_configured());
    };

    let message = request.message.trim();
    if message.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message must not be empty.",
            }),
        ));
    }
    let message = PushMessage {
        message: message.to_string(),
        uri: request
            .uri
            .map(|uri| uri.trim().to_string())
            .filter(|uri| !uri.is_empty()),
    };
    let originator = owner_from_headers(&headers, &state.config.owner_cookie);

    let report = push_service::broadcast(&state.store, sender, &message, originator.as_deref())
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "failed to encode push payload");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to encode notification.",
                }),
            )
        })?;
    tracing::info!(
        sent = report.sent,
        skipped = report.skipped,
        expired = report.expired,
        failed = report.failed,
        "broadcast finished"
    );

    Ok(Json(report))
}
