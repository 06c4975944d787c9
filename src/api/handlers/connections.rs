//! Connection registry handlers: listing and manual notification.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{ActiveConnectionsResponse, NotifyUserRequest, NotifyUserResponse};
use crate::app_state::AppState;
use crate::domain::{Notification, UserId};
use crate::error::{ErrorResponse, GatewayError};

/// `GET /active-connections` — List identities with live connections.
#[utoipa::path(
    get,
    path = "/active-connections",
    tag = "Connections",
    summary = "List connected users",
    description = "Returns every user identity that currently holds at least one open WebSocket.",
    responses(
        (status = 200, description = "Current registry key set", body = ActiveConnectionsResponse),
    )
)]
pub async fn active_connections(State(state): State<AppState>) -> impl IntoResponse {
    let active_connections = state
        .notification_service
        .active_users()
        .await
        .into_iter()
        .map(String::from)
        .collect();
    Json(ActiveConnectionsResponse { active_connections })
}

/// `POST /notify-user` — Push a notification to every connection of a user.
///
/// Any `notification` shape is accepted and the reply never reflects
/// delivery. A request without a usable `userId` is logged and dropped.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] only when the body is not a
/// JSON object.
#[utoipa::path(
    post,
    path = "/notify-user",
    tag = "Connections",
    summary = "Notify a user",
    description = "Fans a notification out to all live connections of the user. The response does not reflect whether any connection received it.",
    request_body = NotifyUserRequest,
    responses(
        (status = 200, description = "Notification dispatched", body = NotifyUserResponse),
        (status = 400, description = "Body is not a JSON object", body = ErrorResponse),
    )
)]
pub async fn notify_user(
    State(state): State<AppState>,
    payload: Result<Json<NotifyUserRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let notification = Notification::from_payload(req.notification);

    match req
        .user_id
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .map(UserId::parse)
    {
        Some(Ok(user_id)) => {
            tracing::info!(%user_id, kind = notification.kind(), "manual notification");
            state
                .notification_service
                .send(&user_id, &notification)
                .await;
        }
        _ => {
            tracing::warn!(kind = notification.kind(), "manual notification without user id dropped");
        }
    }

    Ok(Json(NotifyUserResponse::sent()))
}

/// Connection routes mounted at the root level.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/active-connections", get(active_connections))
        .route("/notify-user", post(notify_user))
}
