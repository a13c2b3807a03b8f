//! Notification controller, including the SSE delivery stream.

use crate::{
    extractors::{AuthenticatedUser, PaginationQuery},
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, Sse},
    routing::{get, put},
    Router,
};
use chrono::Utc;
use futures::{future, stream, Stream, StreamExt};
use quill_core::NotificationId;
use quill_service::{NotificationListResponse, UnreadCountResponse};
use serde::Serialize;
use std::convert::Infallible;
use tokio_stream::wrappers::{IntervalStream, ReceiverStream};
use tracing::debug;

/// Creates the notification router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/:id/read", put(mark_read))
        .route("/read-all", put(mark_all_read))
        .route("/stream", get(stream_notifications))
}

/// Result of a bulk read-state change.
#[derive(Debug, Serialize)]
struct MarkAllReadResponse {
    marked_read: u64,
}

/// List the caller's notifications, newest first.
async fn list_notifications(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<NotificationListResponse> {
    let response = state
        .notification_service
        .list_for_user(user.id, pagination.into())
        .await?;
    ok(response)
}

/// Count the caller's unread notifications.
async fn unread_count(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<UnreadCountResponse> {
    let unread_count = state.notification_service.unread_count(user.id).await?;
    ok(UnreadCountResponse { unread_count })
}

/// Mark one notification as read.
async fn mark_read(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    state
        .notification_service
        .mark_read(NotificationId::new(id), user.id)
        .await?;
    ok(())
}

/// Mark all of the caller's notifications as read.
async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<MarkAllReadResponse> {
    let marked_read = state.notification_service.mark_all_read(user.id).await?;
    ok(MarkAllReadResponse { marked_read })
}

/// Live notification stream.
///
/// Registers the caller's channel before the first frame is written, emits
/// an immediate ping, then interleaves `notification` frames with periodic
/// `ping` heartbeats. Teardown happens when the response stream drops (the
/// guard deregisters) or when the channel is closed by a superseding
/// connection.
async fn stream_notifications(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Opening notification stream for user {}", user.id);

    let (rx, guard) = state.hub.subscribe(user.id);

    // End-of-channel is surfaced as a `None` marker so the merged stream
    // terminates instead of degenerating into heartbeats only.
    let notifications = ReceiverStream::new(rx)
        .map(|payload| Some(Event::default().event("notification").data(payload)))
        .chain(stream::once(future::ready(None)));

    // The first interval tick fires immediately and doubles as the
    // connection-open ping.
    let interval = tokio::time::interval(state.heartbeat_interval);
    let pings = IntervalStream::new(interval)
        .map(|_| Some(Event::default().event("ping").data(Utc::now().timestamp().to_string())));

    let stream = stream::select(notifications, pings)
        .take_while(|event| future::ready(event.is_some()))
        .filter_map(move |event| {
            // The guard lives inside the stream; dropping the response on
            // disconnect runs its deregistration.
            let _ = &guard;
            future::ready(event.map(Ok))
        });

    Sse::new(stream)
}
