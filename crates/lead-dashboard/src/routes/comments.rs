//! Comment thread routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use lead_sync::Comment;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

/// A comment as shown in a thread.
#[derive(Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    /// Whether the operator wrote it.
    pub from_self: bool,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        let from_self = comment.is_from_self();
        Self { comment, from_self }
    }
}

/// Message composition request.
#[derive(Deserialize)]
pub struct SendMessage {
    pub text: String,
}

/// Messaging availability.
#[derive(Serialize)]
pub struct Messaging {
    pub configured: bool,
}

/// Fetch a lead's thread, oldest first.
pub async fn thread_api(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
) -> Result<Json<Vec<CommentView>>> {
    let comments =
        lead_sync::fetch_comments_for_lead(state.store.as_ref(), &state.config, &lead_id).await?;
    Ok(Json(comments.into_iter().map(CommentView::from).collect()))
}

/// Post a message to a lead's thread.
pub async fn send_api(
    State(state): State<AppState>,
    Path(lead_id): Path<String>,
    Json(message): Json<SendMessage>,
) -> Result<StatusCode> {
    lead_sync::send_message_to(
        state.store.as_ref(),
        &state.config,
        &lead_id,
        message.text.trim(),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Whether message composition should be offered.
pub async fn messaging_api(State(state): State<AppState>) -> Json<Messaging> {
    Json(Messaging {
        configured: lead_sync::is_messaging_configured(&state.config),
    })
}
