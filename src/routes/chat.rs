//! Chat page, sending and deleting.

use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use leptos::prelude::*;
use serde::Deserialize;
use tracing::{info, warn};

use super::{RequireSession, failure_status, page};
use crate::AppState;
use crate::error::AppError;
use crate::session::{Credentials, PendingSend, SendError, Transcript};
use crate::ui::NavState;
use crate::ui::chat::{ChatShell, ChatView};

#[derive(Debug, Default, Deserialize)]
pub(super) struct ChatQuery {
    #[serde(default)]
    q: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SendForm {
    #[serde(default)]
    prompt: String,
}

/// Inline error plus the prompt to keep in the input box.
#[derive(Debug, Default)]
struct Outcome {
    error: Option<String>,
    draft: String,
}

fn chat_response(
    status: StatusCode,
    credentials: &Credentials,
    transcript: &Transcript,
    query: &str,
    outcome: Outcome,
) -> Response {
    let state = ChatView {
        entries: transcript.search(query),
        total: transcript.len(),
        query: query.trim().to_string(),
        error: outcome.error,
        sending: transcript.is_sending(),
        draft: outcome.draft,
    };
    page(
        status,
        "Chat",
        NavState::from_credentials(Some(credentials)),
        view! { <ChatShell state=state /> },
    )
}

pub(super) async fn chat_page(
    State(state): State<AppState>,
    RequireSession(credentials): RequireSession,
    Query(query): Query<ChatQuery>,
) -> Result<Response, AppError> {
    let transcript = state.transcripts.get_or_create(&credentials.token);
    let query = query.q.unwrap_or_default();
    let mut outcome = Outcome::default();

    match state.api.chats(&credentials.token).probe().await {
        Ok(chats) => {
            transcript.replace_all(chats);
            transcript.mark_verified();
        }
        Err(err) if err.is_unauthorized() || !transcript.is_verified() => {
            warn!(name: "auth.session.probe_failed", error = %err, "Session rejected");
            state.transcripts.remove(&credentials.token);
            return Err(AppError::Unauthorized);
        }
        Err(err) => {
            warn!(name: "chat.history.failed", error = %err, "Could not refresh history");
            outcome.error = Some(err.user_message("Failed to load chats"));
        }
    }

    Ok(chat_response(
        StatusCode::OK,
        &credentials,
        &transcript,
        &query,
        outcome,
    ))
}

pub(super) async fn send_chat(
    State(state): State<AppState>,
    RequireSession(credentials): RequireSession,
    Form(form): Form<SendForm>,
) -> Result<Response, AppError> {
    let transcript = state.transcripts.get_or_create(&credentials.token);

    let send = match PendingSend::begin(&transcript, &form.prompt) {
        Ok(send) => send,
        Err(err) => {
            let status = match err {
                SendError::EmptyPrompt => StatusCode::UNPROCESSABLE_ENTITY,
                SendError::InFlight => StatusCode::CONFLICT,
            };
            let outcome = Outcome {
                error: Some(err.to_string()),
                draft: form.prompt,
            };
            return Ok(chat_response(status, &credentials, &transcript, "", outcome));
        }
    };

    match state.api.chats(&credentials.token).create(form.prompt.trim()).await {
        Ok(chat) => {
            let id = chat.id.clone();
            send.confirm(chat);
            info!(name: "chat.send.ok", chat_id = %id, "Message sent");
            Ok(Redirect::to("/").into_response())
        }
        Err(err) => {
            drop(send);
            if err.is_unauthorized() {
                state.transcripts.remove(&credentials.token);
                return Err(err.into());
            }
            warn!(name: "chat.send.rolled_back", error = %err, "Send failed, optimistic entry removed");
            let outcome = Outcome {
                error: Some(err.user_message("Error sending message")),
                draft: form.prompt,
            };
            Ok(chat_response(
                failure_status(&err),
                &credentials,
                &transcript,
                "",
                outcome,
            ))
        }
    }
}

pub(super) async fn delete_chat(
    State(state): State<AppState>,
    RequireSession(credentials): RequireSession,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let transcript = state.transcripts.get_or_create(&credentials.token);

    match state.api.chats(&credentials.token).delete(&id).await {
        Ok(()) => {
            transcript.remove(&id);
            info!(name: "chat.delete.ok", chat_id = %id, "Chat deleted");
            Ok(Redirect::to("/").into_response())
        }
        Err(err) if err.is_unauthorized() => {
            state.transcripts.remove(&credentials.token);
            Err(err.into())
        }
        Err(err) => {
            warn!(name: "chat.delete.failed", chat_id = %id, error = %err, "Delete failed");
            let outcome = Outcome {
                error: Some("Failed to delete chat".to_string()),
                draft: String::new(),
            };
            Ok(chat_response(
                failure_status(&err),
                &credentials,
                &transcript,
                "",
                outcome,
            ))
        }
    }
}
