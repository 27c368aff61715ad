//! Routes for the story context.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use storybranch_story::application::command_handlers;
use storybranch_story::application::query_handlers::{self, StoryView};
use storybranch_story::domain::commands;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /init.
#[derive(Debug, Deserialize)]
pub struct InitStoryRequest {
    /// Free-form material the story is seeded from.
    pub source: String,
}

/// Response body for POST /init.
#[derive(Debug, Serialize)]
pub struct InitStoryResponse {
    /// Identifier of the new story.
    pub story_id: String,
    /// The generated seed sentence.
    pub first_sentence: String,
}

/// Request body for POST /{story_id}/contents/{contents_index}.
#[derive(Debug, Deserialize)]
pub struct AppendContentRequest {
    /// The chosen sentence.
    pub sentence: String,
}

/// Request body for POST /{story_id}/contents/final.
#[derive(Debug, Deserialize)]
pub struct FinalizeStoryRequest {
    /// The selected sentences, in reading order.
    pub sentences: Vec<String>,
}

/// Choices offered at a page.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    /// Candidate sentences.
    pub options: Vec<String>,
}

/// Every sentence accumulated so far.
#[derive(Debug, Serialize)]
pub struct SentencesResponse {
    /// Sentences in reading order.
    pub sentences: Vec<String>,
}

/// Acknowledgment returned by mutating endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Fixed success message.
    pub message: &'static str,
}

/// POST /init
#[instrument(skip_all)]
async fn init_story(
    State(state): State<AppState>,
    Json(request): Json<InitStoryRequest>,
) -> Result<Json<InitStoryResponse>, ApiError> {
    let command = commands::InitializeStory {
        correlation_id: Uuid::new_v4(),
        source: request.source,
    };

    info!(correlation_id = %command.correlation_id, "handling initialize_story command");

    let created = command_handlers::handle_initialize_story(
        &command,
        state.clock.as_ref(),
        state.story_ids.as_ref(),
        state.content_generator.as_ref(),
        state.story_repository.as_ref(),
    )
    .await?;

    Ok(Json(InitStoryResponse {
        story_id: created.story_id,
        first_sentence: created.first_sentence,
    }))
}

/// GET /
async fn list_stories(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, StoryView>>, ApiError> {
    let stories = query_handlers::list_stories(state.story_repository.as_ref()).await?;
    Ok(Json(stories))
}

/// GET /{story_id}
#[instrument(skip(state))]
async fn get_story(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
) -> Result<Json<StoryView>, ApiError> {
    let view = query_handlers::get_story_by_id(&story_id, state.story_repository.as_ref()).await?;
    Ok(Json(view))
}

/// GET /{story_id}/contents
#[instrument(skip(state))]
async fn get_all_content(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
) -> Result<Json<SentencesResponse>, ApiError> {
    let sentences =
        query_handlers::get_all_content(&story_id, state.story_repository.as_ref()).await?;
    Ok(Json(SentencesResponse { sentences }))
}

/// GET /{story_id}/contents/{contents_index}
#[instrument(skip(state))]
async fn get_content_at(
    State(state): State<AppState>,
    Path((story_id, contents_index)): Path<(String, i64)>,
) -> Result<Json<OptionsResponse>, ApiError> {
    let options = query_handlers::get_content_at(
        &story_id,
        contents_index,
        state.content_generator.as_ref(),
        state.story_repository.as_ref(),
    )
    .await?;
    Ok(Json(OptionsResponse { options }))
}

/// POST /{story_id}/contents/{contents_index}
#[instrument(skip(state, request))]
async fn append_content(
    State(state): State<AppState>,
    Path((story_id, contents_index)): Path<(String, i64)>,
    Json(request): Json<AppendContentRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let command = commands::AppendContent {
        correlation_id: Uuid::new_v4(),
        story_id,
        contents_index,
        sentence: request.sentence,
    };

    info!(correlation_id = %command.correlation_id, "handling append_content command");

    command_handlers::handle_append_content(
        &command,
        state.clock.as_ref(),
        state.content_generator.as_ref(),
        state.story_repository.as_ref(),
    )
    .await?;

    Ok(Json(MessageResponse { message: "Success" }))
}

/// POST /{story_id}/contents/final
#[instrument(skip(state, request))]
async fn finalize_story(
    State(state): State<AppState>,
    Path(story_id): Path<String>,
    Json(request): Json<FinalizeStoryRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let command = commands::FinalizeStory {
        correlation_id: Uuid::new_v4(),
        story_id,
        sentences: request.sentences,
    };

    info!(correlation_id = %command.correlation_id, "handling finalize_story command");

    command_handlers::handle_finalize_story(
        &command,
        state.clock.as_ref(),
        state.story_repository.as_ref(),
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "Story finalized successfully",
    }))
}

/// Returns the router for the story context.
///
/// The static `final` segment wins over the `{contents_index}` parameter.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_stories))
        .route("/init", post(init_story))
        .route("/{story_id}", get(get_story))
        .route("/{story_id}/contents", get(get_all_content))
        .route("/{story_id}/contents/final", post(finalize_story))
        .route(
            "/{story_id}/contents/{contents_index}",
            get(get_content_at).post(append_content),
        )
}
