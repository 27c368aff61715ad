//! Query handlers for the story context.
//!
//! This module contains query handlers that load stories and return
//! read-only views.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use storybranch_core::error::DomainError;
use storybranch_core::generator::ContentGenerator;
use storybranch_core::repository::StoryRepository;
use tracing::{debug, instrument};

use crate::application::command_handlers::load_story;
use crate::domain::aggregates::{Story, StoryPhase};

/// Read-only view of a story aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct StoryView {
    /// The story identifier.
    pub story_id: String,
    /// Accumulated sentences, seed sentence first.
    pub sentences: Vec<String>,
    /// Stored options keyed by page index.
    pub options: BTreeMap<i64, Vec<String>>,
    /// The recorded final path, omitted until finalize is called.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_sentences: Option<Vec<String>>,
    /// Furthest phase reached.
    pub phase: StoryPhase,
    /// Current version (mutation count).
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<Story> for StoryView {
    fn from(story: Story) -> Self {
        let phase = story.phase();
        Self {
            story_id: story.id,
            sentences: story.sentences,
            options: story.options,
            final_sentences: story.final_sentences,
            phase,
            version: story.version,
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

/// Retrieves a story by its ID.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if no story exists for the ID.
pub async fn get_story_by_id(
    story_id: &str,
    repo: &dyn StoryRepository,
) -> Result<StoryView, DomainError> {
    load_story(story_id, repo).await.map(StoryView::from)
}

/// Returns the choices offered at page `contents_index`.
///
/// When nothing was stored for the page, fresh placeholders are generated
/// for it and returned without being saved.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if no story exists for the ID, or
/// `DomainError` if generation fails.
#[instrument(skip(generator, repo))]
pub async fn get_content_at(
    story_id: &str,
    contents_index: i64,
    generator: &dyn ContentGenerator,
    repo: &dyn StoryRepository,
) -> Result<Vec<String>, DomainError> {
    let story = load_story(story_id, repo).await?;
    if let Some(options) = story.content_at(contents_index) {
        return Ok(options);
    }
    debug!("no stored options for page, synthesizing");
    generator.generate_options(contents_index).await
}

/// Returns every sentence accumulated so far.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if no story exists for the ID.
pub async fn get_all_content(
    story_id: &str,
    repo: &dyn StoryRepository,
) -> Result<Vec<String>, DomainError> {
    let story = load_story(story_id, repo).await?;
    Ok(story.sentences)
}

/// Returns the whole registry keyed by story ID.
///
/// # Errors
///
/// Returns `DomainError` if the repository fails.
pub async fn list_stories(
    repo: &dyn StoryRepository,
) -> Result<BTreeMap<String, StoryView>, DomainError> {
    let stories = repo.load_all().await?;
    Ok(stories
        .into_iter()
        .map(|stored| (stored.story_id.clone(), Story::from_stored(stored).into()))
        .collect())
}
