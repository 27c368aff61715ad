//! Shared application state.

use std::sync::Arc;

use storybranch_core::clock::{Clock, SystemClock};
use storybranch_core::generator::ContentGenerator;
use storybranch_core::id::{StoryIdGenerator, UuidStoryIdGenerator};
use storybranch_core::repository::StoryRepository;
use storybranch_store::InMemoryStoryRepository;
use storybranch_story::domain::generator::MockContentGenerator;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock for timestamps.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// Source of new story identifiers.
    pub story_ids: Arc<dyn StoryIdGenerator>,
    /// Narrative text collaborator.
    pub content_generator: Arc<dyn ContentGenerator>,
    /// Story registry.
    pub story_repository: Arc<dyn StoryRepository>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock + Send + Sync>,
        story_ids: Arc<dyn StoryIdGenerator>,
        content_generator: Arc<dyn ContentGenerator>,
        story_repository: Arc<dyn StoryRepository>,
    ) -> Self {
        Self {
            clock,
            story_ids,
            content_generator,
            story_repository,
        }
    }

    /// Production wiring: system clock, UUID identifiers, placeholder
    /// generator and a fresh in-memory registry.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(SystemClock),
            Arc::new(UuidStoryIdGenerator),
            Arc::new(MockContentGenerator),
            Arc::new(InMemoryStoryRepository::new()),
        )
    }
}
