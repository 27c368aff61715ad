//! In-memory implementation of the `StoryRepository` trait.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use storybranch_core::error::DomainError;
use storybranch_core::repository::{StoredStory, StoryRepository};

/// Process-lifetime story registry.
///
/// Stories live in a map behind an `RwLock`; every repository call runs
/// under a single lock acquisition. Nothing is ever evicted. Clones share
/// the same registry.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoryRepository {
    stories: Arc<RwLock<HashMap<String, StoredStory>>>,
}

impl InMemoryStoryRepository {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered stories.
    pub async fn len(&self) -> usize {
        self.stories.read().await.len()
    }

    /// Whether no story has been registered.
    pub async fn is_empty(&self) -> bool {
        self.stories.read().await.is_empty()
    }
}

#[async_trait]
impl StoryRepository for InMemoryStoryRepository {
    async fn load(&self, story_id: &str) -> Result<Option<StoredStory>, DomainError> {
        Ok(self.stories.read().await.get(story_id).cloned())
    }

    async fn load_all(&self) -> Result<Vec<StoredStory>, DomainError> {
        Ok(self.stories.read().await.values().cloned().collect())
    }

    async fn insert(&self, story: StoredStory) -> Result<(), DomainError> {
        match self.stories.write().await.entry(story.story_id.clone()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateStoryId(story.story_id)),
            Entry::Vacant(slot) => {
                debug!(story_id = %story.story_id, "registered story");
                slot.insert(story);
                Ok(())
            }
        }
    }

    async fn update(
        &self,
        story_id: &str,
        mutate: &mut (dyn for<'s> FnMut(&'s mut StoredStory) + Send),
    ) -> Result<StoredStory, DomainError> {
        let mut stories = self.stories.write().await;
        let story = stories
            .get_mut(story_id)
            .ok_or_else(|| DomainError::StoryNotFound(story_id.to_owned()))?;

        mutate(story);
        debug!(story_id, version = story.version, "updated story");
        Ok(story.clone())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.stories.read().await.len())
    }
}
