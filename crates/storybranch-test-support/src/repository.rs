//! Test repositories — mock `StoryRepository` implementations for tests.

use async_trait::async_trait;
use storybranch_core::error::DomainError;
use storybranch_core::repository::{StoredStory, StoryRepository};

/// A story repository that never finds anything and silently accepts
/// inserts. Useful for testing "story not found" scenarios.
#[derive(Debug)]
pub struct EmptyStoryRepository;

#[async_trait]
impl StoryRepository for EmptyStoryRepository {
    async fn load(&self, _story_id: &str) -> Result<Option<StoredStory>, DomainError> {
        Ok(None)
    }

    async fn load_all(&self) -> Result<Vec<StoredStory>, DomainError> {
        Ok(vec![])
    }

    async fn insert(&self, _story: StoredStory) -> Result<(), DomainError> {
        Ok(())
    }

    async fn update(
        &self,
        story_id: &str,
        _mutate: &mut (dyn for<'s> FnMut(&'s mut StoredStory) + Send),
    ) -> Result<StoredStory, DomainError> {
        Err(DomainError::StoryNotFound(story_id.to_owned()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(0)
    }
}

/// A story repository that always returns an infrastructure error. Useful
/// for testing error-handling paths.
#[derive(Debug)]
pub struct FailingStoryRepository;

#[async_trait]
impl StoryRepository for FailingStoryRepository {
    async fn load(&self, _story_id: &str) -> Result<Option<StoredStory>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn load_all(&self) -> Result<Vec<StoredStory>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn insert(&self, _story: StoredStory) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn update(
        &self,
        _story_id: &str,
        _mutate: &mut (dyn for<'s> FnMut(&'s mut StoredStory) + Send),
    ) -> Result<StoredStory, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
