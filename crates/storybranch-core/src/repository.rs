//! Story repository abstraction.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Stored representation of a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredStory {
    /// Unique story identifier.
    pub story_id: String,
    /// Accumulated sentences, seed sentence first.
    pub sentences: Vec<String>,
    /// Candidate options keyed by the page index they were generated at.
    pub options: BTreeMap<i64, Vec<String>>,
    /// The selection path fixed by finalize, if any.
    pub final_sentences: Option<Vec<String>>,
    /// Number of mutations applied since creation.
    pub version: i64,
    /// Timestamp of creation.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last mutation.
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for loading and saving stories.
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Load a story by identifier. Returns `Ok(None)` if it does not exist.
    async fn load(&self, story_id: &str) -> Result<Option<StoredStory>, DomainError>;

    /// Load every registered story.
    async fn load_all(&self) -> Result<Vec<StoredStory>, DomainError>;

    /// Register a new story.
    ///
    /// Fails with `DomainError::DuplicateStoryId` if the identifier is taken.
    async fn insert(&self, story: StoredStory) -> Result<(), DomainError>;

    /// Apply `mutate` to a registered story and return the updated story.
    ///
    /// Read, mutation and write happen as one step: concurrent updates to
    /// the same story are applied one after another and none is dropped.
    /// Fails with `DomainError::StoryNotFound` if the story does not exist.
    async fn update(
        &self,
        story_id: &str,
        mutate: &mut (dyn for<'s> FnMut(&'s mut StoredStory) + Send),
    ) -> Result<StoredStory, DomainError>;

    /// Number of registered stories.
    async fn count(&self) -> Result<usize, DomainError>;
}
