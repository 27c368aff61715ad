//! Story identifier generation.

use uuid::Uuid;

/// Source of fresh story identifiers.
pub trait StoryIdGenerator: Send + Sync {
    /// Returns a new identifier. Implementations should make collisions
    /// unlikely; callers still insert-if-absent and retry on a repeat.
    fn next_id(&self) -> String;
}

/// Production generator backed by random (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidStoryIdGenerator;

impl StoryIdGenerator for UuidStoryIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
