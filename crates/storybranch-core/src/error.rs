//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// No story is registered under the given identifier.
    #[error("Story not found")]
    StoryNotFound(String),

    /// A story with the given identifier already exists.
    #[error("story already exists: {0}")]
    DuplicateStoryId(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_not_found_message_does_not_leak_id() {
        let err = DomainError::StoryNotFound("abc".into());
        assert_eq!(err.to_string(), "Story not found");
    }

    #[test]
    fn test_duplicate_story_id_names_the_id() {
        let err = DomainError::DuplicateStoryId("abc".into());
        assert_eq!(err.to_string(), "story already exists: abc");
    }
}
