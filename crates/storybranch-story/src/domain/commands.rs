//! Commands for the story context.

use uuid::Uuid;

/// Command to start a new story.
#[derive(Debug, Clone)]
pub struct InitializeStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Free-form material the story is seeded from.
    pub source: String,
}

/// Command to append a chosen sentence to a story.
#[derive(Debug, Clone)]
pub struct AppendContent {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story to append to.
    pub story_id: String,
    /// Page position the sentence was chosen at.
    pub contents_index: i64,
    /// The chosen sentence.
    pub sentence: String,
}

/// Command to fix the final sentence path of a story.
#[derive(Debug, Clone)]
pub struct FinalizeStory {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The story to finalize.
    pub story_id: String,
    /// The selected sentences, in reading order.
    pub sentences: Vec<String>,
}
