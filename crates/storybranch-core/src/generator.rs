//! Content generation collaborator.
//!
//! The story service never produces narrative text itself. It asks a
//! `ContentGenerator` for the seed sentence of a new story and for the
//! candidate options offered at a page position.

use async_trait::async_trait;

use crate::error::DomainError;

/// Produces narrative text for the story service.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate the first sentence of a story seeded by `source`.
    async fn generate_first_sentence(&self, source: &str) -> Result<String, DomainError>;

    /// Generate the candidate options for the sentence at `position`.
    async fn generate_options(&self, position: i64) -> Result<Vec<String>, DomainError>;
}
