//! Test generator — a `ContentGenerator` that always fails.

use async_trait::async_trait;
use storybranch_core::error::DomainError;
use storybranch_core::generator::ContentGenerator;

/// A content generator that always returns an infrastructure error. Useful
/// for asserting a code path never consults the generator.
#[derive(Debug)]
pub struct FailingContentGenerator;

#[async_trait]
impl ContentGenerator for FailingContentGenerator {
    async fn generate_first_sentence(&self, _source: &str) -> Result<String, DomainError> {
        Err(DomainError::Infrastructure("generator unavailable".into()))
    }

    async fn generate_options(&self, _position: i64) -> Result<Vec<String>, DomainError> {
        Err(DomainError::Infrastructure("generator unavailable".into()))
    }
}
