//! Placeholder content generator.

use async_trait::async_trait;
use storybranch_core::error::DomainError;
use storybranch_core::generator::ContentGenerator;

/// Seed sentence handed out for every new story.
pub const MOCK_FIRST_SENTENCE: &str = "이것은 생성된 첫 문장입니다.";

const ORDINALS: [&str; 3] = ["첫 번째", "두 번째", "세 번째"];

/// Generator returning fixed placeholder text in place of a real model.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockContentGenerator;

impl MockContentGenerator {
    /// The three placeholder options for the sentence at `position`.
    #[must_use]
    pub fn options_for(position: i64) -> Vec<String> {
        ORDINALS
            .iter()
            .map(|ordinal| format!("이것은 {position}번째 문장의 {ordinal} 선택지입니다."))
            .collect()
    }
}

#[async_trait]
impl ContentGenerator for MockContentGenerator {
    async fn generate_first_sentence(&self, _source: &str) -> Result<String, DomainError> {
        Ok(MOCK_FIRST_SENTENCE.to_owned())
    }

    async fn generate_options(&self, position: i64) -> Result<Vec<String>, DomainError> {
        Ok(Self::options_for(position))
    }
}
