//! Aggregate roots for the story context.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use storybranch_core::clock::Clock;
use storybranch_core::repository::StoredStory;

/// Appends at page indices below this value generate options for the next
/// page.
pub const OPTION_HORIZON: i64 = 10;

/// Coarse progress of a story.
///
/// Phases only ever advance; no operation is rejected because of the
/// current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryPhase {
    /// Only the seed sentence exists.
    Created,
    /// At least one sentence has been appended.
    Accumulating,
    /// A final sentence path has been recorded.
    Finalized,
}

/// The aggregate root for a branching story.
#[derive(Debug, Clone)]
pub struct Story {
    /// Story identifier.
    pub id: String,
    /// Current version (mutation count).
    pub(crate) version: i64,
    /// Sentences in reading order, seed sentence first.
    pub(crate) sentences: Vec<String>,
    /// Options generated on append, keyed by the append's page index.
    pub(crate) options: BTreeMap<i64, Vec<String>>,
    /// The path recorded by the last finalize.
    pub(crate) final_sentences: Option<Vec<String>>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Story {
    /// Creates a new story seeded with `first_sentence`.
    #[must_use]
    pub fn create(id: String, first_sentence: String, clock: &dyn Clock) -> Self {
        let now = clock.now();
        Self {
            id,
            version: 0,
            sentences: vec![first_sentence],
            options: BTreeMap::new(),
            final_sentences: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a story from its stored representation.
    #[must_use]
    pub fn from_stored(stored: StoredStory) -> Self {
        Self {
            id: stored.story_id,
            version: stored.version,
            sentences: stored.sentences,
            options: stored.options,
            final_sentences: stored.final_sentences,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }

    /// Returns the stored representation of this story.
    #[must_use]
    pub fn to_stored(&self) -> StoredStory {
        StoredStory {
            story_id: self.id.clone(),
            sentences: self.sentences.clone(),
            options: self.options.clone(),
            final_sentences: self.final_sentences.clone(),
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Returns the current version.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Returns the accumulated sentences.
    #[must_use]
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Returns the recorded final path, if any.
    #[must_use]
    pub fn final_sentences(&self) -> Option<&[String]> {
        self.final_sentences.as_deref()
    }

    /// Returns the furthest phase this story has reached.
    #[must_use]
    pub fn phase(&self) -> StoryPhase {
        if self.final_sentences.is_some() {
            StoryPhase::Finalized
        } else if self.sentences.len() > 1 {
            StoryPhase::Accumulating
        } else {
            StoryPhase::Created
        }
    }

    /// Returns the stored choices for page `contents_index`.
    ///
    /// Page 1 is always the seed sentence. Any other page reads the options
    /// generated by the append at `contents_index - 2`; `None` means nothing
    /// was stored for that page.
    #[must_use]
    pub fn content_at(&self, contents_index: i64) -> Option<Vec<String>> {
        if contents_index == 1 {
            return Some(self.sentences.first().cloned().into_iter().collect());
        }
        let key = contents_index.checked_sub(2)?;
        self.options.get(&key).cloned()
    }

    /// Whether an append at `contents_index` stores options for the next page.
    #[must_use]
    pub fn stores_options_for(contents_index: i64) -> bool {
        contents_index < OPTION_HORIZON
    }

    /// Appends `sentence` and, when given, records `options` under
    /// `contents_index`. The index does not constrain where the sentence
    /// lands; sentences always go to the end.
    pub fn append_sentence(
        &mut self,
        contents_index: i64,
        sentence: String,
        options: Option<Vec<String>>,
        clock: &dyn Clock,
    ) {
        self.sentences.push(sentence);
        if let Some(options) = options {
            self.options.insert(contents_index, options);
        }
        self.touch(clock);
    }

    /// Records `sentences` as the final path, replacing any earlier one.
    pub fn finalize(&mut self, sentences: Vec<String>, clock: &dyn Clock) {
        self.final_sentences = Some(sentences);
        self.touch(clock);
    }

    fn touch(&mut self, clock: &dyn Clock) {
        self.version += 1;
        self.updated_at = clock.now();
    }
}
