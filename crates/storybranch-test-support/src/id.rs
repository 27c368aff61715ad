//! Test id generator — predetermined story identifiers.

use std::collections::VecDeque;
use std::sync::Mutex;

use storybranch_core::id::StoryIdGenerator;

/// An id generator that hands out identifiers from a predetermined sequence.
/// Repeating an entry simulates an id collision.
#[derive(Debug)]
pub struct SequenceIdGenerator {
    ids: Mutex<VecDeque<String>>,
}

impl SequenceIdGenerator {
    /// Create a new `SequenceIdGenerator` with the given identifiers.
    #[must_use]
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Mutex::new(ids.into_iter().map(Into::into).collect()),
        }
    }
}

impl StoryIdGenerator for SequenceIdGenerator {
    /// # Panics
    ///
    /// Panics if the sequence is exhausted or the internal mutex is poisoned.
    fn next_id(&self) -> String {
        self.ids
            .lock()
            .unwrap()
            .pop_front()
            .expect("SequenceIdGenerator exhausted")
    }
}
