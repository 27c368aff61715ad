//! Shared test mocks and utilities for the Storybranch story service.

mod clock;
mod generator;
mod id;
mod repository;

pub use clock::{FixedClock, SteppingClock};
pub use generator::FailingContentGenerator;
pub use id::SequenceIdGenerator;
pub use repository::{EmptyStoryRepository, FailingStoryRepository};
