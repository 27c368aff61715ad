//! Command handlers for the story context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic. Mutations run inside a single repository
//! update, so concurrent commands on one story never overwrite each other.

use storybranch_core::clock::Clock;
use storybranch_core::error::DomainError;
use storybranch_core::generator::ContentGenerator;
use storybranch_core::id::StoryIdGenerator;
use storybranch_core::repository::{StoredStory, StoryRepository};
use tracing::{info, instrument, warn};

use crate::domain::aggregates::Story;
use crate::domain::commands::{AppendContent, FinalizeStory, InitializeStory};

/// Story ids drawn before a collision is reported.
pub const MAX_ATTEMPTS: u32 = 3;

/// Result of a successful `InitializeStory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitializedStory {
    /// Identifier of the new story.
    pub story_id: String,
    /// The generated seed sentence.
    pub first_sentence: String,
}

/// Loads a story, mapping absence to `DomainError::StoryNotFound`.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if no story exists for the ID, or
/// whatever the repository reports.
pub(crate) async fn load_story(
    story_id: &str,
    repo: &dyn StoryRepository,
) -> Result<Story, DomainError> {
    repo.load(story_id)
        .await?
        .map(Story::from_stored)
        .ok_or_else(|| DomainError::StoryNotFound(story_id.to_owned()))
}

/// Applies `mutate` to the story as one atomic repository update.
async fn update_story<F>(
    story_id: &str,
    repo: &dyn StoryRepository,
    mut mutate: F,
) -> Result<(), DomainError>
where
    F: FnMut(&mut Story) + Send,
{
    let mut apply = |stored: &mut StoredStory| {
        let mut story = Story::from_stored(stored.clone());
        mutate(&mut story);
        *stored = story.to_stored();
    };

    repo.update(story_id, &mut apply).await?;
    Ok(())
}

/// Handles the `InitializeStory` command: generates the seed sentence and
/// registers a new story under a fresh identifier.
///
/// An identifier that is already taken is never overwritten; a new one is
/// drawn instead.
///
/// # Errors
///
/// Returns `DomainError` if generation fails, if every attempt collides, or
/// if the repository fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub async fn handle_initialize_story(
    command: &InitializeStory,
    clock: &dyn Clock,
    ids: &dyn StoryIdGenerator,
    generator: &dyn ContentGenerator,
    repo: &dyn StoryRepository,
) -> Result<InitializedStory, DomainError> {
    info!(source = %command.source, "received story init request");

    let first_sentence = generator.generate_first_sentence(&command.source).await?;

    let mut attempt = 1;
    loop {
        let story = Story::create(ids.next_id(), first_sentence.clone(), clock);

        match repo.insert(story.to_stored()).await {
            Ok(()) => {
                info!(story_id = %story.id, %first_sentence, "initialized story");
                return Ok(InitializedStory {
                    story_id: story.id,
                    first_sentence,
                });
            }
            Err(err @ DomainError::DuplicateStoryId(_)) if attempt < MAX_ATTEMPTS => {
                warn!(%err, attempt, "story id collision, drawing a new id");
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Handles the `AppendContent` command: appends the sentence and, for early
/// pages, stores the options for the following page.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if the story does not exist, or
/// `DomainError` if generation or persistence fails.
#[instrument(
    skip_all,
    fields(
        correlation_id = %command.correlation_id,
        story_id = %command.story_id,
        contents_index = command.contents_index,
    )
)]
pub async fn handle_append_content(
    command: &AppendContent,
    clock: &dyn Clock,
    generator: &dyn ContentGenerator,
    repo: &dyn StoryRepository,
) -> Result<(), DomainError> {
    // Existence is checked before the generator is consulted.
    load_story(&command.story_id, repo).await?;

    let options = if Story::stores_options_for(command.contents_index) {
        Some(
            generator
                .generate_options(command.contents_index + 1)
                .await?,
        )
    } else {
        None
    };

    update_story(&command.story_id, repo, |story| {
        story.append_sentence(
            command.contents_index,
            command.sentence.clone(),
            options.clone(),
            clock,
        );
    })
    .await?;

    info!(sentence = %command.sentence, "appended sentence");
    Ok(())
}

/// Handles the `FinalizeStory` command: records the final sentence path,
/// replacing any earlier one.
///
/// # Errors
///
/// Returns `DomainError::StoryNotFound` if the story does not exist, or
/// `DomainError` if persistence fails.
#[instrument(
    skip_all,
    fields(correlation_id = %command.correlation_id, story_id = %command.story_id)
)]
pub async fn handle_finalize_story(
    command: &FinalizeStory,
    clock: &dyn Clock,
    repo: &dyn StoryRepository,
) -> Result<(), DomainError> {
    update_story(&command.story_id, repo, |story| {
        story.finalize(command.sentences.clone(), clock);
    })
    .await?;

    info!(final_sentences = ?command.sentences, "finalized story");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use storybranch_core::error::DomainError;
    use storybranch_core::repository::StoryRepository;
    use storybranch_store::InMemoryStoryRepository;
    use storybranch_test_support::{
        EmptyStoryRepository, FailingContentGenerator, FailingStoryRepository, FixedClock,
        SequenceIdGenerator,
    };
    use uuid::Uuid;

    use crate::application::command_handlers::{
        InitializedStory, handle_append_content, handle_finalize_story, handle_initialize_story,
    };
    use crate::domain::commands::{AppendContent, FinalizeStory, InitializeStory};
    use crate::domain::generator::{MOCK_FIRST_SENTENCE, MockContentGenerator};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
    }

    async fn init(repo: &InMemoryStoryRepository, ids: &SequenceIdGenerator) -> InitializedStory {
        let command = InitializeStory {
            correlation_id: Uuid::new_v4(),
            source: "x".into(),
        };
        handle_initialize_story(&command, &clock(), ids, &MockContentGenerator, repo)
            .await
            .unwrap()
    }

    fn append(story_id: &str, contents_index: i64, sentence: &str) -> AppendContent {
        AppendContent {
            correlation_id: Uuid::new_v4(),
            story_id: story_id.into(),
            contents_index,
            sentence: sentence.into(),
        }
    }

    #[tokio::test]
    async fn test_handle_initialize_story_registers_seeded_story() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let ids = SequenceIdGenerator::new(["s-1"]);

        // Act
        let created = init(&repo, &ids).await;

        // Assert
        assert_eq!(created.story_id, "s-1");
        assert_eq!(created.first_sentence, MOCK_FIRST_SENTENCE);

        let stored = repo.load("s-1").await.unwrap().unwrap();
        assert_eq!(stored.sentences, vec![MOCK_FIRST_SENTENCE.to_owned()]);
        assert!(stored.options.is_empty());
        assert_eq!(stored.final_sentences, None);
        assert_eq!(stored.created_at, clock().0);
    }

    #[tokio::test]
    async fn test_handle_initialize_story_never_overwrites_on_id_collision() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let ids = SequenceIdGenerator::new(["same", "same", "fresh"]);
        let first = init(&repo, &ids).await;
        handle_append_content(
            &append(&first.story_id, 1, "kept"),
            &clock(),
            &MockContentGenerator,
            &repo,
        )
        .await
        .unwrap();

        // Act
        let second = init(&repo, &ids).await;

        // Assert
        assert_eq!(second.story_id, "fresh");
        let original = repo.load("same").await.unwrap().unwrap();
        assert_eq!(original.sentences.len(), 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_handle_initialize_story_gives_up_after_repeated_collisions() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let ids = SequenceIdGenerator::new(["dup", "dup", "dup", "dup"]);
        init(&repo, &ids).await;
        let command = InitializeStory {
            correlation_id: Uuid::new_v4(),
            source: "x".into(),
        };

        // Act
        let result =
            handle_initialize_story(&command, &clock(), &ids, &MockContentGenerator, &repo).await;

        // Assert
        match result.unwrap_err() {
            DomainError::DuplicateStoryId(id) => assert_eq!(id, "dup"),
            other => panic!("expected DuplicateStoryId, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_handle_initialize_story_propagates_generator_failure() {
        let repo = InMemoryStoryRepository::new();
        let ids = SequenceIdGenerator::new(["s-1"]);
        let command = InitializeStory {
            correlation_id: Uuid::new_v4(),
            source: "x".into(),
        };

        let result =
            handle_initialize_story(&command, &clock(), &ids, &FailingContentGenerator, &repo)
                .await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_handle_append_content_stores_options_for_next_page() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let ids = SequenceIdGenerator::new(["s-1"]);
        init(&repo, &ids).await;

        // Act
        handle_append_content(&append("s-1", 3, "three"), &clock(), &MockContentGenerator, &repo)
            .await
            .unwrap();

        // Assert
        let stored = repo.load("s-1").await.unwrap().unwrap();
        assert_eq!(stored.sentences.last().unwrap(), "three");
        assert_eq!(
            stored.options.get(&3),
            Some(&MockContentGenerator::options_for(4))
        );
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_handle_append_content_skips_options_past_horizon() {
        let repo = InMemoryStoryRepository::new();
        let ids = SequenceIdGenerator::new(["s-1"]);
        init(&repo, &ids).await;

        handle_append_content(&append("s-1", 10, "ten"), &clock(), &FailingContentGenerator, &repo)
            .await
            .unwrap();

        let stored = repo.load("s-1").await.unwrap().unwrap();
        assert_eq!(stored.sentences.len(), 2);
        assert!(stored.options.is_empty());
    }

    #[tokio::test]
    async fn test_handle_append_content_returns_not_found_for_unknown_story() {
        // Arrange
        let repo = EmptyStoryRepository;

        // Act
        let result = handle_append_content(
            &append("missing", 1, "x"),
            &clock(),
            &FailingContentGenerator,
            &repo,
        )
        .await;

        // Assert
        match result.unwrap_err() {
            DomainError::StoryNotFound(id) => assert_eq!(id, "missing"),
            other => panic!("expected StoryNotFound, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_all_succeed_and_are_retained() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let ids = SequenceIdGenerator::new(["s-1"]);
        init(&repo, &ids).await;

        // Act
        let mut handles = Vec::new();
        for i in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                let command = append("s-1", 20, &format!("sentence {i}"));
                handle_append_content(&command, &clock(), &MockContentGenerator, &repo).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // Assert
        let stored = repo.load("s-1").await.unwrap().unwrap();
        assert_eq!(stored.sentences.len(), 9);
        assert!((0..8).all(|i| stored.sentences.contains(&format!("sentence {i}"))));
        assert_eq!(stored.version, 8);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_and_finalize_never_fail() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let ids = SequenceIdGenerator::new(["s-1"]);
        init(&repo, &ids).await;

        // Act
        let mut appends = Vec::new();
        for i in 0..50 {
            let repo = repo.clone();
            appends.push(tokio::spawn(async move {
                let command = append("s-1", i % 12, &format!("sentence {i}"));
                handle_append_content(&command, &clock(), &MockContentGenerator, &repo).await
            }));
        }
        let finalizer = {
            let repo = repo.clone();
            tokio::spawn(async move {
                let command = FinalizeStory {
                    correlation_id: Uuid::new_v4(),
                    story_id: "s-1".into(),
                    sentences: vec!["end".into()],
                };
                handle_finalize_story(&command, &clock(), &repo).await
            })
        };
        for handle in appends {
            handle.await.unwrap().unwrap();
        }
        finalizer.await.unwrap().unwrap();

        // Assert
        let stored = repo.load("s-1").await.unwrap().unwrap();
        assert_eq!(stored.sentences.len(), 51);
        assert_eq!(stored.final_sentences, Some(vec!["end".to_owned()]));
        assert_eq!(stored.version, 51);
    }

    #[tokio::test]
    async fn test_handle_finalize_story_overwrites_final_sentences() {
        // Arrange
        let repo = InMemoryStoryRepository::new();
        let ids = SequenceIdGenerator::new(["s-1"]);
        init(&repo, &ids).await;
        let finalize = |sentences: Vec<&str>| FinalizeStory {
            correlation_id: Uuid::new_v4(),
            story_id: "s-1".into(),
            sentences: sentences.into_iter().map(str::to_owned).collect(),
        };

        // Act
        handle_finalize_story(&finalize(vec!["a", "b"]), &clock(), &repo)
            .await
            .unwrap();
        let after_first = repo.load("s-1").await.unwrap().unwrap();
        handle_finalize_story(&finalize(vec!["c"]), &clock(), &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(
            after_first.final_sentences,
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
        let stored = repo.load("s-1").await.unwrap().unwrap();
        assert_eq!(stored.final_sentences, Some(vec!["c".to_owned()]));
        assert_eq!(stored.sentences.len(), 1);
    }

    #[tokio::test]
    async fn test_handle_finalize_story_surfaces_repository_failure() {
        let command = FinalizeStory {
            correlation_id: Uuid::new_v4(),
            story_id: "s-1".into(),
            sentences: vec![],
        };

        let result = handle_finalize_story(&command, &clock(), &FailingStoryRepository).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
