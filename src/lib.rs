//! luminous-daemon: a story archive engine.
//!
//! Contributors draft first-person accounts of visionary experiences, the
//! editor autosaves them, and a publish workflow assigns each published
//! story a unique human-readable slug. The daemon exposes the lifecycle as
//! a gRPC service over a file-backed archive; the web frontend is a client.

// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing
    )
)]

pub mod archive;
pub mod cors;
pub mod editor;
pub mod grpc_logging;
pub mod logging;
pub mod metrics;
pub mod server;
pub mod story;
pub mod user;
pub mod user_config;
pub mod utils;

// Re-export commonly used types
pub use archive::{ensure_manifest, read_manifest, ArchiveManifest, ManifestError};
pub use editor::{
    ArchiveSaveTarget, AutosaveCoordinator, AutosavePhase, AutosaveStatus, DraftSnapshot,
    EditorSession, SaveError, SaveOutcome, SaveTarget, DEFAULT_DEBOUNCE,
};
pub use story::{
    contribute_story, create_story, delete_story, export_my_data, get_story, list_by_author,
    list_published, publish_story, submit_for_review, update_story, AnonymityMode, Block,
    BlockDocument, CreateStoryOptions, CreateStoryResult, ExportData, ExportMetadata,
    LicenseType, ListStyle, PublishAction, PublishError, PublishResult, PublishedStory, Story,
    StoryContent, StoryCrudError, StoryError, StoryStatus, UpdateStoryOptions, UpdateStoryResult,
    ValidationError,
};
pub use user::{create_user, get_user, issue_session, resolve_session, SessionError, User};
pub use user_config::{load_user_config, UserConfig};
pub use server::{ShutdownSignal, StoryArchiveService};
