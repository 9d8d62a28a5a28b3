pub mod content;
mod create;
pub mod crud;
mod export;
pub mod publish;
pub mod slug;
mod types;
pub mod validate;

pub use content::{Block, BlockDocument, ListStyle, StoryContent};
pub use create::{contribute_story, create_story, CreateStoryOptions, CreateStoryResult, StoryError};
pub use crud::{
    delete_story, get_story, list_by_author, list_published, update_story, PublishedStory,
    StoryCrudError, UpdateStoryOptions, UpdateStoryResult,
};
pub use export::{export_my_data, ExportData, ExportMetadata, ExportedUser};
pub use publish::{publish_story, submit_for_review, PublishAction, PublishError, PublishResult};
pub use types::{AnonymityMode, LicenseType, Story, StoryStatus, REVISION_BASE};
pub use validate::ValidationError;
