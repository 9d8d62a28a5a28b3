mod delete;
mod get;
mod list;
pub(crate) mod read;
mod types;
mod update;

pub use delete::delete_story;
pub use get::get_story;
pub use list::{list_by_author, list_published};
pub use types::{PublishedStory, StoryCrudError, UpdateStoryOptions, UpdateStoryResult};
pub use update::update_story;

#[cfg(test)]
#[path = "../crud_tests.rs"]
mod tests;
