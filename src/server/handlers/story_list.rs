use std::path::Path;

use crate::metrics::OperationTimer;
use crate::server::convert::{published_story_to_proto, story_to_proto, total_count};
use crate::server::proto::{
    ListMyStoriesRequest, ListPublishedStoriesRequest, ListPublishedResponse, ListStoriesResponse,
};
use crate::story::{list_by_author, list_published};
use crate::user::resolve_session;
use tonic::{Response, Status};

pub async fn handle_mine(
    req: ListMyStoriesRequest,
) -> Result<Response<ListStoriesResponse>, Status> {
    let _timer = OperationTimer::new("list_my_stories");
    let archive_path = Path::new(&req.archive_path);

    let user = match resolve_session(archive_path, &req.session_token).await {
        Ok(user) => user,
        Err(e) => return Err(Status::unauthenticated(e.to_string())),
    };

    match list_by_author(archive_path, &user.id).await {
        Ok(stories) => Ok(Response::new(ListStoriesResponse {
            total_count: total_count(stories.len()),
            stories: stories
                .iter()
                .map(|s| story_to_proto(s, user.name.as_deref()))
                .collect(),
        })),
        Err(e) => Err(Status::internal(e.to_string())),
    }
}

/// The public archive listing; no session required.
pub async fn handle_published(
    req: ListPublishedStoriesRequest,
) -> Result<Response<ListPublishedResponse>, Status> {
    let _timer = OperationTimer::new("list_published_stories");
    let archive_path = Path::new(&req.archive_path);

    match list_published(archive_path).await {
        Ok(entries) => Ok(Response::new(ListPublishedResponse {
            total_count: total_count(entries.len()),
            stories: entries.iter().map(published_story_to_proto).collect(),
        })),
        Err(e) => Err(Status::internal(e.to_string())),
    }
}
