use std::path::Path;

use crate::metrics::OperationTimer;
use crate::server::proto::{PublishStoryRequest, PublishStoryResponse};
use crate::server::structured_error::to_error_json;
use crate::story::publish_story;
use crate::user::resolve_session;
use tonic::{Response, Status};

pub async fn handle(
    req: PublishStoryRequest,
) -> Result<Response<PublishStoryResponse>, Status> {
    let _timer = OperationTimer::new("publish_story");
    let archive_path = Path::new(&req.archive_path);

    let user = match resolve_session(archive_path, &req.session_token).await {
        Ok(user) => user,
        Err(e) => {
            return Ok(Response::new(PublishStoryResponse {
                success: false,
                error: to_error_json(&req.archive_path, &e),
                id: String::new(),
                slug: String::new(),
            }));
        }
    };

    match publish_story(archive_path, &user.id, &req.story_id, &req.action).await {
        Ok(result) => Ok(Response::new(PublishStoryResponse {
            success: true,
            error: String::new(),
            id: result.id,
            slug: result.slug.unwrap_or_default(),
        })),
        Err(e) => Ok(Response::new(PublishStoryResponse {
            success: false,
            error: to_error_json(&req.archive_path, &e),
            id: String::new(),
            slug: String::new(),
        })),
    }
}
