use std::path::Path;

use crate::metrics::OperationTimer;
use crate::server::proto::{SubmitStoryForReviewRequest, UpdateStoryResponse};
use crate::server::structured_error::to_error_json;
use crate::story::submit_for_review;
use crate::user::resolve_session;
use tonic::{Response, Status};

pub async fn handle(
    req: SubmitStoryForReviewRequest,
) -> Result<Response<UpdateStoryResponse>, Status> {
    let _timer = OperationTimer::new("submit_story_for_review");
    let archive_path = Path::new(&req.archive_path);

    let user = match resolve_session(archive_path, &req.session_token).await {
        Ok(user) => user,
        Err(e) => {
            return Ok(Response::new(UpdateStoryResponse {
                success: false,
                error: to_error_json(&req.archive_path, &e),
                id: String::new(),
            }));
        }
    };

    match submit_for_review(archive_path, &user.id, &req.story_id).await {
        Ok(story) => Ok(Response::new(UpdateStoryResponse {
            success: true,
            error: String::new(),
            id: story.id,
        })),
        Err(e) => Ok(Response::new(UpdateStoryResponse {
            success: false,
            error: to_error_json(&req.archive_path, &e),
            id: String::new(),
        })),
    }
}
