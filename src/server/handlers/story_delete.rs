use std::path::Path;

use crate::metrics::OperationTimer;
use crate::server::proto::{DeleteStoryRequest, DeleteStoryResponse};
use crate::server::structured_error::to_error_json;
use crate::story::delete_story;
use crate::user::resolve_session;
use tonic::{Response, Status};

pub async fn handle(
    req: DeleteStoryRequest,
) -> Result<Response<DeleteStoryResponse>, Status> {
    let _timer = OperationTimer::new("delete_story");
    let archive_path = Path::new(&req.archive_path);

    let user = match resolve_session(archive_path, &req.session_token).await {
        Ok(user) => user,
        Err(e) => {
            return Ok(Response::new(DeleteStoryResponse {
                success: false,
                error: to_error_json(&req.archive_path, &e),
            }));
        }
    };

    match delete_story(archive_path, &user.id, &req.story_id).await {
        Ok(()) => Ok(Response::new(DeleteStoryResponse {
            success: true,
            error: String::new(),
        })),
        Err(e) => Ok(Response::new(DeleteStoryResponse {
            success: false,
            error: to_error_json(&req.archive_path, &e),
        })),
    }
}
