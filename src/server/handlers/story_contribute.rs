use std::path::Path;

use crate::metrics::OperationTimer;
use crate::server::proto::{ContributeStoryRequest, CreateStoryResponse};
use crate::server::structured_error::to_error_json;
use crate::story::contribute_story;
use crate::user::resolve_session;
use tonic::{Response, Status};

/// The simple contribute form: a required title and a plain-text body.
pub async fn handle(
    req: ContributeStoryRequest,
) -> Result<Response<CreateStoryResponse>, Status> {
    let _timer = OperationTimer::new("contribute_story");
    let archive_path = Path::new(&req.archive_path);

    let user = match resolve_session(archive_path, &req.session_token).await {
        Ok(user) => user,
        Err(e) => {
            return Ok(Response::new(CreateStoryResponse {
                success: false,
                error: to_error_json(&req.archive_path, &e),
                id: String::new(),
            }));
        }
    };

    match contribute_story(archive_path, &user.id, &req.title, &req.text).await {
        Ok(result) => Ok(Response::new(CreateStoryResponse {
            success: true,
            error: String::new(),
            id: result.id,
        })),
        Err(e) => Ok(Response::new(CreateStoryResponse {
            success: false,
            error: to_error_json(&req.archive_path, &e),
            id: String::new(),
        })),
    }
}
