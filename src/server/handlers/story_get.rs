use std::path::Path;

use crate::metrics::OperationTimer;
use crate::server::convert::story_to_proto;
use crate::server::proto::{GetStoryRequest, Story};
use crate::story::{get_story, StoryCrudError};
use crate::user::{get_user, resolve_session};
use tonic::{Response, Status};

pub async fn handle(req: GetStoryRequest) -> Result<Response<Story>, Status> {
    let _timer = OperationTimer::new("get_story");
    let archive_path = Path::new(&req.archive_path);

    // The session is optional here: published stories are public, drafts
    // need an owning caller.
    let caller = match resolve_session(archive_path, &req.session_token).await {
        Ok(user) => Some(user),
        Err(_) => None,
    };

    match get_story(archive_path, caller.as_ref().map(|u| u.id.as_str()), &req.story_id).await {
        Ok(story) => {
            let author_name = match get_user(archive_path, &story.author_id).await {
                Ok(author) => author.name,
                Err(_) => None,
            };
            Ok(Response::new(story_to_proto(&story, author_name.as_deref())))
        }
        Err(StoryCrudError::NotFound(id)) => Err(Status::not_found(format!("Story {id} not found"))),
        Err(StoryCrudError::Forbidden(msg)) => Err(Status::permission_denied(msg)),
        Err(e) => Err(Status::internal(e.to_string())),
    }
}
