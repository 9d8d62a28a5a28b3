use std::path::Path;

use crate::metrics::OperationTimer;
use crate::server::helpers::{nonempty, parse_content, tag_values};
use crate::server::proto::{UpdateStoryRequest, UpdateStoryResponse};
use crate::server::structured_error::to_error_json;
use crate::story::{update_story, validate, UpdateStoryOptions};
use crate::user::resolve_session;
use tonic::{Response, Status};

/// Shared by UpdateStory and AutosaveStory: both apply a partial patch and
/// refresh the autosave timestamp.
pub async fn handle(
    req: UpdateStoryRequest,
    operation: &'static str,
) -> Result<Response<UpdateStoryResponse>, Status> {
    let _timer = OperationTimer::new(operation);
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

    let options = match build_options(&req) {
        Ok(options) => options,
        Err(e) => {
            return Ok(Response::new(UpdateStoryResponse {
                success: false,
                error: to_error_json(&req.archive_path, &e),
                id: String::new(),
            }));
        }
    };

    match update_story(archive_path, &user.id, &req.story_id, options).await {
        Ok(result) => Ok(Response::new(UpdateStoryResponse {
            success: true,
            error: String::new(),
            id: result.story.id,
        })),
        Err(e) => Ok(Response::new(UpdateStoryResponse {
            success: false,
            error: to_error_json(&req.archive_path, &e),
            id: String::new(),
        })),
    }
}

fn build_options(req: &UpdateStoryRequest) -> Result<UpdateStoryOptions, crate::story::ValidationError> {
    let anonymity_mode = req
        .anonymity_mode
        .clone()
        .and_then(nonempty)
        .map(|s| validate::parse_anonymity_mode(&s))
        .transpose()?;
    let license_type = req
        .license_type
        .clone()
        .and_then(nonempty)
        .map(|s| validate::parse_license_type(&s))
        .transpose()?;

    Ok(UpdateStoryOptions {
        title: req.title.clone().and_then(nonempty),
        content: parse_content(req.content_json.clone())?,
        layers: tag_values(req.layers.clone()),
        motifs: tag_values(req.motifs.clone()),
        feelings: tag_values(req.feelings.clone()),
        anonymity_mode,
        license_type,
        consent_research: req.consent_research,
        consent_llm: req.consent_llm,
    })
}
