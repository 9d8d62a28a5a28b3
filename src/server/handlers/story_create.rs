use std::path::Path;

use crate::metrics::OperationTimer;
use crate::server::helpers::{nonempty, parse_content, tag_values};
use crate::server::proto::{CreateStoryRequest, CreateStoryResponse};
use crate::server::structured_error::to_error_json;
use crate::story::{create_story, validate, CreateStoryOptions};
use crate::user::resolve_session;
use tonic::{Response, Status};

pub async fn handle(
    req: CreateStoryRequest,
) -> Result<Response<CreateStoryResponse>, Status> {
    let _timer = OperationTimer::new("create_story");
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

    let options = match build_options(&req) {
        Ok(options) => options,
        Err(e) => {
            return Ok(Response::new(CreateStoryResponse {
                success: false,
                error: to_error_json(&req.archive_path, &e),
                id: String::new(),
            }));
        }
    };

    match create_story(archive_path, &user.id, options).await {
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

fn build_options(req: &CreateStoryRequest) -> Result<CreateStoryOptions, crate::story::ValidationError> {
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

    Ok(CreateStoryOptions {
        title: req.title.clone().and_then(nonempty),
        content: parse_content(req.content_json.clone())?,
        layers: tag_values(req.layers.clone()).unwrap_or_default(),
        motifs: tag_values(req.motifs.clone()).unwrap_or_default(),
        feelings: tag_values(req.feelings.clone()).unwrap_or_default(),
        anonymity_mode,
        license_type,
        consent_research: req.consent_research.unwrap_or(false),
        consent_llm: req.consent_llm.unwrap_or(false),
    })
}
