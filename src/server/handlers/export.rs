use std::path::Path;

use crate::metrics::OperationTimer;
use crate::server::convert::export_to_proto;
use crate::server::proto::{ExportMyDataRequest, ExportMyDataResponse};
use crate::server::structured_error::to_error_json;
use crate::story::export_my_data;
use crate::user::resolve_session;
use tonic::{Response, Status};

pub async fn handle(
    req: ExportMyDataRequest,
) -> Result<Response<ExportMyDataResponse>, Status> {
    let _timer = OperationTimer::new("export_my_data");
    let archive_path = Path::new(&req.archive_path);

    let user = match resolve_session(archive_path, &req.session_token).await {
        Ok(user) => user,
        Err(e) => {
            return Ok(Response::new(ExportMyDataResponse {
                success: false,
                error: to_error_json(&req.archive_path, &e),
                ..Default::default()
            }));
        }
    };

    match export_my_data(archive_path, &user).await {
        Ok(export) => Ok(Response::new(export_to_proto(&export))),
        Err(e) => Ok(Response::new(ExportMyDataResponse {
            success: false,
            error: to_error_json(&req.archive_path, &e),
            ..Default::default()
        })),
    }
}
