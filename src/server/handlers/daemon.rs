use std::sync::Arc;

use crate::server::proto::{DaemonInfo, GetDaemonInfoRequest, ShutdownRequest, ShutdownResponse};
use crate::server::ShutdownSignal;
use crate::utils::format_display_path;
use tokio::sync::watch;
use tonic::{Response, Status};
use tracing::info;

pub fn handle_info(_req: GetDaemonInfoRequest) -> Result<Response<DaemonInfo>, Status> {
    let binary_path = std::env::current_exe()
        .map(|p| format_display_path(&p.to_string_lossy()))
        .unwrap_or_default();

    Ok(Response::new(DaemonInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        binary_path,
    }))
}

pub fn handle_shutdown(
    req: ShutdownRequest,
    shutdown_tx: Arc<watch::Sender<ShutdownSignal>>,
) -> Result<Response<ShutdownResponse>, Status> {
    let delay = req.delay_seconds;

    info!("Shutdown requested with delay: {} seconds", delay);

    // Always wait a short moment so the response is sent before the server
    // stops.
    tokio::spawn(async move {
        if delay > 0 {
            tokio::time::sleep(tokio::time::Duration::from_secs(u64::from(delay))).await;
        } else {
            tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        }
        let _ = shutdown_tx.send(ShutdownSignal::Shutdown);
    });

    let message = if delay > 0 {
        format!("Daemon will shutdown in {delay} seconds")
    } else {
        "Daemon shutting down".to_string()
    };

    Ok(Response::new(ShutdownResponse {
        success: true,
        message,
    }))
}
