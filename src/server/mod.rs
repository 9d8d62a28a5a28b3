pub mod convert;
pub mod error_mapping;
pub mod handlers;
pub mod helpers;
pub mod structured_error;

use std::sync::Arc;
use tokio::sync::watch;
use tonic::{Request, Response, Status};

// Import generated protobuf types
pub mod proto {
    #![allow(clippy::pedantic)]
    #![allow(clippy::all)]
    tonic::include_proto!("luminous");
}

use proto::story_archive_server::StoryArchive;
use proto::{
    ContributeStoryRequest, CreateStoryRequest, CreateStoryResponse, DaemonInfo,
    DeleteStoryRequest, DeleteStoryResponse, ExportMyDataRequest, ExportMyDataResponse,
    GetDaemonInfoRequest, GetStoryRequest, ListMyStoriesRequest, ListPublishedResponse,
    ListPublishedStoriesRequest, ListStoriesResponse, PublishStoryRequest, PublishStoryResponse,
    ShutdownRequest, ShutdownResponse, Story, SubmitStoryForReviewRequest, UpdateStoryRequest,
    UpdateStoryResponse,
};

/// Signal type for daemon shutdown
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShutdownSignal {
    None,
    Shutdown,
}

pub struct StoryArchiveService {
    shutdown_tx: Arc<watch::Sender<ShutdownSignal>>,
}

impl StoryArchiveService {
    #[must_use]
    pub fn new(shutdown_tx: Arc<watch::Sender<ShutdownSignal>>) -> Self {
        Self { shutdown_tx }
    }
}

#[tonic::async_trait]
impl StoryArchive for StoryArchiveService {
    async fn create_story(
        &self,
        request: Request<CreateStoryRequest>,
    ) -> Result<Response<CreateStoryResponse>, Status> {
        handlers::story_create::handle(request.into_inner()).await
    }

    async fn contribute_story(
        &self,
        request: Request<ContributeStoryRequest>,
    ) -> Result<Response<CreateStoryResponse>, Status> {
        handlers::story_contribute::handle(request.into_inner()).await
    }

    async fn get_story(&self, request: Request<GetStoryRequest>) -> Result<Response<Story>, Status> {
        handlers::story_get::handle(request.into_inner()).await
    }

    async fn update_story(
        &self,
        request: Request<UpdateStoryRequest>,
    ) -> Result<Response<UpdateStoryResponse>, Status> {
        handlers::story_update::handle(request.into_inner(), "update_story").await
    }

    async fn autosave_story(
        &self,
        request: Request<UpdateStoryRequest>,
    ) -> Result<Response<UpdateStoryResponse>, Status> {
        handlers::story_update::handle(request.into_inner(), "autosave_story").await
    }

    async fn publish_story(
        &self,
        request: Request<PublishStoryRequest>,
    ) -> Result<Response<PublishStoryResponse>, Status> {
        handlers::story_publish::handle(request.into_inner()).await
    }

    async fn submit_story_for_review(
        &self,
        request: Request<SubmitStoryForReviewRequest>,
    ) -> Result<Response<UpdateStoryResponse>, Status> {
        handlers::story_review::handle(request.into_inner()).await
    }

    async fn delete_story(
        &self,
        request: Request<DeleteStoryRequest>,
    ) -> Result<Response<DeleteStoryResponse>, Status> {
        handlers::story_delete::handle(request.into_inner()).await
    }

    async fn list_my_stories(
        &self,
        request: Request<ListMyStoriesRequest>,
    ) -> Result<Response<ListStoriesResponse>, Status> {
        handlers::story_list::handle_mine(request.into_inner()).await
    }

    async fn list_published_stories(
        &self,
        request: Request<ListPublishedStoriesRequest>,
    ) -> Result<Response<ListPublishedResponse>, Status> {
        handlers::story_list::handle_published(request.into_inner()).await
    }

    async fn export_my_data(
        &self,
        request: Request<ExportMyDataRequest>,
    ) -> Result<Response<ExportMyDataResponse>, Status> {
        handlers::export::handle(request.into_inner()).await
    }

    async fn get_daemon_info(
        &self,
        request: Request<GetDaemonInfoRequest>,
    ) -> Result<Response<DaemonInfo>, Status> {
        handlers::daemon::handle_info(request.into_inner())
    }

    async fn shutdown(
        &self,
        request: Request<ShutdownRequest>,
    ) -> Result<Response<ShutdownResponse>, Status> {
        handlers::daemon::handle_shutdown(request.into_inner(), self.shutdown_tx.clone())
    }
}
