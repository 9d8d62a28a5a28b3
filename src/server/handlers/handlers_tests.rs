use crate::server::handlers;
use crate::server::proto::{
    CreateStoryRequest, DeleteStoryRequest, ExportMyDataRequest, GetStoryRequest,
    ListPublishedStoriesRequest, PublishStoryRequest, StringList, UpdateStoryRequest,
};
use crate::user::{create_user, issue_session};
use tempfile::TempDir;

async fn signed_in(dir: &TempDir) -> String {
    let user = create_user(dir.path(), Some("Iris".to_string()), "iris@example.com")
        .await
        .unwrap();
    issue_session(dir.path(), &user.id).await.unwrap()
}

fn error_code(error_json: &str) -> String {
    let parsed: serde_json::Value = serde_json::from_str(error_json).unwrap();
    parsed["messages"][0]["code"].as_str().unwrap_or("").to_string()
}

fn block_content() -> String {
    r#"{"time":1,"blocks":[{"type":"paragraph","data":{"text":"A door opened in the dark."}}],"version":"2.26.5"}"#
        .to_string()
}

fn create_request(dir: &TempDir, token: &str) -> CreateStoryRequest {
    CreateStoryRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
        session_token: token.to_string(),
        title: Some("Under the Canopy, a Door".to_string()),
        content_json: Some(block_content()),
        layers: Some(StringList {
            values: vec!["Causal".to_string()],
        }),
        motifs: None,
        feelings: None,
        anonymity_mode: Some("PSEUDONYMOUS".to_string()),
        license_type: Some("CC_BY".to_string()),
        consent_research: Some(true),
        consent_llm: None,
    }
}

#[tokio::test]
async fn test_create_without_session_is_auth_required() {
    let dir = TempDir::new().unwrap();
    let mut req = create_request(&dir, "");
    req.session_token = String::new();

    let response = handlers::story_create::handle(req).await.unwrap().into_inner();
    assert!(!response.success);
    assert_eq!(error_code(&response.error), "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_create_with_invalid_enum_is_validation_error() {
    let dir = TempDir::new().unwrap();
    let token = signed_in(&dir).await;
    let mut req = create_request(&dir, &token);
    req.license_type = Some("ALL_RIGHTS_RESERVED".to_string());

    let response = handlers::story_create::handle(req).await.unwrap().into_inner();
    assert!(!response.success);
    assert_eq!(error_code(&response.error), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_publish_get_round_trip() {
    let dir = TempDir::new().unwrap();
    let token = signed_in(&dir).await;

    let created = handlers::story_create::handle(create_request(&dir, &token))
        .await
        .unwrap()
        .into_inner();
    assert!(created.success, "create failed: {}", created.error);

    let published = handlers::story_publish::handle(PublishStoryRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
        session_token: token.clone(),
        story_id: created.id.clone(),
        action: "publish".to_string(),
    })
    .await
    .unwrap()
    .into_inner();
    assert!(published.success, "publish failed: {}", published.error);
    assert_eq!(published.slug, "under-the-canopy-a-door");

    // Published stories are readable with no session at all.
    let story = handlers::story_get::handle(GetStoryRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
        session_token: String::new(),
        story_id: created.id.clone(),
    })
    .await
    .unwrap()
    .into_inner();
    assert_eq!(story.status, "PUBLISHED");
    assert!(story.published);
    assert_eq!(story.revision, 2);
    assert_eq!(story.author_name, "Iris");
    assert!(story.content_json.contains("A door opened in the dark."));
}

#[tokio::test]
async fn test_draft_get_without_session_is_permission_denied() {
    let dir = TempDir::new().unwrap();
    let token = signed_in(&dir).await;
    let created = handlers::story_create::handle(create_request(&dir, &token))
        .await
        .unwrap()
        .into_inner();

    let result = handlers::story_get::handle(GetStoryRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
        session_token: String::new(),
        story_id: created.id,
    })
    .await;

    let status = result.unwrap_err();
    assert_eq!(status.code(), tonic::Code::PermissionDenied);
}

#[tokio::test]
async fn test_publish_unknown_action_is_invalid_action() {
    let dir = TempDir::new().unwrap();
    let token = signed_in(&dir).await;
    let created = handlers::story_create::handle(create_request(&dir, &token))
        .await
        .unwrap()
        .into_inner();

    let response = handlers::story_publish::handle(PublishStoryRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
        session_token: token,
        story_id: created.id,
        action: "promote".to_string(),
    })
    .await
    .unwrap()
    .into_inner();
    assert!(!response.success);
    assert_eq!(error_code(&response.error), "INVALID_ACTION");
}

#[tokio::test]
async fn test_delete_published_story_is_invalid_state() {
    let dir = TempDir::new().unwrap();
    let token = signed_in(&dir).await;
    let created = handlers::story_create::handle(create_request(&dir, &token))
        .await
        .unwrap()
        .into_inner();
    handlers::story_publish::handle(PublishStoryRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
        session_token: token.clone(),
        story_id: created.id.clone(),
        action: "publish".to_string(),
    })
    .await
    .unwrap();

    let response = handlers::story_delete::handle(DeleteStoryRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
        session_token: token,
        story_id: created.id,
    })
    .await
    .unwrap()
    .into_inner();
    assert!(!response.success);
    assert_eq!(error_code(&response.error), "INVALID_STATE");
}

#[tokio::test]
async fn test_autosave_patch_refreshes_fields() {
    let dir = TempDir::new().unwrap();
    let token = signed_in(&dir).await;
    let created = handlers::story_create::handle(create_request(&dir, &token))
        .await
        .unwrap()
        .into_inner();

    let response = handlers::story_update::handle(
        UpdateStoryRequest {
            archive_path: dir.path().to_string_lossy().to_string(),
            session_token: token.clone(),
            story_id: created.id.clone(),
            title: Some("Under the Canopy".to_string()),
            content_json: None,
            layers: None,
            motifs: Some(StringList {
                values: vec!["jungle".to_string(), "door".to_string()],
            }),
            feelings: None,
            anonymity_mode: None,
            license_type: None,
            consent_research: None,
            consent_llm: None,
        },
        "autosave_story",
    )
    .await
    .unwrap()
    .into_inner();
    assert!(response.success, "autosave failed: {}", response.error);

    let story = handlers::story_get::handle(GetStoryRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
        session_token: token,
        story_id: created.id,
    })
    .await
    .unwrap()
    .into_inner();
    assert_eq!(story.title, "Under the Canopy");
    assert_eq!(story.motifs, vec!["jungle", "door"]);
    // Untouched fields survive the patch.
    assert_eq!(story.anonymity_mode, "PSEUDONYMOUS");
    assert!(!story.last_autosave_at.is_empty());
}

#[tokio::test]
async fn test_list_published_is_public_and_export_counts() {
    let dir = TempDir::new().unwrap();
    let token = signed_in(&dir).await;
    let created = handlers::story_create::handle(create_request(&dir, &token))
        .await
        .unwrap()
        .into_inner();
    handlers::story_publish::handle(PublishStoryRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
        session_token: token.clone(),
        story_id: created.id,
        action: "publish".to_string(),
    })
    .await
    .unwrap();
    // A second story stays a draft.
    handlers::story_create::handle(create_request(&dir, &token)).await.unwrap();

    let listed = handlers::story_list::handle_published(ListPublishedStoriesRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
    })
    .await
    .unwrap()
    .into_inner();
    assert_eq!(listed.total_count, 1);
    assert_eq!(listed.stories[0].author_name, "Iris");

    let export = handlers::export::handle(ExportMyDataRequest {
        archive_path: dir.path().to_string_lossy().to_string(),
        session_token: token,
    })
    .await
    .unwrap()
    .into_inner();
    assert!(export.success);
    let metadata = export.metadata.unwrap();
    assert_eq!(metadata.total_stories, 2);
    assert_eq!(metadata.drafts, 1);
    assert_eq!(metadata.published, 1);
    assert_eq!(export.user.unwrap().email, "iris@example.com");
}
