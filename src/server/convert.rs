//! Domain to protobuf conversions.

use super::proto;
use crate::story::{ExportData, PublishedStory, Story};
use chrono::{DateTime, Utc};

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map(|t| t.to_rfc3339()).unwrap_or_default()
}

pub fn story_to_proto(story: &Story, author_name: Option<&str>) -> proto::Story {
    proto::Story {
        id: story.id.clone(),
        title: story.title.clone(),
        content_json: story
            .content
            .as_ref()
            .and_then(|c| serde_json::to_string(c).ok())
            .unwrap_or_default(),
        status: story.status.to_string(),
        published: story.published,
        slug: story.slug.clone().unwrap_or_default(),
        layers: story.layers.clone(),
        motifs: story.motifs.clone(),
        feelings: story.feelings.clone(),
        anonymity_mode: story
            .anonymity_mode
            .map(|m| m.to_string())
            .unwrap_or_default(),
        license_type: story
            .license_type
            .map(|l| l.to_string())
            .unwrap_or_default(),
        consent_research: story.consent_research,
        consent_llm: story.consent_llm,
        revision: story.revision,
        author_id: story.author_id.clone(),
        author_name: author_name.unwrap_or_default().to_string(),
        created_at: story.created_at.to_rfc3339(),
        updated_at: story.updated_at.to_rfc3339(),
        last_autosave_at: timestamp(story.last_autosave_at),
        published_at: timestamp(story.published_at),
    }
}

pub fn published_story_to_proto(entry: &PublishedStory) -> proto::Story {
    story_to_proto(&entry.story, entry.author_name.as_deref())
}

pub fn export_to_proto(export: &ExportData) -> proto::ExportMyDataResponse {
    proto::ExportMyDataResponse {
        success: true,
        error: String::new(),
        export_date: export.export_date.to_rfc3339(),
        user: Some(proto::ExportedUser {
            id: export.user.id.clone(),
            name: export.user.name.clone().unwrap_or_default(),
            email: export.user.email.clone(),
        }),
        stories: export.stories.iter().map(|s| story_to_proto(s, None)).collect(),
        metadata: Some(proto::ExportMetadata {
            total_stories: truncate_count(export.metadata.total_stories),
            drafts: truncate_count(export.metadata.drafts),
            in_review: truncate_count(export.metadata.in_review),
            published: truncate_count(export.metadata.published),
        }),
    }
}

pub fn truncate_count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

pub fn total_count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}
