use super::content::StoryContent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Revision counter value for a never-published story. The first publish
/// bumps it to 2.
pub const REVISION_BASE: u32 = 1;

/// Lifecycle state of a story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StoryStatus {
    Draft,
    InReview,
    Published,
}

impl StoryStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::InReview => "IN_REVIEW",
            Self::Published => "PUBLISHED",
        }
    }
}

impl fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contributor's chosen attribution visibility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnonymityMode {
    Identified,
    Pseudonymous,
    Anonymous,
}

impl AnonymityMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identified => "IDENTIFIED",
            Self::Pseudonymous => "PSEUDONYMOUS",
            Self::Anonymous => "ANONYMOUS",
        }
    }
}

impl fmt::Display for AnonymityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnonymityMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDENTIFIED" => Ok(Self::Identified),
            "PSEUDONYMOUS" => Ok(Self::Pseudonymous),
            "ANONYMOUS" => Ok(Self::Anonymous),
            _ => Err(()),
        }
    }
}

/// License the contributor grants on their published story.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LicenseType {
    Cc0,
    CcBy,
    CcBySa,
    CcByNc,
    CcByNcSa,
}

impl LicenseType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cc0 => "CC0",
            Self::CcBy => "CC_BY",
            Self::CcBySa => "CC_BY_SA",
            Self::CcByNc => "CC_BY_NC",
            Self::CcByNcSa => "CC_BY_NC_SA",
        }
    }
}

impl fmt::Display for LicenseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LicenseType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CC0" => Ok(Self::Cc0),
            "CC_BY" => Ok(Self::CcBy),
            "CC_BY_SA" => Ok(Self::CcBySa),
            "CC_BY_NC" => Ok(Self::CcByNc),
            "CC_BY_NC_SA" => Ok(Self::CcByNcSa),
            _ => Err(()),
        }
    }
}

/// A contributor's submitted narrative, the archive's primary entity.
///
/// Stored as `.luminous/stories/{uuid}.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<StoryContent>,
    pub status: StoryStatus,
    /// Mirror of `status == PUBLISHED`; kept in sync by every transition.
    pub published: bool,
    /// Assigned exactly once, at first publish; survives unpublish.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub motifs: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feelings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymity_mode: Option<AnonymityMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_type: Option<LicenseType>,
    #[serde(default)]
    pub consent_research: bool,
    #[serde(default)]
    pub consent_llm: bool,
    pub revision: u32,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_autosave_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
}

impl Story {
    /// Create a fresh draft owned by `author_id`.
    #[must_use]
    pub fn new_draft(author_id: &str, title: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            content: None,
            status: StoryStatus::Draft,
            published: false,
            slug: None,
            layers: Vec::new(),
            motifs: Vec::new(),
            feelings: Vec::new(),
            anonymity_mode: None,
            license_type: None,
            consent_research: false,
            consent_llm: false,
            revision: REVISION_BASE,
            author_id: author_id.to_string(),
            created_at: now,
            updated_at: now,
            last_autosave_at: None,
            published_at: None,
        }
    }

    #[must_use]
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.author_id == user_id
    }

    /// Transition to `status`, keeping the `published` mirror in sync.
    pub fn set_status(&mut self, status: StoryStatus) {
        self.status = status;
        self.published = status == StoryStatus::Published;
    }
}
