use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub uploaded_by: Option<String>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub dislikes: Vec<String>,
    #[serde(default)]
    pub plays: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Track {
    pub fn reactions(&self) -> Reactions {
        Reactions {
            likes: self.likes.clone(),
            dislikes: self.dislikes.clone(),
        }
    }

    pub fn set_reactions(&mut self, reactions: Reactions) {
        self.likes = reactions.likes;
        self.dislikes = reactions.dislikes;
    }
}

/// The engagement fields of a track that the optimistic path rewrites.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Reactions {
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub dislikes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub user: Option<CommentAuthor>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Comment authors arrive either as a bare id or populated with a profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CommentAuthor {
    Id(String),
    Profile {
        #[serde(rename = "_id")]
        id: String,
        #[serde(default)]
        username: String,
    },
}

impl CommentAuthor {
    pub fn id(&self) -> &str {
        match self {
            CommentAuthor::Id(id) => id,
            CommentAuthor::Profile { id, .. } => id,
        }
    }
}

/// A page of tracks. Older backends answer with a bare array.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TrackPage {
    Paged {
        tracks: Vec<Track>,
        #[serde(default, rename = "totalPages")]
        total_pages: Option<u32>,
        #[serde(default, rename = "currentPage")]
        current_page: Option<u32>,
    },
    Bare(Vec<Track>),
}

impl TrackPage {
    pub fn into_parts(self) -> (Vec<Track>, Option<u32>, Option<u32>) {
        match self {
            TrackPage::Paged {
                tracks,
                total_pages,
                current_page,
            } => (tracks, total_pages, current_page),
            TrackPage::Bare(tracks) => (tracks, None, None),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

/// Counter fields returned by the play and share endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TrackStats {
    #[serde(default)]
    pub plays: Option<u64>,
    #[serde(default)]
    pub shares: Option<u64>,
}

/// Body of a like/dislike confirmation.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EngagementResponse {
    #[serde(default)]
    pub track_id: Option<String>,
    pub likes: Vec<String>,
    pub dislikes: Vec<String>,
}

impl EngagementResponse {
    pub fn reactions(&self) -> Reactions {
        Reactions {
            likes: self.likes.clone(),
            dislikes: self.dislikes.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthUser {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Credentials of the signed-in user, handed explicitly to every
/// authenticated call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub token: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            token: token.into(),
        }
    }
}

impl From<&AuthUser> for Session {
    fn from(user: &AuthUser) -> Self {
        Session::new(user.id.clone(), user.token.clone().unwrap_or_default())
    }
}
