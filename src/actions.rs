use crate::models::{AuthUser, Comment, Reactions, Track, TrackStats};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Engagement {
    Like,
    Dislike,
}

impl Engagement {
    pub fn path_segment(self) -> &'static str {
        match self {
            Engagement::Like => "like",
            Engagement::Dislike => "dislike",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Engagement::Like => "Failed to like track",
            Engagement::Dislike => "Failed to dislike track",
        }
    }
}

/// A speculative engagement change waiting for the server.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationIntent {
    pub track_id: String,
    pub kind: Engagement,
    pub seq: u64,
    pub previous: Reactions,
    pub next: Reactions,
}

/// Named update events applied by the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AllTracksLoaded {
        tracks: Vec<Track>,
        total_pages: Option<u32>,
        current_page: Option<u32>,
    },
    UserTracksLoaded {
        tracks: Vec<Track>,
    },
    TrackStatsUpdated {
        track_id: String,
        stats: TrackStats,
    },
    CommentAdded {
        track_id: String,
        comment: Comment,
    },
    CommentsLoaded {
        track_id: String,
        comments: Vec<Comment>,
    },
    CommentDeleted {
        track_id: String,
        comment_id: String,
    },
    EngagementSpeculated(MutationIntent),
    EngagementConfirmed {
        track_id: String,
        seq: u64,
        reactions: Reactions,
        discard_stale: bool,
    },
    EngagementFailed {
        track_id: String,
        seq: u64,
        message: String,
        /// Restore the last server-known reactions; the value here is used
        /// only when the server never reported any for this track.
        rollback: Option<Reactions>,
    },
    LoginStarted,
    LoggedIn(AuthUser),
    LoginFailed(String),
    LoggedOut,
}
