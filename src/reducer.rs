use crate::actions::Action;
use crate::models::{AuthUser, Reactions, Track};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TracksState {
    pub all_tracks: Vec<Track>,
    pub user_tracks: Vec<Track>,
    pub total_pages: Option<u32>,
    pub current_page: Option<u32>,
    pub error: Option<String>,
    /// Latest engagement sequence number issued per track.
    pub mutation_seq: BTreeMap<String, u64>,
    /// Tracks whose reactions are speculative, keyed to the intent that wrote them.
    pub unconfirmed: BTreeMap<String, u64>,
    /// Last reactions reported by the server per track.
    pub confirmed: BTreeMap<String, ServerReactions>,
    /// Sequence numbers of intents still waiting for a response.
    pub in_flight: BTreeMap<String, BTreeSet<u64>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerReactions {
    /// Sequence the value belongs to; a reload takes the latest issued one.
    pub seq: u64,
    pub reactions: Reactions,
}

impl TracksState {
    pub fn find(&self, track_id: &str) -> Option<&Track> {
        self.all_tracks
            .iter()
            .chain(self.user_tracks.iter())
            .find(|track| track.id == track_id)
    }

    pub fn latest_seq(&self, track_id: &str) -> u64 {
        self.mutation_seq.get(track_id).copied().unwrap_or(0)
    }

    pub fn is_unconfirmed(&self, track_id: &str) -> bool {
        self.unconfirmed.contains_key(track_id)
    }

    /// Applies `f` to every copy of the track, in the feed and in the
    /// user's own list.
    fn update_track(&mut self, track_id: &str, mut f: impl FnMut(&mut Track)) {
        self.all_tracks
            .iter_mut()
            .chain(self.user_tracks.iter_mut())
            .filter(|track| track.id == track_id)
            .for_each(|track| f(track));
    }

    fn set_reactions(&mut self, track_id: &str, reactions: &Reactions) {
        self.update_track(track_id, |track| track.set_reactions(reactions.clone()));
    }

    fn has_in_flight(&self, track_id: &str) -> bool {
        self.in_flight.contains_key(track_id)
    }

    fn newer_in_flight(&self, track_id: &str, seq: u64) -> bool {
        self.in_flight
            .get(track_id)
            .is_some_and(|pending| pending.range(seq + 1..).next().is_some())
    }

    fn settle(&mut self, track_id: &str, seq: u64) {
        if let Some(pending) = self.in_flight.get_mut(track_id) {
            pending.remove(&seq);
            if pending.is_empty() {
                self.in_flight.remove(track_id);
            }
        }
    }

    /// Records freshly loaded tracks as server truth. Intents still in flight
    /// for them are superseded by the load.
    fn rebase(&mut self, tracks: &[Track]) {
        for track in tracks {
            let seq = self.mutation_seq.entry(track.id.clone()).or_default();
            if self.in_flight.contains_key(&track.id) {
                *seq += 1;
            }
            let server = ServerReactions {
                seq: *seq,
                reactions: track.reactions(),
            };
            self.confirmed.insert(track.id.clone(), server);
            self.unconfirmed.remove(&track.id);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub current_user: Option<AuthUser>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub tracks: TracksState,
    pub session: SessionState,
}

pub fn reduce(state: &mut ClientState, action: Action) {
    match action {
        Action::AllTracksLoaded {
            tracks,
            total_pages,
            current_page,
        } => {
            state.tracks.rebase(&tracks);
            state.tracks.all_tracks = tracks;
            state.tracks.total_pages = total_pages;
            state.tracks.current_page = current_page;
            state.tracks.error = None;
        }
        Action::UserTracksLoaded { tracks } => {
            state.tracks.rebase(&tracks);
            state.tracks.user_tracks = tracks;
            state.tracks.error = None;
        }
        Action::TrackStatsUpdated { track_id, stats } => {
            state.tracks.update_track(&track_id, |track| {
                if let Some(plays) = stats.plays {
                    track.plays = plays;
                }
                if let Some(shares) = stats.shares {
                    track.shares = shares;
                }
            });
        }
        Action::CommentAdded { track_id, comment } => {
            state
                .tracks
                .update_track(&track_id, |track| track.comments.push(comment.clone()));
        }
        Action::CommentsLoaded { track_id, comments } => {
            state
                .tracks
                .update_track(&track_id, |track| track.comments = comments.clone());
        }
        Action::CommentDeleted {
            track_id,
            comment_id,
        } => {
            state.tracks.update_track(&track_id, |track| {
                track.comments.retain(|comment| comment.id != comment_id)
            });
        }
        Action::EngagementSpeculated(intent) => {
            let tracks = &mut state.tracks;
            tracks.set_reactions(&intent.track_id, &intent.next);
            let seq = tracks.mutation_seq.entry(intent.track_id.clone()).or_default();
            *seq = (*seq).max(intent.seq);
            tracks
                .in_flight
                .entry(intent.track_id.clone())
                .or_default()
                .insert(intent.seq);
            tracks.unconfirmed.insert(intent.track_id, intent.seq);
            tracks.error = None;
        }
        Action::EngagementConfirmed {
            track_id,
            seq,
            reactions,
            discard_stale,
        } => {
            let tracks = &mut state.tracks;
            tracks.settle(&track_id, seq);
            let known = tracks.confirmed.get(&track_id).map_or(0, |server| server.seq);
            if discard_stale && seq < known {
                return;
            }
            let latest = tracks.latest_seq(&track_id);
            // A newer speculation keeps the screen until its own response.
            if seq >= latest || !discard_stale || !tracks.newer_in_flight(&track_id, seq) {
                tracks.set_reactions(&track_id, &reactions);
            }
            if seq >= latest || !tracks.has_in_flight(&track_id) {
                tracks.unconfirmed.remove(&track_id);
            }
            tracks
                .confirmed
                .insert(track_id, ServerReactions { seq, reactions });
        }
        Action::EngagementFailed {
            track_id,
            seq,
            message,
            rollback,
        } => {
            let tracks = &mut state.tracks;
            tracks.settle(&track_id, seq);
            tracks.error = Some(message);
            let Some(fallback) = rollback else {
                return;
            };
            if tracks.newer_in_flight(&track_id, seq) {
                return;
            }
            if seq >= tracks.latest_seq(&track_id) {
                let baseline = tracks
                    .confirmed
                    .get(&track_id)
                    .map_or(fallback, |server| server.reactions.clone());
                tracks.set_reactions(&track_id, &baseline);
            }
            if !tracks.has_in_flight(&track_id) {
                tracks.unconfirmed.remove(&track_id);
            }
        }
        Action::LoginStarted => {
            state.session.loading = true;
            state.session.error = None;
        }
        Action::LoggedIn(user) => {
            state.session.current_user = Some(user);
            state.session.loading = false;
            state.session.error = None;
        }
        Action::LoginFailed(message) => {
            state.session.loading = false;
            state.session.error = Some(message);
        }
        Action::LoggedOut => {
            state.session = SessionState::default();
        }
    }
}
