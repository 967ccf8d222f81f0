//! Optimistic like/dislike toggling.
//!
//! The store is updated before the request is sent, then overwritten with
//! the server's answer. On failure the last reactions the server reported
//! are restored, or the speculation is left marked unconfirmed when rollback
//! is disabled. Reloading a track list supersedes intents still in flight.

use crate::actions::{Action, Engagement, MutationIntent};
use crate::client::Client;
use crate::errors::ClientError;
use crate::models::{EngagementResponse, Reactions, Session};
use crate::reducer::ClientState;
use crate::transport::ApiRequest;
use tracing::{debug, warn};

impl Reactions {
    /// Toggles `user_id` in the set named by `kind`. Adding to one set
    /// removes the user from the opposite one.
    pub fn toggled(&self, kind: Engagement, user_id: &str) -> Reactions {
        let mut next = self.clone();
        let (target, opposite) = match kind {
            Engagement::Like => (&mut next.likes, &mut next.dislikes),
            Engagement::Dislike => (&mut next.dislikes, &mut next.likes),
        };
        if target.iter().any(|id| id == user_id) {
            target.retain(|id| id != user_id);
        } else {
            target.push(user_id.to_string());
            opposite.retain(|id| id != user_id);
        }
        next
    }
}

impl MutationIntent {
    /// Builds the next intent for `track_id` from the current state.
    pub fn plan(
        state: &ClientState,
        track_id: &str,
        kind: Engagement,
        user_id: &str,
    ) -> Result<MutationIntent, ClientError> {
        let track = state
            .tracks
            .find(track_id)
            .ok_or_else(|| ClientError::UnknownTrack(track_id.to_string()))?;
        let previous = track.reactions();
        let next = previous.toggled(kind, user_id);
        Ok(MutationIntent {
            track_id: track_id.to_string(),
            kind,
            seq: state.tracks.latest_seq(track_id) + 1,
            previous,
            next,
        })
    }
}

impl Client {
    pub async fn like_track(
        &self,
        session: &Session,
        track_id: &str,
    ) -> Result<Reactions, ClientError> {
        self.toggle_engagement(session, track_id, Engagement::Like)
            .await
    }

    pub async fn dislike_track(
        &self,
        session: &Session,
        track_id: &str,
    ) -> Result<Reactions, ClientError> {
        self.toggle_engagement(session, track_id, Engagement::Dislike)
            .await
    }

    /// Applies the toggle speculatively, sends it, and reconciles the store
    /// with the server's reactions. Returns the server's reactions.
    pub async fn toggle_engagement(
        &self,
        session: &Session,
        track_id: &str,
        kind: Engagement,
    ) -> Result<Reactions, ClientError> {
        let intent = self
            .store()
            .dispatch_with(|state| {
                let intent = MutationIntent::plan(state, track_id, kind, &session.user_id)?;
                Ok::<_, ClientError>((Action::EngagementSpeculated(intent.clone()), intent))
            })
            .await?;
        debug!(
            track_id,
            kind = kind.path_segment(),
            seq = intent.seq,
            "applied speculative engagement"
        );

        let request = ApiRequest::post(format!(
            "/api/tracks/{track_id}/{}",
            kind.path_segment()
        ))
        .bearer(&session.token);

        let outcome = match self.transport().send(request).await {
            Ok(response) => response.decode::<EngagementResponse>(kind.failure_message()),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(confirmed) => {
                let reactions = confirmed.reactions();
                self.store()
                    .dispatch(Action::EngagementConfirmed {
                        track_id: intent.track_id,
                        seq: intent.seq,
                        reactions: reactions.clone(),
                        discard_stale: self.options().discard_stale_responses,
                    })
                    .await;
                Ok(reactions)
            }
            Err(err) => {
                warn!(track_id, kind = kind.path_segment(), "engagement failed: {err}");
                let rollback = self
                    .options()
                    .rollback_on_failure
                    .then_some(intent.previous);
                self.store()
                    .dispatch(Action::EngagementFailed {
                        track_id: intent.track_id,
                        seq: intent.seq,
                        message: err.to_string(),
                        rollback,
                    })
                    .await;
                Err(err)
            }
        }
    }
}
