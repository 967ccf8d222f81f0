use crate::actions::Action;
use crate::config::{ClientConfig, MutationOptions};
use crate::errors::ClientError;
use crate::models::{Comment, CommentRequest, PageRequest, Session, TrackPage, TrackStats};
use crate::state::Store;
use crate::transport::{ApiRequest, ReqwestTransport, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, error};

/// API client bound to one store. Cheap to clone; clones share the store
/// and the transport.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    store: Store,
    options: MutationOptions,
    origin: String,
}

impl Client {
    pub fn new(transport: Arc<dyn Transport>, store: Store) -> Self {
        let defaults = ClientConfig::default();
        Self {
            transport,
            store,
            options: defaults.mutation,
            origin: defaults.origin,
        }
    }

    pub fn from_config(config: &ClientConfig, store: Store) -> Self {
        let transport = Arc::new(ReqwestTransport::new(config.api_base_url.clone()));
        Self::new(transport, store)
            .with_options(config.mutation)
            .with_origin(config.origin.clone())
    }

    pub fn with_options(mut self, options: MutationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn options(&self) -> MutationOptions {
        self.options
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }

    /// Sends `request`, decodes the body on success and dispatches the
    /// action built from it. Failures are returned without touching the
    /// store.
    async fn fetch_and_store<T, F>(
        &self,
        request: ApiRequest,
        failure: &str,
        into_action: F,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Clone,
        F: FnOnce(T) -> Action,
    {
        debug!(method = %request.method, path = %request.path, "fetch");
        let result = match self.transport.send(request).await {
            Ok(response) => response.decode::<T>(failure),
            Err(err) => Err(err),
        };
        match result {
            Ok(data) => {
                self.store.dispatch(into_action(data.clone())).await;
                Ok(data)
            }
            Err(err) => {
                error!("{failure}: {err}");
                Err(err)
            }
        }
    }

    pub async fn fetch_all_tracks(&self, page: PageRequest) -> Result<TrackPage, ClientError> {
        let request = ApiRequest::get("/api/tracks/all")
            .query("page", page.page)
            .query("limit", page.limit);
        self.fetch_and_store(request, "Failed to fetch tracks", |data: TrackPage| {
            let (tracks, total_pages, current_page) = data.into_parts();
            Action::AllTracksLoaded {
                tracks,
                total_pages,
                current_page,
            }
        })
        .await
    }

    pub async fn fetch_user_tracks(
        &self,
        session: &Session,
        page: PageRequest,
    ) -> Result<TrackPage, ClientError> {
        let request = ApiRequest::get("/api/tracks/user")
            .query("page", page.page)
            .query("limit", page.limit)
            .bearer(&session.token);
        self.fetch_and_store(request, "Failed to fetch user tracks", |data: TrackPage| {
            Action::UserTracksLoaded {
                tracks: data.into_parts().0,
            }
        })
        .await
    }

    pub async fn increment_play_count(&self, track_id: &str) -> Result<TrackStats, ClientError> {
        let request = ApiRequest::post(format!("/api/tracks/{track_id}/play"));
        self.fetch_and_store(request, "Failed to increment play count", |stats| {
            Action::TrackStatsUpdated {
                track_id: track_id.to_string(),
                stats,
            }
        })
        .await
    }

    pub async fn share_track(&self, track_id: &str) -> Result<TrackStats, ClientError> {
        let request = ApiRequest::post(format!("/api/tracks/{track_id}/share"));
        self.fetch_and_store(request, "Failed to share track", |stats| {
            Action::TrackStatsUpdated {
                track_id: track_id.to_string(),
                stats,
            }
        })
        .await
    }

    pub async fn add_comment(
        &self,
        session: &Session,
        track_id: &str,
        text: &str,
    ) -> Result<Comment, ClientError> {
        let body = serde_json::to_value(CommentRequest { text })?;
        let request = ApiRequest::post(format!("/api/tracks/{track_id}/comment"))
            .bearer(&session.token)
            .json(body);
        self.fetch_and_store(request, "Failed to add comment", |comment| {
            Action::CommentAdded {
                track_id: track_id.to_string(),
                comment,
            }
        })
        .await
    }

    pub async fn get_comments(&self, track_id: &str) -> Result<Vec<Comment>, ClientError> {
        let request = ApiRequest::get(format!("/api/tracks/{track_id}/comments"));
        self.fetch_and_store(request, "Failed to fetch comments", |comments| {
            Action::CommentsLoaded {
                track_id: track_id.to_string(),
                comments,
            }
        })
        .await
    }

    /// Deletes a comment. The response body is not inspected on success.
    pub async fn delete_comment(
        &self,
        session: &Session,
        track_id: &str,
        comment_id: &str,
    ) -> Result<(), ClientError> {
        const FAILURE: &str = "Failed to delete comment";
        let request =
            ApiRequest::delete(format!("/api/tracks/{track_id}/comments/{comment_id}"))
                .bearer(&session.token);
        let outcome = match self.transport.send(request).await {
            Ok(response) => response.ensure_success(FAILURE),
            Err(err) => Err(err),
        };
        if let Err(err) = outcome {
            error!("{FAILURE}: {err}");
            return Err(err);
        }
        self.store
            .dispatch(Action::CommentDeleted {
                track_id: track_id.to_string(),
                comment_id: comment_id.to_string(),
            })
            .await;
        Ok(())
    }

    /// Link a listener can open to reach the track.
    pub fn share_link(&self, track_id: &str) -> String {
        share_url(&self.origin, track_id)
    }
}

pub fn share_url(origin: &str, track_id: &str) -> String {
    format!("{}/track/{track_id}", origin.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_url_strips_trailing_slash() {
        assert_eq!(
            share_url("https://tunes.example/", "abc123"),
            "https://tunes.example/track/abc123"
        );
        assert_eq!(share_url("http://localhost:5173", "t1"), "http://localhost:5173/track/t1");
    }
}
