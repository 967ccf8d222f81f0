use crate::actions::Action;
use crate::reducer::{reduce, ClientState};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared client state container. Every write goes through the reducer
/// under the lock, so readers never see a half-applied action.
#[derive(Clone, Default)]
pub struct Store {
    state: Arc<Mutex<ClientState>>,
}

impl Store {
    pub fn new(state: ClientState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub async fn dispatch(&self, action: Action) {
        let mut state = self.state.lock().await;
        reduce(&mut state, action);
    }

    /// Reads the current state and dispatches the action `plan` derives from
    /// it, without releasing the lock in between.
    pub async fn dispatch_with<R, E>(
        &self,
        plan: impl FnOnce(&ClientState) -> Result<(Action, R), E>,
    ) -> Result<R, E> {
        let mut state = self.state.lock().await;
        let (action, output) = plan(&state)?;
        reduce(&mut state, action);
        Ok(output)
    }

    pub async fn select<R>(&self, selector: impl FnOnce(&ClientState) -> R) -> R {
        let state = self.state.lock().await;
        selector(&state)
    }

    pub async fn snapshot(&self) -> ClientState {
        self.state.lock().await.clone()
    }
}
