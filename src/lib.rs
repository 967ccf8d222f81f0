pub mod actions;
pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod engagement;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod reducer;
pub mod state;
pub mod transport;

pub use actions::{Action, Engagement, MutationIntent};
pub use app::router;
pub use client::{share_url, Client};
pub use config::{ClientConfig, MutationOptions};
pub use errors::ClientError;
pub use reducer::ClientState;
pub use state::Store;
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};
