use clap::Parser;
use std::env;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5173";
const DEFAULT_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_PAGE_LIMIT: u32 = 10;

/// How the optimistic engagement path treats failures and late answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationOptions {
    /// Restore the pre-mutation reactions when the request fails.
    pub rollback_on_failure: bool,
    /// Ignore confirmations that belong to an intent older than the latest
    /// one for the same track.
    pub discard_stale_responses: bool,
}

impl Default for MutationOptions {
    fn default() -> Self {
        Self {
            rollback_on_failure: true,
            discard_stale_responses: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    /// Public origin used to build share links.
    pub origin: String,
    pub page_limit: u32,
    pub mutation: MutationOptions,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            mutation: MutationOptions::default(),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from `lookup`, falling back to defaults for missing
    /// or unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|value| parse_flag(&value))
                .unwrap_or(default)
        };

        Self {
            api_base_url: lookup("API_BASE_URL").unwrap_or(defaults.api_base_url),
            origin: lookup("APP_ORIGIN").unwrap_or(defaults.origin),
            page_limit: lookup("TRACKS_PAGE_LIMIT")
                .and_then(|value| value.parse::<u32>().ok())
                .filter(|limit| *limit > 0)
                .unwrap_or(defaults.page_limit),
            mutation: MutationOptions {
                rollback_on_failure: flag(
                    "ROLLBACK_ON_FAILURE",
                    defaults.mutation.rollback_on_failure,
                ),
                discard_stale_responses: flag(
                    "DISCARD_STALE_RESPONSES",
                    defaults.mutation.discard_stale_responses,
                ),
            },
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Arguments of the development proxy.
#[derive(Debug, Clone, Parser)]
#[command(name = "trackshare", about = "Forwards /api requests to the tracks backend")]
pub struct ProxyArgs {
    /// Port to listen on.
    #[arg(long, default_value_t = 5173, env = "PORT")]
    pub port: u16,

    /// Address to bind to.
    #[arg(long, default_value = "127.0.0.1", env = "BIND_ADDR")]
    pub bind: String,

    /// Backend that receives every /api request.
    #[arg(long, default_value = "http://localhost:3000", env = "API_PROXY_TARGET")]
    pub target: String,
}
