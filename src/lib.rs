//! Lingua · Language Trainer Core
//!
//! Device-local core for the mobile language-learning app:
//! - Session manager (token + cached profile + 24h expiry) with route guards
//! - Progress trackers (study list, learned items) synced to a key-value store
//! - Mini-game scoring engines (vocabulary task, grammar quiz, speaking practice)
//! - Daily challenge generation
//! - Remote API client for the `/api/my/user/...` backend
//!
//! Important env variables:
//!   API_BASE_URL        : backend base URL (default "http://localhost:8000")
//!   CONTENT_CONFIG_PATH : path to TOML content bank (optional)
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

pub mod telemetry;
pub mod util;
pub mod error;
pub mod domain;
pub mod store;
pub mod config;
pub mod seeds;
pub mod session;
pub mod tracker;
pub mod game;
pub mod challenges;
pub mod api;
pub mod state;

pub use error::{CoreError, CoreResult};
pub use state::AppCore;
