//! Dashboard HTTP surface.
//!
//! ```text
//! ┌──────────┐  HTTP  ┌─────────────────────────────────────────────┐
//! │ Frontend │ ─────> │ server.rs  (ServerConfig, bind, shutdown)   │
//! │ (polls)  │ <───── │   └─ api.rs  (routes, AppState, ApiError)   │
//! └──────────┘        │        │                                    │
//!                     │        v                                    │
//!                     │ service::IssueService (cache + fetcher)     │
//!                     └─────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod server;
