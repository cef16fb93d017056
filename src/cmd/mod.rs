//! CLI command implementations.
//!
//! | Module    | Commands handled |
//! |-----------|------------------|
//! | `serve`   | `Serve`          |
//! | `issues`  | `Issues`         |
//! | `config`  | `Config`         |

pub mod config;
pub mod issues;
pub mod serve;

pub use config::cmd_config;
pub use issues::cmd_issues;
pub use serve::cmd_serve;
