//! Common utilities and shared types for movienight.
//!
//! This crate provides the pieces shared by the store service and the client:
//!
//! - **Configuration**: Application settings via [`Config`] and [`ClientConfig`]
//! - **Error handling**: Store-side error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based identifiers for log records via [`IdGenerator`]
//! - **Models**: The wire shapes exchanged with the store ([`Movie`], [`StoreRequest`])
//! - **Titles**: Display normalization and case-insensitive title keys
//!
//! # Example
//!
//! ```no_run
//! use movienight_common::{Config, AppResult, title_case};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("Listening on port {}", config.server.port);
//!     println!("{}", title_case("the GODFATHER part II"));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod models;
pub mod title;

pub use config::{ClientConfig, Config};
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use models::{MAX_VOTES, Movie, OK_REPLY, Picks, StoreRequest};
pub use title::{title_case, title_key, titles_match};
