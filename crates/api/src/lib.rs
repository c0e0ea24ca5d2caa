//! HTTP API layer for the movie store.
//!
//! A single resource at `/` speaks the query-and-append contract:
//!
//! - `GET /?action=movies` and `GET /?action=leaderboard` list movies as JSON
//! - `POST /` takes a JSON body discriminated by `type` and replies with a
//!   plain status string (`OK`, `Invalid type`, or `Error: <message>`)
//!
//! Built on Axum 0.8; tracing and CORS layers are added by the server.

pub mod endpoints;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::AppState;
pub use response::StoreReply;
