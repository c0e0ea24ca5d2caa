//! Core business logic for the movie store.
//!
//! Services here implement the store side of the HTTP contract: listing
//! movies joined with their first suggester, recording ballots and
//! suggestions, and toggling watched status.

pub mod services;

pub use services::*;
