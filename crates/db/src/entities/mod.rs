//! Database entities.

pub mod movie;
pub mod suggestion;
pub mod vote;

pub use movie::Entity as Movie;
pub use suggestion::Entity as Suggestion;
pub use vote::Entity as Vote;
