//! Movie entity (one row per distinct title).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Title as first submitted; unique on `lower(title)`
    pub title: String,

    /// Aggregated vote tally
    pub votes: i32,

    /// When the movie was watched (null while unwatched)
    #[sea_orm(nullable)]
    pub watched_at: Option<DateTimeWithTimeZone>,

    /// Who marked the movie as watched
    #[sea_orm(nullable)]
    pub marked_by: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
