//! Vote entity (append-only ballot log).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vote")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub voter_name: String,

    /// Pick slots; a title appears once per vote assigned to it
    #[sea_orm(nullable)]
    pub pick1: Option<String>,
    #[sea_orm(nullable)]
    pub pick2: Option<String>,
    #[sea_orm(nullable)]
    pub pick3: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// The filled pick slots, in order.
    #[must_use]
    pub fn picks(&self) -> Vec<&str> {
        [&self.pick1, &self.pick2, &self.pick3]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .collect()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
