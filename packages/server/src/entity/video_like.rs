use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One reaction row per (user, video). `value` is +1 for a like, -1 for a
/// dislike; toggling off deletes the row, so "no row" means no reaction.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "video_like")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub video_id: Uuid,

    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,
    #[sea_orm(belongs_to, from = "video_id", to = "id")]
    pub video: HasOne<super::video::Entity>,

    pub value: i16,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

pub const LIKE: i16 = 1;
pub const DISLIKE: i16 = -1;
