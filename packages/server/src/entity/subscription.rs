use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// `subscriber_id` follows `channel_id`. Both reference `user`, so only the
/// subscriber side declares a relation; a second one would collide.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subscription")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub subscriber_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub channel_id: Uuid,

    #[sea_orm(belongs_to, from = "subscriber_id", to = "id")]
    pub subscriber: HasOne<super::user::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
