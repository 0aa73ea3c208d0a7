use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub firstname: String,
    pub lastname: String,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string, never the raw password.
    pub password: String,

    pub avatar: Option<String>,
    pub cover: Option<String>,
    pub channel_description: Option<String>,

    pub is_admin: bool,
    /// Exactly one owner account, created by the seeder.
    pub is_owner: bool,

    #[sea_orm(has_many)]
    pub videos: HasMany<super::video::Entity>,

    #[sea_orm(has_many)]
    pub comments: HasMany<super::comment::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
