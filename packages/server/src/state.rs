use std::time::Duration;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::cache::TtlCache;
use crate::config::AppConfig;
use crate::models::user::ProfileCore;
use crate::models::video::VideoDetailCore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    /// Viewer-independent profile payloads, keyed by user id.
    pub profile_cache: TtlCache<Uuid, ProfileCore>,
    /// Viewer-independent video detail payloads, keyed by video id.
    pub video_cache: TtlCache<Uuid, VideoDetailCore>,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        let profile_cache = TtlCache::new(Duration::from_secs(config.cache.profile_ttl_secs));
        let video_cache = TtlCache::new(Duration::from_secs(config.cache.video_ttl_secs));
        Self {
            db,
            config,
            profile_cache,
            video_cache,
        }
    }
}
