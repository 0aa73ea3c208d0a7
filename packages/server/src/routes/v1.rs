use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/videos", video_routes(config))
        .nest("/users", user_routes())
        .nest("/categories", category_routes())
        .nest("/admin", admin_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::signup))
        .routes(routes!(handlers::auth::login))
        .routes(routes!(handlers::auth::me))
}

fn video_routes(config: &AppConfig) -> OpenApiRouter<AppState> {
    // The multipart upload shares "/" with the listing, so the raised body
    // limit covers both; the GET has no body to limit.
    let listing = OpenApiRouter::new()
        .routes(routes!(
            handlers::video::recommended_videos,
            handlers::video::new_video
        ))
        .layer(handlers::video::upload_body_limit(&config.uploads));

    OpenApiRouter::new()
        .merge(listing)
        .routes(routes!(handlers::video::search_videos))
        .routes(routes!(handlers::video::get_video))
        .routes(routes!(handlers::stream::get_video_file))
        .routes(routes!(handlers::stream::get_thumbnail_file))
        .routes(routes!(handlers::video::like_video))
        .routes(routes!(handlers::video::dislike_video))
        .routes(routes!(handlers::video::add_comment))
        .routes(routes!(handlers::video::add_view))
}

fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::user::recommend_channels,
            handlers::user::edit_user
        ))
        .routes(routes!(handlers::user::get_feed))
        .routes(routes!(handlers::user::search_users))
        .routes(routes!(handlers::user::liked_videos))
        .routes(routes!(handlers::user::history))
        .routes(routes!(handlers::user::get_profile))
        .routes(routes!(handlers::user::toggle_subscribe))
        .routes(routes!(handlers::user::toggle_admin))
}

fn category_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::category::get_all_categories,
            handlers::category::create_category
        ))
        .routes(routes!(handlers::category::reorder_categories))
        .routes(routes!(
            handlers::category::update_category,
            handlers::category::delete_category
        ))
}

fn admin_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::admin::get_users))
        .routes(routes!(handlers::admin::remove_user))
        .routes(routes!(
            handlers::admin::get_videos,
            handlers::admin::add_video
        ))
        .routes(routes!(
            handlers::admin::update_video,
            handlers::admin::remove_video
        ))
}
