pub mod admin;
pub mod auth;
pub mod category;
pub mod misc;
pub mod stream;
pub mod user;
pub mod video;
