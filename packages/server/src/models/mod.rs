pub mod admin;
pub mod auth;
pub mod category;
pub mod shared;
pub mod user;
pub mod video;
