pub mod category;
pub mod comment;
pub mod subscription;
pub mod user;
pub mod video;
pub mod video_like;
pub mod view;
