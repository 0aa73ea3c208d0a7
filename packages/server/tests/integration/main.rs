mod common;

mod auth;
mod categories;
mod users;
mod videos;
