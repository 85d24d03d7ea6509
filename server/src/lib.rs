pub mod config;
pub mod html;
pub mod map;
pub mod routes;
pub mod server_state;
pub mod tabs;
