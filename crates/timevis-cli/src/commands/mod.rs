pub mod block;
pub mod config;
pub mod events;
pub mod render;
