pub mod client;
pub mod config;
pub mod engine;
pub mod github;
pub mod items;

pub use client::*;
pub use config::*;
pub use engine::*;
pub use github::*;
pub use items::*;
