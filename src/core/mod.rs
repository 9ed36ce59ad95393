pub mod config;
pub mod extract;
pub mod session;
pub mod snippet;
