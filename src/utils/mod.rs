pub mod clipboard;
pub mod color;
pub mod input;
pub mod logging;
