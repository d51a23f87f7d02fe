pub mod config;
pub mod constants;
pub mod error;
pub mod subtitle;
pub mod utils;

pub use error::{Result, SubtitleError};
