pub mod analyzer;
pub mod handlers;
pub mod highlights;
