pub mod cache;
pub mod handlers;
pub mod matcher;
pub mod search;
pub mod source;
