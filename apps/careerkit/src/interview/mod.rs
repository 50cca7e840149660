pub mod bank;
pub mod handlers;
pub mod prep;
pub mod prompts;
