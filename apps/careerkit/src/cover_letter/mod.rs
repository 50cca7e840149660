pub mod formatter;
pub mod generator;
pub mod handlers;
pub mod placeholders;
pub mod prompts;
