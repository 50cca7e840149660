pub mod analyzer;
pub mod complexity;
pub mod handlers;
pub mod style;
