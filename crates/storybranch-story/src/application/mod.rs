//! Application services for the story context.

pub mod command_handlers;
pub mod query_handlers;
