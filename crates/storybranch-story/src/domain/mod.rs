//! Domain model for the story context.

pub mod aggregates;
pub mod commands;
pub mod generator;
