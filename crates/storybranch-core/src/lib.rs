//! Storybranch Core — shared domain abstractions.
//!
//! This crate defines the traits and types the story context and the HTTP
//! gateway depend on. It contains no infrastructure code.

pub mod clock;
pub mod error;
pub mod generator;
pub mod id;
pub mod repository;
